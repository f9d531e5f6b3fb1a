//! Asset kinds: rooms and the orders placed on them.

use super::kinds::{NAMESPACE, ROOM_STATUSES, ROOM_TYPES};
use crate::framework::{FieldType, Resource};

crate::schema! {
    /// A room of a hotel, keyed by `iD`.
    pub struct Room in NAMESPACE {
        Id => "iD": FieldType::Text,
        Number => "number": FieldType::Number,
        Hotel => "hotel": FieldType::Reference("Hotel"),
        Status => "status": FieldType::Enum(ROOM_STATUSES),
        Cost => "cost": FieldType::Number,
        Type => "type": FieldType::Enum(ROOM_TYPES),
    }
}

impl Resource for Room {
    const KEY: RoomField = RoomField::Id;
}

crate::schema! {
    /// A stay booked by a client, keyed by `orderID`.
    pub struct Order in NAMESPACE {
        OrderId => "orderID": FieldType::Text,
        Room => "room": FieldType::Reference("Room"),
        From => "from": FieldType::Date,
        To => "to": FieldType::Date,
        Client => "client": FieldType::Reference("Client"),
        NoOfDays => "no_of_days": FieldType::Number,
    }
}

impl Resource for Order {
    const KEY: OrderField = OrderField::OrderId;
}
