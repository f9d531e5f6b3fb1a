//! Transaction kinds. Each is submitted once and has no caller-supplied key.

use super::kinds::NAMESPACE;
use crate::framework::{FieldType, Transaction};

crate::schema! {
    /// Books a room of a hotel for a client.
    pub struct Bookroom in NAMESPACE {
        Id => "id": FieldType::Text,
        Hotel => "hotel": FieldType::Reference("Hotel"),
        Client => "client": FieldType::Reference("Client"),
        From => "from": FieldType::Date,
        To => "to": FieldType::Date,
        NoOfDays => "no_of_days": FieldType::Number,
    }
}

impl Transaction for Bookroom {}

crate::schema! {
    /// Cancels a client's order on a room.
    pub struct Cancelroom in NAMESPACE {
        Room => "room": FieldType::Reference("Room"),
        Client => "client": FieldType::Reference("Client"),
        Order => "order": FieldType::Reference("Order"),
    }
}

impl Transaction for Cancelroom {}

crate::schema! {
    /// Marks the stay of an order as finished.
    pub struct Durationcomplete in NAMESPACE {
        Room => "room": FieldType::Reference("Room"),
        Order => "order": FieldType::Reference("Order"),
    }
}

impl Transaction for Durationcomplete {}
