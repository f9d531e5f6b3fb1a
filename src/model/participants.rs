//! Participant kinds: the hotels offering rooms and the clients booking them.

use super::kinds::{ADDRESS_FIELDS, BIRTHDETAILS_FIELDS, NAMESPACE, RATINGS};
use crate::framework::{FieldType, Resource};

crate::schema! {
    /// A hotel, keyed by its `name`.
    pub struct Hotel in NAMESPACE {
        Name => "name": FieldType::Text,
        NoOfRooms => "no_of_rooms": FieldType::Number,
        Balance => "balance": FieldType::Number,
        SwimmingPool => "Swimming_pool": FieldType::Boolean,
        ValetCarParking => "valet_car_parking": FieldType::Boolean,
        HighSpeedInternet => "wi_fiHigh_speed_internet": FieldType::Boolean,
        FitnessCenter => "Fitness_center": FieldType::Boolean,
        Rating => "rating": FieldType::Enum(RATINGS),
        DoctorOnCall => "Doctor_on_call": FieldType::Boolean,
    }
}

impl Resource for Hotel {
    const KEY: HotelField = HotelField::Name;
}

crate::schema! {
    /// A hotel guest, keyed by `ID`.
    pub struct Client in NAMESPACE {
        Id => "ID": FieldType::Text,
        Firstname => "firstname": FieldType::Text,
        Lastname => "lastname": FieldType::Text,
        Balance => "balance": FieldType::Number,
        PhoneNo => "phone_no": FieldType::Text,
        Address => "address": FieldType::Concept(ADDRESS_FIELDS),
        Birthdetails => "birthdetails": FieldType::Concept(BIRTHDETAILS_FIELDS),
    }
}

impl Resource for Client {
    const KEY: ClientField = ClientField::Id;
}
