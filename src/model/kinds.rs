//! The closed sets of record kinds the console manages, for routing and dispatch by
//! name. Typed code uses the schema structs ([`Hotel`](super::Hotel), ...) directly.

use super::{Bookroom, Cancelroom, Client, Durationcomplete, Hotel, Order, Room};
use crate::framework::Schema;
use std::fmt;
use std::str::FromStr;

/// Namespace of every type in the hotel-booking business network.
pub const NAMESPACE: &str = "org.acme.hotelbooking";

/// Symbols of a hotel's `rating`.
pub const RATINGS: &[&str] = &["five_star", "seven_star"];

/// Symbols of a room's `status`.
pub const ROOM_STATUSES: &[&str] = &["BOOKED", "AVAILABLE", "CANCELLED"];

/// Members of the `Address` concept a client's `address` holds.
pub const ADDRESS_FIELDS: &[&str] = &["country", "city", "streetaddress"];

/// Members of the `Birthdetails` concept a client's `birthdetails` holds.
pub const BIRTHDETAILS_FIELDS: &[&str] = &["Dob"];

/// Symbols of a room's `type`.
pub const ROOM_TYPES: &[&str] = &["single", "double", "triple", "quad"];

/// Whether a resource kind is a participant or an asset of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Participant,
    Asset,
}

/// The four resource kinds with CRUD screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Hotel,
    Client,
    Room,
    Order,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Hotel,
        ResourceKind::Client,
        ResourceKind::Room,
        ResourceKind::Order,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Hotel => Hotel::NAME,
            ResourceKind::Client => Client::NAME,
            ResourceKind::Room => Room::NAME,
            ResourceKind::Order => Order::NAME,
        }
    }

    pub fn category(self) -> Category {
        match self {
            ResourceKind::Hotel | ResourceKind::Client => Category::Participant,
            ResourceKind::Room | ResourceKind::Order => Category::Asset,
        }
    }

    pub fn path(self) -> String {
        format!("/{}", self.name())
    }

    /// Table header of the kind's screen.
    pub fn table_columns(self) -> Vec<&'static str> {
        match self {
            ResourceKind::Hotel => Hotel::table_columns(),
            ResourceKind::Client => Client::table_columns(),
            ResourceKind::Room => Room::table_columns(),
            ResourceKind::Order => Order::table_columns(),
        }
    }
}

/// The three one-shot transaction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Bookroom,
    Cancelroom,
    Durationcomplete,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 3] = [
        TransactionKind::Bookroom,
        TransactionKind::Cancelroom,
        TransactionKind::Durationcomplete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransactionKind::Bookroom => Bookroom::NAME,
            TransactionKind::Cancelroom => Cancelroom::NAME,
            TransactionKind::Durationcomplete => Durationcomplete::NAME,
        }
    }

    pub fn path(self) -> String {
        format!("/{}", self.name())
    }
}

/// A name that is not one of the console's kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

impl FromStr for TransactionKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
