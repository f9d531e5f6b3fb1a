//! The hotel-booking record kinds.
//!
//! Each kind is a [`schema!`](crate::schema) declaration: a marker struct for typed code
//! ([`Record<Hotel>`](crate::framework::Record), `CrudController<Room>`, ...) and a
//! field-token enum (`HotelField`, `RoomField`, ...).

pub mod assets;
pub mod kinds;
pub mod participants;
pub mod transactions;

pub use assets::*;
pub use kinds::*;
pub use participants::*;
pub use transactions::*;
