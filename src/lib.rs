//! # Hotel Console
//!
//! > **The CRUD and form synchronization core of a hotel-booking ledger console.**
//!
//! The console manages four record kinds (hotels, clients, rooms, orders) and submits
//! three kinds of transactions (booking, cancellation, duration completion) against a
//! REST backend. This crate is everything behind the screens: typed records, one generic
//! controller per resource, form state, and translating backend failures into messages
//! a user can act on.
//!
//! ## Core Concepts
//!
//! ### One controller, many kinds
//! Every resource screen is a [`CrudController<K>`](controller::CrudController). `K` is a
//! marker type declared with [`schema!`], which also generates the field-token enum the
//! form and records are indexed by. Adding a kind is a declaration, not a new controller.
//!
//! ### Records are total
//! A [`Record`](framework::Record) holds a value for every declared field. Absent fields
//! are the explicit [`FieldValue::Empty`](framework::FieldValue) sentinel; `0`, `false`
//! and `""` are values like any other.
//!
//! ### Failures are values
//! Controller operations return [`Outcome`](controller::Outcome). Raw backend failures
//! ([`ClientError`](framework::ClientError)) are normalized to an
//! [`ErrorMessage`](framework::ErrorMessage) before they reach a view.
//!
//! ## Module Tour
//!
//! - [`framework`]: schemas, records, forms, the [`Transport`](framework::Transport) seam, errors
//! - [`model`]: the hotel-booking kinds
//! - [`clients`]: typed REST clients and the `reqwest` transport
//! - [`controller`]: screen state and operations
//! - [`ledger`]: an in-process backend actor with the same REST surface
//! - [`lifecycle`]: configuration, wiring, shutdown and tracing
//!
//! ## Quick Start
//!
//! ```bash
//! # Against the in-memory ledger
//! HOTEL_CONSOLE_BACKEND=memory RUST_LOG=info cargo run
//!
//! # Against a running REST server
//! HOTEL_CONSOLE_BACKEND=http://localhost:3000/api cargo run
//! ```

pub mod clients;
pub mod controller;
pub mod framework;
pub mod ledger;
pub mod lifecycle;
pub mod model;

#[doc(hidden)]
pub use paste::paste as __paste;
