//! Generic building blocks shared by every record kind.
//!
//! # Main Components
//!
//! - [`Schema`], [`Resource`], [`Transaction`] - Descriptors a record kind implements
//! - [`Record`] / [`FieldValue`] - A total field-to-value mapping for one instance
//! - [`RecordForm`] - The editable projection of a record with per-field constraints
//! - [`Transport`] - The seam every backend call goes through
//! - [`ClientError`] / [`ErrorMessage`] - Raw backend failures and their user-facing form
//!
//! # Testing
//!
//! See [`mock`] for a scripted transport that tests clients without a backend.

pub mod error;
pub mod form;
pub mod mock;
pub mod normalize;
pub mod record;
pub mod schema;
pub mod transport;

pub use error::*;
pub use form::*;
pub use normalize::*;
pub use record::*;
pub use schema::*;
pub use transport::*;
