//! # Error Types
//!
//! [`ClientError`] is what a backend call fails with. Its `Display` output is the raw
//! failure text the backend produced, which is what the
//! [error normalizer](crate::framework::normalize) classifies.

use thiserror::Error;

/// Raw failure text for an unreachable backend.
pub const SERVER_ERROR: &str = "Server error";

/// Raw failure text for a missing route or record.
pub const NOT_FOUND: &str = "404 - Not Found";

/// Errors surfaced by a backend call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// The backend could not be reached. Holds the transport's own description.
    #[error("Server error")]
    Network(String),

    /// The route, or the record behind it, does not exist. Holds the request path.
    #[error("404 - Not Found")]
    NotFound(String),

    /// A record with the same primary key already exists.
    #[error("{0}")]
    Conflict(String),

    /// A required field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// Any other failure status.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Conflict(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

/// Errors raised by form edits.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    /// Membership toggling needs the field to hold a sequence.
    #[error("Field {field} holds {found}, not a sequence")]
    NotASequence { field: &'static str, found: String },
}
