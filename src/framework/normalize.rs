//! # Error Normalizer
//!
//! Maps a raw backend failure onto the message a user sees. The policy is closed: two
//! sentinel texts get a friendly message, everything else is shown verbatim.

use crate::framework::error::{ClientError, NOT_FOUND, SERVER_ERROR};
use std::fmt;

/// A user-facing error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorMessage {
    ServerUnreachable,
    RouteNotFound,
    Other(String),
}

/// Classifies raw failure text by exact match.
pub fn normalize(raw: &str) -> ErrorMessage {
    match raw {
        SERVER_ERROR => ErrorMessage::ServerUnreachable,
        NOT_FOUND => ErrorMessage::RouteNotFound,
        other => ErrorMessage::Other(other.to_string()),
    }
}

impl From<&ClientError> for ErrorMessage {
    fn from(error: &ClientError) -> Self {
        normalize(&error.to_string())
    }
}

impl From<ClientError> for ErrorMessage {
    fn from(error: ClientError) -> Self {
        ErrorMessage::from(&error)
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMessage::ServerUnreachable => f.write_str(
                "Could not connect to REST server. Please check your configuration details",
            ),
            ErrorMessage::RouteNotFound => {
                f.write_str("404 - Could not find API route. Please check your available APIs.")
            }
            ErrorMessage::Other(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_classified() {
        assert_eq!(normalize("Server error"), ErrorMessage::ServerUnreachable);
        assert_eq!(normalize("404 - Not Found"), ErrorMessage::RouteNotFound);
    }

    #[test]
    fn test_everything_else_passes_through() {
        assert_eq!(
            normalize("anything else"),
            ErrorMessage::Other("anything else".to_string())
        );
        // Near misses are not sentinels.
        assert_eq!(
            normalize("server error"),
            ErrorMessage::Other("server error".to_string())
        );
    }

    #[test]
    fn test_client_errors_normalize_through_their_text() {
        let unreachable = ErrorMessage::from(ClientError::Network("connection refused".into()));
        assert_eq!(unreachable, ErrorMessage::ServerUnreachable);
        assert_eq!(
            unreachable.to_string(),
            "Could not connect to REST server. Please check your configuration details"
        );

        let missing = ErrorMessage::from(ClientError::NotFound("/Client/C9".into()));
        assert_eq!(missing, ErrorMessage::RouteNotFound);

        let conflict = ErrorMessage::from(ClientError::Conflict("already exists".into()));
        assert_eq!(conflict.to_string(), "already exists");
    }
}
