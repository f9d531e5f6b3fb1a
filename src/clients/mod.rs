//! Typed clients over the [`Transport`](crate::framework::Transport) seam, and the HTTP
//! transport for a real REST server.

pub mod http;
pub mod resource_client;
pub mod transaction_client;

pub use http::*;
pub use resource_client::*;
pub use transaction_client::*;
