//! # Lifecycle
//!
//! Building the console from configuration, shutting it down, and logging.
//!
//! - [`ConsoleConfig`]: backend selection, read from the environment or JSON
//! - [`HotelConsole`]: every controller wired to one transport
//! - [`setup_tracing`]: the `tracing-subscriber` setup used by the binary

pub mod config;
pub mod console;
pub mod tracing;

pub use config::*;
pub use console::*;
pub use self::tracing::setup_tracing;
