//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. The crate/module prefix is hidden (`with_target(false)`); every event
//! carries the record kind as a structured `kind` field instead.
//!
//! ## What Gets Traced
//!
//! - **Client calls**: one span per call (`list_all`, `get_one`, `create`, ...) with the kind
//! - **Controller outcomes**: `info` on success, `warn` with the raw backend error on failure
//! - **Ledger**: startup, every applied or rejected write, shutdown with the final record count
//! - **HTTP**: `debug` per request and response status
//!
//! ## Usage
//!
//! ```bash
//! # Outcomes only
//! RUST_LOG=info cargo run
//!
//! # Full request payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the HTTP transport
//! RUST_LOG=hotel_console::clients::http=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a walkthrough reads like:
//!
//! ```text
//! INFO Ledger started collections=7
//! INFO create{kind="Client"}: Created path=/Client size=1
//! INFO Record created kind="Client" key=Some("C1")
//! INFO Collection loaded kind="Client" size=1
//! WARN get_one{kind="Client"}: Rejected method=GET path=/Client/C1 error=404 - Not Found
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
