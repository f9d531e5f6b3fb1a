//! In-memory ledger backend.
//!
//! [`LedgerActor`] serves the same REST surface as the real backend from an in-process
//! store; [`LedgerHandle`] is its [`Transport`](crate::framework::Transport). Used by the
//! demo binary and the scenario tests.

mod actor;
mod collection;

pub use actor::*;
pub use collection::TRANSACTION_ID;
