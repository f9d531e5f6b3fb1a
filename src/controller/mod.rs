//! Screen controllers: [`CrudController`] for resources, [`TransactionSubmitter`] for
//! transactions.

mod crud;
mod submitter;

pub use crud::*;
pub use submitter::*;
