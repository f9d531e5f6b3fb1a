//! # Transaction Client
//!
//! Submits one-shot ledger transactions. A submit is a single POST of
//! `{ $class, ...fields }`; what the ledger does with it is not this client's concern.

use crate::framework::{ClientError, Method, Record, RestRequest, Transaction, Transport};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Posts transactions of kind `T`.
pub struct TransactionClient<T: Transaction> {
    transport: Arc<dyn Transport>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Transaction> TransactionClient<T> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _kind: PhantomData,
        }
    }

    /// Submits the transaction and returns the backend's echo of it.
    #[instrument(skip(self, record), fields(kind = T::NAME))]
    pub async fn submit(&self, record: &Record<T>) -> Result<Value, ClientError> {
        debug!(?record, "Sending request");
        self.transport
            .send(RestRequest::new(Method::Post, T::NAME).with_body(record.create_payload()))
            .await
    }
}

impl<T: Transaction> Clone for TransactionClient<T> {
    fn clone(&self) -> Self {
        Self::new(self.transport.clone())
    }
}
