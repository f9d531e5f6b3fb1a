//! # Transaction Submitter
//!
//! Drives a transaction screen: a form and a submit. Transactions are one-shot, so
//! there is no collection, selection or hydration.

use super::crud::{ControllerStatus, Outcome, Phase};
use crate::clients::TransactionClient;
use crate::framework::{ErrorMessage, Record, RecordForm, Transaction, Transport};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Keeps one transaction form and submits it.
pub struct TransactionSubmitter<T: Transaction> {
    client: TransactionClient<T>,
    form: RecordForm<T>,
    status: watch::Sender<ControllerStatus>,
}

impl<T: Transaction> TransactionSubmitter<T> {
    pub fn new(client: TransactionClient<T>) -> Self {
        let (status, _) = watch::channel(ControllerStatus::default());
        Self {
            client,
            form: RecordForm::new(),
            status,
        }
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self::new(TransactionClient::new(transport))
    }

    pub fn form(&self) -> &RecordForm<T> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RecordForm<T> {
        &mut self.form
    }

    pub fn phase(&self) -> Phase {
        self.status.borrow().phase
    }

    pub fn error_message(&self) -> Option<ErrorMessage> {
        self.status.borrow().error_message.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerStatus> {
        self.status.subscribe()
    }

    /// Submits `snapshot`. Clears the form once the backend accepts it; otherwise the form
    /// is restored to `snapshot`. Returns the backend's echo of the transaction.
    pub async fn submit(&mut self, snapshot: Record<T>) -> Outcome<Value> {
        self.status
            .send_modify(|status| status.phase = Phase::Submitting);
        let result = self.client.submit(&snapshot).await;

        let outcome = match result {
            Ok(echo) => {
                self.form.reset();
                info!(kind = T::NAME, "Transaction submitted");
                Ok(echo)
            }
            Err(e) => {
                warn!(kind = T::NAME, error = %e, "Transaction rejected");
                self.form.load(&snapshot);
                Err(ErrorMessage::from(&e))
            }
        };
        let error_message = outcome.as_ref().err().cloned();
        self.status.send_modify(|status| {
            status.phase = Phase::Idle;
            status.error_message = error_message;
        });
        outcome
    }

    /// Submits the current form contents.
    pub async fn submit_form(&mut self) -> Outcome<Value> {
        let snapshot = self.form.snapshot();
        self.submit(snapshot).await
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTransport;
    use crate::framework::ClientError;
    use crate::model::{Cancelroom, CancelroomField};
    use serde_json::json;

    #[tokio::test]
    async fn test_submit_posts_and_clears() {
        let mock = MockTransport::new();
        mock.expect_post("/Cancelroom")
            .return_ok(json!({ "transactionId": "tx_1" }));
        let mut submitter = TransactionSubmitter::<Cancelroom>::with_transport(mock.transport());

        let form = submitter.form_mut();
        form.set_value(CancelroomField::Room, "R1");
        form.set_value(CancelroomField::Client, "C1");
        form.set_value(CancelroomField::Order, "O1");
        let echo = submitter.submit_form().await.unwrap();

        assert_eq!(echo["transactionId"], "tx_1");
        assert!(submitter.form().is_cleared());
        assert_eq!(submitter.error_message(), None);

        let body = mock.requests().remove(0).body.unwrap();
        assert_eq!(body["$class"], "org.acme.hotelbooking.Cancelroom");
        assert_eq!(body["order"], "O1");
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_form() {
        let mock = MockTransport::new();
        mock.expect_post("/Cancelroom")
            .return_err(ClientError::Backend {
                status: 500,
                message: "Order O1 is not active".into(),
            });
        let mut submitter = TransactionSubmitter::<Cancelroom>::with_transport(mock.transport());
        let snapshot = Record::<Cancelroom>::empty().with(CancelroomField::Order, "O1");

        let err = submitter.submit(snapshot.clone()).await.unwrap_err();

        assert_eq!(err.to_string(), "Order O1 is not active");
        assert_eq!(submitter.form().snapshot(), snapshot);
        assert_eq!(submitter.phase(), Phase::Idle);
    }
}
