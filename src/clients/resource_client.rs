//! # Resource Client
//!
//! The typed REST adapter for one resource kind. It knows the kind's collection path and
//! payload shape, and hands every request to a [`Transport`].

use crate::framework::{ClientError, Method, Record, Resource, RestRequest, Transport};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Performs list/get/create/update/delete for the records of `K`.
pub struct ResourceClient<K: Resource> {
    transport: Arc<dyn Transport>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Resource> ResourceClient<K> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _kind: PhantomData,
        }
    }

    fn request(&self, method: Method) -> RestRequest {
        RestRequest::new(method, K::NAME)
    }

    /// Fetches every record of the kind.
    #[instrument(skip(self), fields(kind = K::NAME))]
    pub async fn list_all(&self) -> Result<Vec<Record<K>>, ClientError> {
        debug!("Sending request");
        let body = self.transport.send(self.request(Method::Get)).await?;
        let items = body.as_array().ok_or_else(|| {
            ClientError::Decode(format!("expected an array from {}, got {}", K::path(), body))
        })?;
        items.iter().map(Record::from_json).collect()
    }

    /// Fetches the record whose primary key is `key`.
    #[instrument(skip(self), fields(kind = K::NAME))]
    pub async fn get_one(&self, key: &str) -> Result<Record<K>, ClientError> {
        debug!("Sending request");
        let body = self
            .transport
            .send(self.request(Method::Get).with_key(key))
            .await?;
        Record::from_json(&body)
    }

    /// Submits a new record. The caller supplies the primary key inside `record`.
    #[instrument(skip(self, record), fields(kind = K::NAME, key = ?record.key()))]
    pub async fn create(&self, record: &Record<K>) -> Result<Value, ClientError> {
        debug!(?record, "Sending request");
        self.transport
            .send(self.request(Method::Post).with_body(record.create_payload()))
            .await
    }

    /// Updates the record identified by `key` with the fields `record` holds a value for.
    #[instrument(skip(self, record), fields(kind = K::NAME))]
    pub async fn update(&self, key: &str, record: &Record<K>) -> Result<Value, ClientError> {
        debug!(?record, "Sending request");
        self.transport
            .send(
                self.request(Method::Put)
                    .with_key(key)
                    .with_body(record.update_payload()),
            )
            .await
    }

    /// Removes the record identified by `key`.
    #[instrument(skip(self), fields(kind = K::NAME))]
    pub async fn delete(&self, key: &str) -> Result<(), ClientError> {
        debug!("Sending request");
        self.transport
            .send(self.request(Method::Delete).with_key(key))
            .await
            .map(|_| ())
    }
}

impl<K: Resource> Clone for ResourceClient<K> {
    fn clone(&self) -> Self {
        Self::new(self.transport.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTransport;
    use crate::model::{Client, ClientField};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_all_decodes_every_record() {
        let mock = MockTransport::new();
        mock.expect_get("/Client").return_ok(json!([
            { "$class": "org.acme.hotelbooking.Client", "ID": "C1", "firstname": "Jo" },
            { "$class": "org.acme.hotelbooking.Client", "ID": "C2", "balance": 0 },
        ]));
        let client = ResourceClient::<Client>::new(mock.transport());

        let records = client.list_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key().as_deref(), Some("C1"));
        assert_eq!(records[1].get(ClientField::Balance).as_f64(), Some(0.0));
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_all_rejects_non_arrays() {
        let mock = MockTransport::new();
        mock.expect_get("/Client").return_ok(json!({ "ID": "C1" }));
        let client = ResourceClient::<Client>::new(mock.transport());

        let err = client.list_all().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_update_excludes_key_from_payload() {
        let mock = MockTransport::new();
        mock.expect_put("/Client/C1").return_ok(Value::Null);
        let client = ResourceClient::<Client>::new(mock.transport());

        let record = Record::<Client>::empty()
            .with(ClientField::Id, "C1")
            .with(ClientField::Firstname, "Jon");
        client.update("C1", &record).await.unwrap();

        let sent = mock.requests().remove(0);
        assert_eq!(sent.key.as_deref(), Some("C1"));
        let body = sent.body.unwrap();
        assert_eq!(body["$class"], "org.acme.hotelbooking.Client");
        assert_eq!(body["firstname"], "Jon");
        assert!(body.get("ID").is_none());
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let mock = MockTransport::new();
        mock.expect_delete("/Client/C9")
            .return_err(ClientError::NotFound("/Client/C9".into()));
        let client = ResourceClient::<Client>::new(mock.transport());

        let err = client.delete("C9").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
