//! # Ledger Actor
//!
//! An in-process stand-in for the REST backend. It owns every collection and answers
//! REST-shaped requests one at a time from its own task, so the store needs no locks.
//!
//! Failures mirror the backend's:
//! - unknown route or record: [`ClientError::NotFound`]
//! - duplicate key on create: [`ClientError::Conflict`]
//! - missing required field or wrong `$class`: [`ClientError::Validation`]
//! - actor stopped: [`ClientError::Network`], i.e. the server is unreachable

use super::collection::Collection;
use crate::framework::{ClientError, Method, Resource, RestRequest, Transaction, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// A request to the ledger together with its reply channel.
#[derive(Debug)]
struct LedgerRequest {
    request: RestRequest,
    respond_to: oneshot::Sender<Result<Value, ClientError>>,
}

/// The actor half of the ledger: the store and the receiving end of the channel.
pub struct LedgerActor {
    receiver: mpsc::Receiver<LedgerRequest>,
    collections: HashMap<String, Collection>,
    next_id_fn: Box<dyn Fn() -> String + Send + Sync>,
}

impl LedgerActor {
    /// Creates an actor with no collections, and the handle that talks to it.
    ///
    /// `next_id_fn` generates the keys of submitted transactions.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> String + Send + Sync + 'static,
    ) -> (Self, LedgerHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            collections: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, LedgerHandle { sender })
    }

    /// Serves `/<K::NAME>` with full CRUD.
    pub fn register_resource<K: Resource>(&mut self) -> &mut Self {
        self.collections
            .insert(K::NAME.to_string(), Collection::for_resource::<K>());
        self
    }

    /// Serves `/<T::NAME>` for submitting and listing transactions.
    pub fn register_transaction<T: Transaction>(&mut self) -> &mut Self {
        self.collections
            .insert(T::NAME.to_string(), Collection::for_transaction::<T>());
        self
    }

    /// Runs the actor's event loop, processing requests until every handle is dropped.
    pub async fn run(mut self) {
        info!(collections = self.collections.len(), "Ledger started");

        while let Some(LedgerRequest {
            request,
            respond_to,
        }) = self.receiver.recv().await
        {
            let method = request.method;
            let path = request.path();
            debug!(%method, %path, body = ?request.body, "Request");

            let result = self.handle(request);
            match &result {
                Ok(_) if method != Method::Get => info!(%method, %path, "Applied"),
                Ok(_) => {}
                Err(e) => warn!(%method, %path, error = %e, "Rejected"),
            }
            let _ = respond_to.send(result);
        }

        let records: usize = self.collections.values().map(|c| c.records.len()).sum();
        info!(records, "Ledger shutdown");
    }

    fn handle(&mut self, request: RestRequest) -> Result<Value, ClientError> {
        let path = request.path();
        let RestRequest {
            method,
            collection,
            key,
            body,
        } = request;
        let not_found = || ClientError::NotFound(path.clone());

        let next_id = &self.next_id_fn;
        let collection = self.collections.get_mut(&collection).ok_or_else(not_found)?;

        match (method, key, body) {
            (Method::Get, None, _) => Ok(collection.list()),
            (Method::Get, Some(key), _) => collection.get(&key).ok_or_else(not_found),
            (Method::Post, None, Some(body)) => {
                let generated = collection.is_generated().then(|| next_id());
                let stored = collection.insert(body, generated)?;
                info!(path = %path, size = collection.records.len(), "Created");
                Ok(stored)
            }
            (Method::Put, Some(key), Some(body)) if !collection.is_generated() => {
                collection.merge(&key, body)
            }
            (Method::Delete, Some(key), _) if !collection.is_generated() => {
                collection.remove(&key)?;
                info!(path = %path, size = collection.records.len(), "Deleted");
                Ok(Value::Null)
            }
            (Method::Post | Method::Put, _, None) => Err(ClientError::Validation(format!(
                "{} {} requires a body",
                method, path
            ))),
            _ => Err(not_found()),
        }
    }
}

/// The client half of the ledger. Cheap to clone; the ledger stops once every handle is
/// dropped.
#[derive(Clone)]
pub struct LedgerHandle {
    sender: mpsc::Sender<LedgerRequest>,
}

#[async_trait]
impl Transport for LedgerHandle {
    async fn send(&self, request: RestRequest) -> Result<Value, ClientError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest {
                request,
                respond_to,
            })
            .await
            .map_err(|_| ClientError::Network("ledger closed".to_string()))?;
        response
            .await
            .map_err(|_| ClientError::Network("ledger dropped response channel".to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bookroom, Client, Hotel};
    use serde_json::json;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn spawn_ledger() -> LedgerHandle {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("tx_{}", counter.fetch_add(1, Ordering::SeqCst));

        let (mut actor, handle) = LedgerActor::new(8, next_id);
        actor
            .register_resource::<Client>()
            .register_resource::<Hotel>()
            .register_transaction::<Bookroom>();
        tokio::spawn(actor.run());
        handle
    }

    fn client_body(id: &str, firstname: &str) -> Value {
        json!({
            "$class": "org.acme.hotelbooking.Client",
            "ID": id,
            "firstname": firstname,
            "lastname": "Doe",
            "balance": 0,
            "phone_no": "555",
            "address": { "country": "US", "city": "Springfield", "streetaddress": "Main St" },
            "birthdetails": { "Dob": "1990-01-01" },
        })
    }

    #[tokio::test]
    async fn test_crud_round() {
        let ledger = spawn_ledger();

        ledger
            .send(RestRequest::new(Method::Post, "Client").with_body(client_body("C1", "Jo")))
            .await
            .unwrap();

        let listed = ledger.send(RestRequest::new(Method::Get, "Client")).await.unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let mut update = client_body("ignored", "Jon");
        update.as_object_mut().unwrap().remove("ID");
        let updated = ledger
            .send(
                RestRequest::new(Method::Put, "Client")
                    .with_key("C1")
                    .with_body(update),
            )
            .await
            .unwrap();
        assert_eq!(updated["ID"], "C1");
        assert_eq!(updated["firstname"], "Jon");

        ledger
            .send(RestRequest::new(Method::Delete, "Client").with_key("C1"))
            .await
            .unwrap();
        let gone = ledger
            .send(RestRequest::new(Method::Get, "Client").with_key("C1"))
            .await
            .unwrap_err();
        assert_eq!(gone, ClientError::NotFound("/Client/C1".to_string()));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let ledger = spawn_ledger();
        ledger
            .send(RestRequest::new(Method::Post, "Client").with_body(client_body("C1", "Jo")))
            .await
            .unwrap();

        let updated = ledger
            .send(
                RestRequest::new(Method::Put, "Client")
                    .with_key("C1")
                    .with_body(json!({
                        "$class": "org.acme.hotelbooking.Client",
                        "ID": "C9",
                        "firstname": "Jon",
                    })),
            )
            .await
            .unwrap();
        assert_eq!(updated["ID"], "C1");
        assert_eq!(updated["firstname"], "Jon");
        assert_eq!(updated["lastname"], "Doe");

        // An explicit null still clears the field, and a required one is refused.
        let err = ledger
            .send(
                RestRequest::new(Method::Put, "Client")
                    .with_key("C1")
                    .with_body(json!({ "lastname": null })),
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
        let stored = ledger
            .send(RestRequest::new(Method::Get, "Client").with_key("C1"))
            .await
            .unwrap();
        assert_eq!(stored["lastname"], "Doe");
    }

    #[tokio::test]
    async fn test_duplicate_key_conflicts() {
        let ledger = spawn_ledger();
        let create = RestRequest::new(Method::Post, "Client").with_body(client_body("C1", "Jo"));

        ledger.send(create.clone()).await.unwrap();
        let err = ledger.send(create).await.unwrap_err();
        assert!(err.is_conflict(), "got {err:?}");
    }

    #[tokio::test]
    async fn test_missing_required_field_is_rejected() {
        let ledger = spawn_ledger();
        let mut body = client_body("C1", "Jo");
        body["lastname"] = Value::Null;

        let err = ledger
            .send(RestRequest::new(Method::Post, "Client").with_body(body))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::Validation(
                "Instance org.acme.hotelbooking.Client missing required field lastname".into()
            )
        );
    }

    #[tokio::test]
    async fn test_wrong_class_is_rejected() {
        let ledger = spawn_ledger();
        let mut body = client_body("C1", "Jo");
        body["$class"] = json!("org.acme.hotelbooking.Hotel");

        let err = ledger
            .send(RestRequest::new(Method::Post, "Client").with_body(body))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_unknown_routes_are_not_found() {
        let ledger = spawn_ledger();
        let err = ledger
            .send(RestRequest::new(Method::Get, "Dashboard"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "404 - Not Found");

        let err = ledger
            .send(RestRequest::new(Method::Delete, "Bookroom").with_key("tx_1"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_transactions_get_generated_ids() {
        let ledger = spawn_ledger();
        let body = json!({
            "$class": "org.acme.hotelbooking.Bookroom",
            "id": "B1",
            "hotel": "Ritz",
            "client": "C1",
            "from": "2024-05-01",
            "to": "2024-05-03",
            "no_of_days": 2,
        });

        let first = ledger
            .send(RestRequest::new(Method::Post, "Bookroom").with_body(body.clone()))
            .await
            .unwrap();
        let second = ledger
            .send(RestRequest::new(Method::Post, "Bookroom").with_body(body))
            .await
            .unwrap();
        assert_eq!(first["transactionId"], "tx_1");
        assert_eq!(second["transactionId"], "tx_2");
    }

    #[tokio::test]
    async fn test_closed_ledger_is_unreachable() {
        let (actor, handle) = LedgerActor::new(1, || "tx".to_string());
        drop(actor);

        let err = handle
            .send(RestRequest::new(Method::Get, "Client"))
            .await
            .unwrap_err();
        assert!(err.is_network());
        assert_eq!(err.to_string(), "Server error");
    }
}
