//! # Mock Transport
//!
//! Utilities for testing clients and controllers without a backend.
//!
//! [`MockTransport`] answers requests from a queue of expectations, in order. Each
//! expectation names the verb and path it expects and the response to give back; a
//! request that doesn't match the next expectation panics the test.
//!
//! # Example
//! ```
//! use hotel_console::framework::mock::MockTransport;
//! use hotel_console::framework::{ClientError, Method, RestRequest, Transport};
//! use serde_json::json;
//!
//! # tokio_test_block(async {
//! let mock = MockTransport::new();
//! mock.expect_get("/Client").return_ok(json!([]));
//! mock.expect_delete("/Client/C1").return_err(ClientError::NotFound("/Client/C1".into()));
//!
//! let transport = mock.transport();
//! assert_eq!(transport.send(RestRequest::new(Method::Get, "Client")).await, Ok(json!([])));
//! let deleted = transport
//!     .send(RestRequest::new(Method::Delete, "Client").with_key("C1"))
//!     .await;
//! assert!(deleted.unwrap_err().is_not_found());
//!
//! mock.verify();
//! # });
//! # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

use crate::framework::error::ClientError;
use crate::framework::transport::{Method, RestRequest, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// An expected request and the response to give it.
struct Expectation {
    method: Method,
    path: String,
    response: Result<Value, ClientError>,
}

/// A scripted transport with expectation tracking.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    received: Arc<Mutex<Vec<RestRequest>>>,
}

impl MockTransport {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shareable handle for clients under test. Expectations stay shared with `self`.
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    /// Expects a request with the given verb and path.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    pub fn expect_put(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Put, path)
    }

    pub fn expect_delete(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, path)
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<RestRequest> {
        self.received.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RestRequest) -> Result<Value, ClientError> {
        let path = request.path();
        let method = request.method;
        self.received.lock().unwrap().push(request);

        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(exp) if exp.method == method && exp.path == path => exp.response,
            Some(exp) => panic!(
                "Unexpected request {} {}, expected {} {}",
                method, path, exp.method, exp.path
            ),
            None => panic!("Unexpected request {} {}, no expectations left", method, path),
        }
    }
}

/// Builder that completes an expectation with its response.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ClientError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, ClientError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_answers_in_order() {
        let mock = MockTransport::new();
        mock.expect_post("/Hotel").return_ok(Value::Null);
        mock.expect_get("/Hotel/Ritz").return_ok(json!({ "name": "Ritz" }));

        let transport = mock.transport();
        let created = transport
            .send(RestRequest::new(Method::Post, "Hotel").with_body(json!({ "name": "Ritz" })))
            .await;
        assert_eq!(created, Ok(Value::Null));

        let fetched = transport
            .send(RestRequest::new(Method::Get, "Hotel").with_key("Ritz"))
            .await
            .unwrap();
        assert_eq!(fetched["name"], "Ritz");

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].body, Some(json!({ "name": "Ritz" })));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected request")]
    async fn test_mock_rejects_unexpected_paths() {
        let mock = MockTransport::new();
        mock.expect_get("/Room").return_ok(json!([]));
        let _ = mock.send(RestRequest::new(Method::Get, "Order")).await;
    }
}
