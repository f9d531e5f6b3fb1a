//! # Transport Seam
//!
//! Every backend call goes through a [`Transport`]: one REST-shaped request in, one JSON
//! document (or a [`ClientError`]) out. The HTTP implementation talks to a real REST
//! server, the in-memory [ledger](crate::ledger) answers from its own store, and
//! [`MockTransport`](crate::framework::mock::MockTransport) replays scripted responses.

use crate::framework::error::ClientError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// The REST verbs the console uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// A request against `/<collection>` or `/<collection>/<key>`.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: Method,
    pub collection: String,
    pub key: Option<String>,
    pub body: Option<Value>,
}

impl RestRequest {
    pub fn new(method: Method, collection: impl Into<String>) -> Self {
        Self {
            method,
            collection: collection.into(),
            key: None,
            body: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Unencoded request path, for logs and error reports.
    pub fn path(&self) -> String {
        match &self.key {
            Some(key) => format!("/{}/{}", self.collection, key),
            None => format!("/{}", self.collection),
        }
    }
}

/// Carries requests to a backend.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the request. Success bodies are decoded JSON; an empty body is `null`.
    async fn send(&self, request: RestRequest) -> Result<Value, ClientError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: RestRequest) -> Result<Value, ClientError> {
        (**self).send(request).await
    }
}
