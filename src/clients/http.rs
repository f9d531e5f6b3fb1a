//! # HTTP Transport
//!
//! [`Transport`] over a REST server, using `reqwest`.
//!
//! Failures are reported the way the console expects to see them:
//!
//! | Condition | Error | Raw text |
//! |-----------|-------|----------|
//! | connection failed | [`ClientError::Network`] | `Server error` |
//! | 404 | [`ClientError::NotFound`] | `404 - Not Found` |
//! | 409 | [`ClientError::Conflict`] | server message |
//! | 400, 422 | [`ClientError::Validation`] | server message |
//! | anything else | [`ClientError::Backend`] | server message |
//!
//! The server message is read from a LoopBack-style `{"error": {"message": ..}}` body
//! and falls back to `"<status> - <reason>"`.

use crate::framework::{ClientError, Method, RestRequest, Transport};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};

/// Talks to the REST server rooted at a base URL such as `http://localhost:3000/api`.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Appends the collection and key as percent-encoded path segments.
    fn url_for(&self, request: &RestRequest) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ClientError::Network(format!("{} cannot be a base URL", self.base_url))
            })?;
            segments.pop_if_empty().push(&request.collection);
            if let Some(key) = &request.key {
                segments.push(key);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RestRequest) -> Result<Value, ClientError> {
        let url = self.url_for(&request)?;
        debug!(method = %request.method, %url, "Sending request");

        let builder = match request.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Put => self.http.put(url),
            Method::Delete => self.http.delete(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            warn!(path = %request.path(), error = %e, "Backend unreachable");
            ClientError::Network(e.to_string())
        })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if status.is_success() {
            debug!(%status, "Response received");
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()));
        }

        let error = classify(status, &text, request.path());
        warn!(%status, path = %request.path(), error = %error, "Request failed");
        Err(error)
    }
}

fn classify(status: StatusCode, body: &str, path: String) -> ClientError {
    if status == StatusCode::NOT_FOUND {
        return ClientError::NotFound(path);
    }
    let message = server_message(body).unwrap_or_else(|| {
        format!(
            "{} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )
    });
    match status {
        StatusCode::CONFLICT => ClientError::Conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(message)
        }
        _ => ClientError::Backend {
            status: status.as_u16(),
            message,
        },
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}
