//! HTTP transport types and the generic request helper.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and parses `HttpResponse` values; executing the round-trip is the
//! job of a `Transport` supplied by the host. `HttpAgent` composes a base
//! URL with a transport and turns every non-2xx answer into
//! `TransportError::Status`, so the task client above it only has to know
//! its four endpoints.
//!
//! All fields use owned types (`String`, `Vec`) so values can be moved onto
//! a blocking pool or another thread without lifetime concerns.

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one request against the network. Single-shot: implementations
/// must not retry.
///
/// A non-2xx status is still a successful round-trip and must be returned as
/// an `HttpResponse`; `Err` is reserved for requests that never completed.
pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

/// Generic JSON request helper bound to one API origin.
#[derive(Debug, Clone)]
pub struct HttpAgent<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> HttpAgent<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build a request for `path` relative to the base URL. Every request
    /// declares a JSON content type, with or without a body.
    pub fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }

    /// Execute `request` and reject any non-2xx answer.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.execute(request).await?;
        debug!(method = method.as_str(), %path, status = response.status, "response received");
        check_status(&response)?;
        Ok(response)
    }
}

/// Map non-success status codes to `TransportError::Status`.
pub fn check_status(response: &HttpResponse) -> Result<(), TransportError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(TransportError::Status(response.status))
    }
}

/// Decode a JSON body, falling back to `D::default()` when the body is empty
/// or does not match the expected shape.
pub fn decode_or_default<D: DeserializeOwned + Default>(body: &str) -> D {
    if body.trim().is_empty() {
        return D::default();
    }
    match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "undecodable response body, treating as empty");
            D::default()
        }
    }
}
