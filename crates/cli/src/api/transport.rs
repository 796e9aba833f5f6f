// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for HTTP exchanges.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests through reqwest for production
//! - Mock transports for unit testing

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use super::resource::HttpMethod;

/// Error type for transport operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client could not be built.
    #[error("transport setup failed: {0}")]
    Setup(String),

    /// The request never produced a response.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request took longer than the configured timeout.
    #[error("request timed out")]
    Timeout,
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub body: Option<Value>,
}

/// A response, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport trait for request/response exchanges.
///
/// Non-2xx statuses are responses, not errors; only failures to obtain a
/// response at all are reported as [`TransportError`].
pub trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<HttpResponse>> + Send + 'a>>;
}

/// HTTP transport implementation using reqwest.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new transport. `None` disables the request timeout.
    pub fn new(timeout: Option<Duration>) -> TransportResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        Ok(ReqwestTransport { client })
    }

    fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::ConnectionFailed(err.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<HttpResponse>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), request.url.clone());
            if let Some(ref body) = request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(map_reqwest_error)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(map_reqwest_error)?;
            Ok(HttpResponse { status, body })
        })
    }
}
