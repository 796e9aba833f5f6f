// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The single failure policy shared by every operation.
//!
//! Whatever entity or operation failed, the dispatcher hands the interceptor
//! the same [`RequestFailure`] and then returns it to the caller as an error.
//! An interceptor only produces side effects (notify, redirect, log); it can
//! not turn a failure into a success.

use std::fmt;

use super::resource::HttpMethod;

/// Why a request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// No response was received.
    Network(String),
    /// The configured timeout expired.
    Timeout,
    /// The server answered with a non-2xx status.
    Status(u16),
    /// A 2xx body that is not JSON.
    Decode(String),
}

/// A failed request, as seen by the interceptor and the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub method: HttpMethod,
    pub url: String,
    pub kind: FailureKind,
    /// Response body, when there was a response.
    pub body: Option<String>,
}

impl RequestFailure {
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            FailureKind::Status(status) => Some(status),
            _ => None,
        }
    }

    /// True for 401 and 403 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: ", self.method, self.url)?;
        match &self.kind {
            FailureKind::Network(reason) => write!(f, "{}", reason),
            FailureKind::Timeout => write!(f, "timed out"),
            FailureKind::Status(status) => write!(f, "server returned {}", status),
            FailureKind::Decode(reason) => write!(f, "invalid response body: {}", reason),
        }
    }
}

/// Hook run on every failed request.
pub trait ErrorInterceptor: Send + Sync {
    fn on_failure(&self, failure: &RequestFailure);
}

/// Logs failures through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogInterceptor;

impl ErrorInterceptor for LogInterceptor {
    fn on_failure(&self, failure: &RequestFailure) {
        tracing::warn!(
            method = %failure.method,
            url = %failure.url,
            status = ?failure.status(),
            "request failed: {}",
            failure
        );
    }
}

/// Adapts a closure into an interceptor.
pub struct FnInterceptor<F>(F);

impl<F> FnInterceptor<F>
where
    F: Fn(&RequestFailure) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        FnInterceptor(f)
    }
}

impl<F> ErrorInterceptor for FnInterceptor<F>
where
    F: Fn(&RequestFailure) + Send + Sync,
{
    fn on_failure(&self, failure: &RequestFailure) {
        (self.0)(failure)
    }
}
