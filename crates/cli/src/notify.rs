// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing failure notices.
//!
//! The CLI's request interceptor. Every failed request produces a notice on
//! stderr; authorization failures also point the user at `em login`.

use std::io::Write;
use std::sync::Mutex;

use crate::api::{ErrorInterceptor, FailureKind, RequestFailure};

/// Text shown for a failed request.
pub fn notice(failure: &RequestFailure) -> String {
    let mut text = format!("notice: {}", failure);
    if failure.is_unauthorized() {
        text.push_str("\n  hint: you are not logged in, run 'em login <username> --password <password>'");
    } else if matches!(failure.kind, FailureKind::Network(_) | FailureKind::Timeout) {
        text.push_str("\n  hint: check that the server is running and --api points at it");
    }
    text
}

/// Writes a [`notice`] for every failure.
pub struct NotifyInterceptor {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl NotifyInterceptor {
    /// Notices go to stderr.
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    pub fn with_writer(sink: Box<dyn Write + Send>) -> Self {
        NotifyInterceptor {
            sink: Mutex::new(sink),
        }
    }
}

impl Default for NotifyInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorInterceptor for NotifyInterceptor {
    fn on_failure(&self, failure: &RequestFailure) {
        tracing::debug!(url = %failure.url, status = ?failure.status(), "request failed");
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        // Write errors are ignored.
        let _ = writeln!(sink, "{}", notice(failure));
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
