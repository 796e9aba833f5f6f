// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for live-update tests.

#![allow(clippy::unwrap_used)]

use super::transport::{TransportError, TransportResult, UpdateConnector, UpdateStream};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Connector whose streams are fed by the test.
#[derive(Clone, Default)]
pub struct MockConnector {
    /// "connect <url>" / "close <url>" in the order they happened.
    log: Arc<Mutex<Vec<String>>>,
    /// Frame senders, one per successful connection.
    feeds: Arc<Mutex<Vec<mpsc::UnboundedSender<String>>>>,
    fail_next: Arc<Mutex<bool>>,
}

impl MockConnector {
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// Push a text frame to the most recent connection.
    pub fn push(&self, frame: &str) {
        let feeds = self.feeds.lock().unwrap();
        feeds.last().unwrap().send(frame.to_string()).unwrap();
    }

    /// Simulate the server hanging up on the most recent connection.
    pub fn hang_up(&self) {
        self.feeds.lock().unwrap().pop();
    }

    pub fn fail_next_connect(&self) {
        *self.fail_next.lock().unwrap() = true;
    }
}

struct MockStream {
    url: String,
    frames: mpsc::UnboundedReceiver<String>,
    log: Arc<Mutex<Vec<String>>>,
}

impl UpdateStream for MockStream {
    fn next_text(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Option<String>>> + Send + '_>> {
        Box::pin(async move { Ok(self.frames.recv().await) })
    }

    fn close(&mut self) -> Pin<Box<dyn Future<Output = TransportResult<()>> + Send + '_>> {
        Box::pin(async move {
            // Give a pending open the chance to run ahead if close were not awaited.
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.log.lock().unwrap().push(format!("close {}", self.url));
            Ok(())
        })
    }
}

impl UpdateConnector for MockConnector {
    fn connect<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Box<dyn UpdateStream>>> + Send + 'a>> {
        Box::pin(async move {
            if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
                return Err(TransportError::ConnectionFailed("mock failure".into()));
            }
            self.log.lock().unwrap().push(format!("connect {}", url));
            let (tx, rx) = mpsc::unbounded_channel();
            self.feeds.lock().unwrap().push(tx);
            let stream: Box<dyn UpdateStream> = Box::new(MockStream {
                url: url.to_string(),
                frames: rx,
                log: Arc::clone(&self.log),
            });
            Ok(stream)
        })
    }
}
