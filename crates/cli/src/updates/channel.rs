// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Live-update channel for the event being viewed.
//!
//! The channel owns at most one connection: a reader task plus the sender
//! half of its shutdown signal. Messages land in a `watch` cell, so readers
//! only ever see the most recent one.

use std::sync::Arc;

use em_core::{PageLocation, UpdateMessage};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use super::transport::{TransportError, UpdateConnector, UpdateStream, WebSocketConnector};

/// Error type for channel operations.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("update stream error: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Location(#[from] em_core::Error),
}

/// Result type for channel operations.
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Connection state of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Closed,
    Open,
}

struct ActiveConnection {
    endpoint: String,
    shutdown: oneshot::Sender<()>,
    reader: JoinHandle<()>,
}

/// Receives server-pushed updates over a single connection.
pub struct LiveUpdateChannel {
    connector: Arc<dyn UpdateConnector>,
    active: Option<ActiveConnection>,
    latest: Arc<watch::Sender<Option<UpdateMessage>>>,
}

impl LiveUpdateChannel {
    /// Create a closed channel backed by WebSockets.
    pub fn new() -> Self {
        Self::with_connector(Arc::new(WebSocketConnector::new()))
    }

    /// Create a closed channel with a custom connector (for testing).
    pub fn with_connector(connector: Arc<dyn UpdateConnector>) -> Self {
        let (latest, _) = watch::channel(None);
        LiveUpdateChannel {
            connector,
            active: None,
            latest: Arc::new(latest),
        }
    }

    /// Current connection state. A connection the server dropped is `Closed`.
    pub fn state(&self) -> ChannelState {
        match &self.active {
            Some(active) if !active.reader.is_finished() => ChannelState::Open,
            _ => ChannelState::Closed,
        }
    }

    /// URL of the connection while it is open.
    pub fn endpoint(&self) -> Option<&str> {
        self.active
            .as_ref()
            .filter(|active| !active.reader.is_finished())
            .map(|active| active.endpoint.as_str())
    }

    /// The most recent message, `None` until one arrives.
    pub fn latest(&self) -> Option<UpdateMessage> {
        self.latest.borrow().clone()
    }

    /// Watch for new messages.
    pub fn subscribe(&self) -> watch::Receiver<Option<UpdateMessage>> {
        self.latest.subscribe()
    }

    /// Open the stream for a page location.
    ///
    /// Any previous connection is closed first, and its close has completed
    /// by the time the new connection is attempted.
    pub async fn open(&mut self, location: &PageLocation) -> ChannelResult<()> {
        self.close().await?;

        let endpoint = location.updates_url();
        tracing::debug!(endpoint = %endpoint, "opening update stream");
        let stream = self.connector.connect(&endpoint).await?;

        let (shutdown, shutdown_rx) = oneshot::channel();
        let reader = tokio::spawn(read_updates(
            endpoint.clone(),
            stream,
            Arc::clone(&self.latest),
            shutdown_rx,
        ));
        self.active = Some(ActiveConnection {
            endpoint,
            shutdown,
            reader,
        });
        Ok(())
    }

    /// Parse a page URL and open its stream.
    pub async fn open_page(&mut self, page: &str) -> ChannelResult<()> {
        let location = PageLocation::parse(page)?;
        self.open(&location).await
    }

    /// Close the active connection. Closing a closed channel does nothing.
    pub async fn close(&mut self) -> ChannelResult<()> {
        let Some(active) = self.active.take() else {
            return Ok(());
        };
        tracing::debug!(endpoint = %active.endpoint, "closing update stream");

        // The reader may already be gone if the server hung up.
        let _ = active.shutdown.send(());
        if let Err(e) = active.reader.await {
            tracing::warn!(endpoint = %active.endpoint, error = %e, "update reader failed");
        }
        Ok(())
    }
}

impl Default for LiveUpdateChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LiveUpdateChannel {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.reader.abort();
        }
    }
}

/// Reader task: one frame at a time, in arrival order.
async fn read_updates(
    endpoint: String,
    mut stream: Box<dyn UpdateStream>,
    latest: Arc<watch::Sender<Option<UpdateMessage>>>,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                if let Err(e) = stream.close().await {
                    tracing::warn!(endpoint = %endpoint, error = %e, "update stream close failed");
                }
                return;
            }
            frame = stream.next_text() => match frame {
                Ok(Some(text)) => match UpdateMessage::decode(&text) {
                    Ok(message) => {
                        tracing::debug!(endpoint = %endpoint, "update received");
                        latest.send_replace(Some(message));
                    }
                    Err(e) => {
                        tracing::warn!(endpoint = %endpoint, error = %e, "discarding malformed update");
                    }
                },
                Ok(None) => {
                    tracing::debug!(endpoint = %endpoint, "update stream closed by server");
                    return;
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint, error = %e, "update stream failed");
                    return;
                }
            },
        }
    }
}
