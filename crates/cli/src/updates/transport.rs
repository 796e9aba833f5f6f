// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for the live-update stream.
//!
//! Provides a trait-based transport layer that enables:
//! - Real WebSocket connections for production
//! - Mock connectors for unit testing
//!
//! The stream is receive-only: the client never writes to it.

use std::future::Future;
use std::pin::Pin;

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

/// Error type for transport operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Receive failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// Close handshake failed.
    #[error("close failed: {0}")]
    CloseFailed(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// An open update stream.
pub trait UpdateStream: Send {
    /// Receive the next text frame.
    ///
    /// Returns `None` once the server has closed the stream. Control and
    /// binary frames are skipped.
    fn next_text(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Option<String>>> + Send + '_>>;

    /// Close the stream.
    fn close(&mut self) -> Pin<Box<dyn Future<Output = TransportResult<()>> + Send + '_>>;
}

/// Opens update streams.
pub trait UpdateConnector: Send + Sync {
    fn connect<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Box<dyn UpdateStream>>> + Send + 'a>>;
}

/// WebSocket connector using tokio-tungstenite.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketConnector;

impl WebSocketConnector {
    pub fn new() -> Self {
        WebSocketConnector
    }
}

impl UpdateConnector for WebSocketConnector {
    fn connect<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Box<dyn UpdateStream>>> + Send + 'a>> {
        Box::pin(async move {
            let (ws, _) = tokio_tungstenite::connect_async(url)
                .await
                .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
            let stream: Box<dyn UpdateStream> = Box::new(WebSocketUpdates { ws: Some(ws) });
            Ok(stream)
        })
    }
}

/// A live WebSocket update stream.
struct WebSocketUpdates {
    /// Cleared once the connection is gone.
    ws: Option<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl UpdateStream for WebSocketUpdates {
    fn next_text(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Option<String>>> + Send + '_>> {
        Box::pin(async move {
            let Some(ws) = self.ws.as_mut() else {
                return Ok(None);
            };

            loop {
                match ws.next().await {
                    Some(Ok(Message::Text(text))) => return Ok(Some(text.as_str().to_owned())),
                    Some(Ok(Message::Close(_))) | None => {
                        self.ws = None;
                        return Ok(None);
                    }
                    // Ping/pong are answered by tungstenite; binary frames are not updates
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        self.ws = None;
                        return Err(TransportError::ReceiveFailed(e.to_string()));
                    }
                }
            }
        })
    }

    fn close(&mut self) -> Pin<Box<dyn Future<Output = TransportResult<()>> + Send + '_>> {
        Box::pin(async move {
            if let Some(mut ws) = self.ws.take() {
                ws.close(None)
                    .await
                    .map_err(|e| TransportError::CloseFailed(e.to_string()))?;
            }
            Ok(())
        })
    }
}
