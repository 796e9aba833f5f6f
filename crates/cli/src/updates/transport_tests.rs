// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the transport module.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::transport::{TransportError, UpdateConnector, WebSocketConnector};

#[test]
fn test_transport_error_display() {
    assert_eq!(
        TransportError::ConnectionFailed("refused".into()).to_string(),
        "connection failed: refused"
    );
    assert_eq!(
        TransportError::ReceiveFailed("reset".into()).to_string(),
        "receive failed: reset"
    );
    assert_eq!(
        TransportError::CloseFailed("gone".into()).to_string(),
        "close failed: gone"
    );
}

#[tokio::test]
async fn test_websocket_connect_refused() {
    let connector = WebSocketConnector::new();
    // Port 9 (discard) is not served on test machines.
    let result = connector.connect("ws://127.0.0.1:9/ws/updates").await;
    assert!(matches!(result, Err(TransportError::ConnectionFailed(_))));
}

#[tokio::test]
async fn test_websocket_rejects_non_websocket_url() {
    let connector = WebSocketConnector::new();
    let result = connector.connect("http://127.0.0.1:9/ws/updates").await;
    assert!(matches!(result, Err(TransportError::ConnectionFailed(_))));
}
