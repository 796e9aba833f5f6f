// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server-pushed updates for the event being viewed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  open/close  ┌─────────────┐
//! │ LiveUpdateChannel│─────────────►│  Connector  │────► {ws|wss}://host:port/ws/<path>/updates
//! └──────────────────┘              │   (trait)   │
//!        ▲                          └─────────────┘
//!        │ latest()                        │
//! ┌──────────────────┐   text frames  ┌─────────────┐
//! │   watch cell     │◄───────────────│ reader task │
//! └──────────────────┘                └─────────────┘
//! ```
//!
//! There is no reconnect: a dropped connection stays closed until the next
//! `open`.

mod channel;
mod transport;

pub use channel::{ChannelError, ChannelResult, ChannelState, LiveUpdateChannel};
pub use transport::{
    TransportError, TransportResult, UpdateConnector, UpdateStream, WebSocketConnector,
};

#[cfg(test)]
pub(crate) mod test_helpers;


#[cfg(test)]
mod transport_tests;
