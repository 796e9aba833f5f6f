// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Follow the live updates of a page.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use crate::error::Result;
use crate::updates::{ChannelState, LiveUpdateChannel};

/// How often a quiet stream is checked for a server hang-up.
const STATE_POLL: Duration = Duration::from_millis(250);

/// Why watching stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The requested number of updates was printed.
    Count,
    /// The server closed the stream.
    Closed,
    /// The shutdown future resolved (Ctrl-C).
    Interrupted,
}

/// Print each update for `page` as one JSON line until `count` updates were
/// seen, the server hangs up, or `shutdown` resolves. The channel is closed
/// on every path.
pub async fn run(
    channel: &mut LiveUpdateChannel,
    page: &str,
    count: Option<usize>,
    out: &mut impl Write,
    shutdown: impl Future<Output = ()>,
) -> Result<StopReason> {
    let mut updates = channel.subscribe();
    let _ = updates.borrow_and_update();
    channel.open_page(page).await?;
    tracing::debug!(endpoint = ?channel.endpoint(), "watching");

    let reason = watch_loop(channel, &mut updates, count, out, shutdown).await;
    channel.close().await?;
    reason
}

async fn watch_loop(
    channel: &LiveUpdateChannel,
    updates: &mut tokio::sync::watch::Receiver<Option<em_core::UpdateMessage>>,
    count: Option<usize>,
    out: &mut impl Write,
    shutdown: impl Future<Output = ()>,
) -> Result<StopReason> {
    if count == Some(0) {
        return Ok(StopReason::Count);
    }
    tokio::pin!(shutdown);
    let mut poll = tokio::time::interval(STATE_POLL);
    let mut seen = 0;

    loop {
        tokio::select! {
            biased;
            changed = updates.changed() => {
                if changed.is_err() {
                    return Ok(StopReason::Closed);
                }
                let latest = updates.borrow_and_update().clone();
                if let Some(message) = latest {
                    writeln!(out, "{}", message.to_json()?)?;
                    out.flush()?;
                    seen += 1;
                    if count.is_some_and(|n| seen >= n) {
                        return Ok(StopReason::Count);
                    }
                }
            }
            _ = poll.tick() => {
                if channel.state() == ChannelState::Closed {
                    return Ok(StopReason::Closed);
                }
            }
            _ = &mut shutdown => return Ok(StopReason::Interrupted),
        }
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
