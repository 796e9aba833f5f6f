// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod events;
pub mod fields;
pub mod info;
pub mod session;
pub mod settings;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod tickets;
pub mod users;
pub mod watch;

use std::io::Write;

use em_core::model::describe_error;
use em_core::Reply;

use crate::error::Result;

/// Print a reply as pretty JSON.
///
/// An error envelope is printed too, then reported as an error so the
/// process exits non-zero.
pub fn emit(reply: &Reply, out: &mut impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(reply.value())?;
    writeln!(out, "{json}")?;
    match reply {
        Reply::Data(_) => Ok(()),
        Reply::Failed(envelope) => Err(em_core::Error::Server(describe_error(envelope)).into()),
    }
}

#[cfg(test)]
#[path = "emit_tests.rs"]
mod tests;
