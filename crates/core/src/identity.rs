// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! App instance identity.
//!
//! Each client session generates one identifier and attaches it to every
//! ticket mutation, so the server can tell which client originated a change
//! (and skip echoing it back over the live-update stream).

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Per-session client identifier. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppInstanceId(Uuid);

impl AppInstanceId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        AppInstanceId(Uuid::new_v4())
    }
}

impl Default for AppInstanceId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for AppInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for AppInstanceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(AppInstanceId)
            .map_err(|_| Error::InvalidInstanceId(s.to_string()))
    }
}
