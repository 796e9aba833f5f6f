// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for em-core operations.

use thiserror::Error;

/// All possible errors that can occur in em-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid page location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("invalid date: '{0}'\n  hint: use RFC 3339, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid app instance id: '{0}'")]
    InvalidInstanceId(String),

    #[error("server reported an error: {0}")]
    Server(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for em-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
