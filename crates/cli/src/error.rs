// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::api::ApiError;
use crate::updates::ChannelError;

/// All possible errors that can occur in the emrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid field '{0}'\n  hint: fields are written as key=value, e.g. title=\"Linux Day\"")]
    InvalidField(String),

    #[error("{field} is required")]
    FieldRequired { field: &'static str },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Core(#[from] em_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for emrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
