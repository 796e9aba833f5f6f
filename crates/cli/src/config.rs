// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! Configuration is stored in `.eventman/config.toml` and includes:
//! - `api_root`: Base URL every relative resource template resolves under
//! - `timeout_secs`: Per-request timeout (`0` disables it)
//! - `page`: Page location the `watch` command follows by default
//!
//! The file is optional. Missing keys take their defaults, and
//! `EM_API_ROOT` or `--api` replace `api_root` after loading.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

const CONFIG_DIR_NAME: &str = ".eventman";
const CONFIG_FILE_NAME: &str = "config.toml";

/// API root used when nothing else is configured.
pub const DEFAULT_API_ROOT: &str = "http://localhost:5242/";

/// Client configuration stored in `.eventman/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the REST API (http or https).
    #[serde(default = "default_api_root")]
    pub api_root: String,
    /// Request timeout in seconds. 0 = disabled.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page location whose live updates `watch` follows when no URL is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

fn default_api_root() -> String {
    DEFAULT_API_ROOT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_root: default_api_root(),
            timeout_secs: default_timeout_secs(),
            page: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Loads configuration from a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Loads the file at `explicit`, or the nearest `.eventman/config.toml`,
    /// or the defaults when there is none.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match find_config_file()? {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Replaces the API root when an override is present.
    pub fn override_api_root(&mut self, api_root: Option<String>) {
        if let Some(root) = api_root {
            self.api_root = root;
        }
    }

    /// Checks values that TOML typing cannot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `api_root` is not an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_root)
            .map_err(|e| Error::Config(format!("invalid api_root '{}': {}", self.api_root, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::Config(format!(
                "invalid api_root '{}': unsupported scheme '{}'\n  hint: use an http:// or https:// url",
                self.api_root, other
            ))),
        }
    }

    /// Request timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Find `.eventman/config.toml` by walking up from the current directory.
pub fn find_config_file() -> Result<Option<PathBuf>> {
    let current = std::env::current_dir()?;
    Ok(find_config_file_from(&current))
}

/// Find `.eventman/config.toml` by walking up from `start`.
pub fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
