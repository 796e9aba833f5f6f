// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Page locations and the live-update endpoints derived from them.
//!
//! The live-update stream for an event lives next to the page that shows it:
//! viewing `https://host/events/42` streams from
//! `wss://host:443/ws/events/42/updates`.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{Error, Result};

/// Resource segment appended to the page path.
const UPDATES_SEGMENT: &str = "updates";
/// Prefix under which the server mounts its WebSocket handlers.
const WS_PREFIX: &str = "ws";

/// Where the application currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    secure: bool,
    host: String,
    port: u16,
    path: String,
}

impl PageLocation {
    /// Builds a location from its parts.
    pub fn new(secure: bool, host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        PageLocation {
            secure,
            host: host.into(),
            port,
            path: path.into(),
        }
    }

    /// Parses an `http` or `https` page URL.
    pub fn parse(location: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidLocation {
            location: location.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(location).map_err(|e| invalid(&e.to_string()))?;
        let secure = match url.scheme() {
            "https" => true,
            "http" => false,
            _ => return Err(invalid("unsupported scheme, expected http or https")),
        };
        let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| invalid("missing port"))?;

        Ok(PageLocation::new(secure, host, port, url.path()))
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The stream scheme matching the page's security level.
    pub fn stream_scheme(&self) -> &'static str {
        if self.secure {
            "wss"
        } else {
            "ws"
        }
    }

    /// The live-update endpoint for the resource at this path.
    pub fn updates_url(&self) -> String {
        let path = self.path.trim_matches('/');
        let mut url = format!(
            "{}://{}:{}/{}/",
            self.stream_scheme(),
            self.host,
            self.port,
            WS_PREFIX
        );
        if !path.is_empty() {
            url.push_str(path);
            url.push('/');
        }
        url.push_str(UPDATES_SEGMENT);
        url
    }
}

impl FromStr for PageLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PageLocation::parse(s)
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = if self.secure { "https" } else { "http" };
        write!(f, "{}://{}:{}{}", scheme, self.host, self.port, self.path)
    }
}

#[cfg(test)]
#[path = "location_tests.rs"]
mod tests;
