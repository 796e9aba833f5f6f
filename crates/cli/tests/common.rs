// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::net::TcpListener;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// The `em` binary with a clean environment.
pub fn em() -> Command {
    let mut cmd = cargo_bin_cmd!("em");
    cmd.env_remove("EM_API_ROOT").env_remove("EM_LOG");
    cmd
}

/// Root URL of a mock server, with the trailing slash the client expects.
pub fn api_root(server: &httpmock::MockServer) -> String {
    format!("{}/", server.base_url())
}

/// A local port nothing listens on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
