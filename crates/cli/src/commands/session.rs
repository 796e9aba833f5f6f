// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Login and logout.

use em_core::Reply;
use serde_json::json;

use crate::api::ApiClient;
use crate::error::Result;

pub async fn login(api: &ApiClient, username: &str, password: &str) -> Result<Reply> {
    let credentials = json!({ "username": username, "password": password });
    tracing::debug!(username, "logging in");
    Ok(api.users().login(credentials).await?)
}

pub async fn logout(api: &ApiClient) -> Result<Reply> {
    Ok(api.users().logout().await?)
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
