// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use em_core::Reply;

use crate::api::ApiClient;
use crate::error::Result;

pub async fn run(api: &ApiClient) -> Result<Reply> {
    Ok(api.info().get().await?)
}

#[cfg(test)]
#[path = "info_tests.rs"]
mod tests;
