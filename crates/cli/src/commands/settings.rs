// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use em_core::Reply;

use crate::api::ApiClient;
use crate::cli::SettingsCommand;
use crate::error::Result;

use super::fields::entity;

pub async fn run(api: &ApiClient, command: SettingsCommand) -> Result<Reply> {
    let settings = api.settings();
    let reply = match command {
        SettingsCommand::List => settings.query().await?,
        SettingsCommand::Update { fields } => settings.update(entity(&fields)?).await?,
    };
    Ok(reply)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
