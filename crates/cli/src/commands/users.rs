// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use em_core::Reply;

use crate::api::ApiClient;
use crate::cli::UsersCommand;
use crate::error::Result;

use super::fields::{entity, entity_with_id};

pub async fn run(api: &ApiClient, command: UsersCommand) -> Result<Reply> {
    let users = api.users();
    let reply = match command {
        UsersCommand::List => users.all().await?,
        UsersCommand::Show { id } => users.get(&id).await?,
        UsersCommand::Add { fields } => users.add(entity(&fields)?).await?,
        UsersCommand::Update { id, fields } => users.update(entity_with_id(&fields, &id)?).await?,
    };
    Ok(reply)
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
