// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use em_core::Reply;

use crate::api::ApiClient;
use crate::cli::EventsCommand;
use crate::error::Result;

use super::fields::entity_with_id;

pub async fn run(api: &ApiClient, command: EventsCommand) -> Result<Reply> {
    let events = api.events();
    let reply = match command {
        EventsCommand::List => events.all().await?,
        EventsCommand::Show { id } => events.get(&id).await?,
        EventsCommand::Update { id, fields } => {
            let event = entity_with_id(&fields, &id)?;
            events.update(event).await?
        }
        EventsCommand::Persons { id } => events.group_persons(&id).await?,
    };
    Ok(reply)
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
