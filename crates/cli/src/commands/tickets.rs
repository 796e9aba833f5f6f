// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use em_core::Reply;

use crate::api::ApiClient;
use crate::cli::TicketsCommand;
use crate::error::Result;

use super::fields::{entity, entity_with_id};

pub async fn run(api: &ApiClient, command: TicketsCommand) -> Result<Reply> {
    let tickets = api.tickets();
    let reply = match command {
        TicketsCommand::List => tickets.all().await?,
        TicketsCommand::Show {
            event_id,
            ticket_id,
        } => tickets.get(&event_id, &ticket_id).await?,
        TicketsCommand::Add { event_id, fields } => {
            let person = entity(&fields)?;
            tickets.add(&event_id, person).await?
        }
        TicketsCommand::Update {
            event_id,
            ticket_id,
            fields,
        } => {
            let ticket = entity_with_id(&fields, &ticket_id)?;
            tickets.update(&event_id, ticket).await?
        }
        TicketsCommand::Delete {
            event_id,
            ticket_id,
        } => tickets.delete(&event_id, &ticket_id).await?,
    };
    Ok(reply)
}

#[cfg(test)]
#[path = "tickets_tests.rs"]
mod tests;
