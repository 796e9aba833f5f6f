// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed per-entity clients.
//!
//! `EntityClient<R>` is a thin façade over [`ApiClient::invoke`]: each method
//! names an operation from the entity's table and packs its arguments into
//! parameters and a body. No entity adds behaviour of its own.

use std::marker::PhantomData;

use em_core::Reply;
use serde_json::Value;

use super::client::{ApiClient, ApiResult};
use super::params::Params;
use super::resource::{ResourceSpec, EVENTS, INFO, SETTINGS, TICKETS, USERS};

/// Ties a marker type to its operation table.
pub trait Resource {
    fn spec() -> &'static ResourceSpec;
}

/// Events and their rosters.
pub struct Events;
/// Persons, addressed through their event.
pub struct Tickets;
/// Server-side settings.
pub struct Settings;
/// Server metadata.
pub struct Infos;
/// Application users.
pub struct Users;

impl Resource for Events {
    fn spec() -> &'static ResourceSpec {
        &EVENTS
    }
}

impl Resource for Tickets {
    fn spec() -> &'static ResourceSpec {
        &TICKETS
    }
}

impl Resource for Settings {
    fn spec() -> &'static ResourceSpec {
        &SETTINGS
    }
}

impl Resource for Infos {
    fn spec() -> &'static ResourceSpec {
        &INFO
    }
}

impl Resource for Users {
    fn spec() -> &'static ResourceSpec {
        &USERS
    }
}

/// Client for one entity.
pub struct EntityClient<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for EntityClient<R> {
    fn clone(&self) -> Self {
        EntityClient {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> EntityClient<R> {
    pub fn new(api: ApiClient) -> Self {
        EntityClient {
            api,
            _resource: PhantomData,
        }
    }

    pub fn spec(&self) -> &'static ResourceSpec {
        R::spec()
    }

    /// Run any operation of this entity by name.
    pub async fn call(
        &self,
        operation: &str,
        params: Params,
        body: Option<Value>,
    ) -> ApiResult<Reply> {
        self.api.invoke(R::spec(), operation, params, body).await
    }
}

fn id(key: &str, value: &str) -> Params {
    Params::new().with(key, value)
}

impl EntityClient<Events> {
    /// All events, dates normalized.
    pub async fn all(&self) -> ApiResult<Reply> {
        self.call("all", Params::new(), None).await
    }

    /// One event with its roster.
    pub async fn get(&self, event_id: &str) -> ApiResult<Reply> {
        self.call("get", id("id", event_id), None).await
    }

    /// Save an event. The identifier comes from its `_id`.
    pub async fn update(&self, event: Value) -> ApiResult<Reply> {
        self.call("update", Params::new(), Some(event)).await
    }

    /// Persons of an event, as the server grouped them.
    pub async fn group_persons(&self, event_id: &str) -> ApiResult<Reply> {
        self.call("group_persons", id("id", event_id), None).await
    }
}

impl EntityClient<Tickets> {
    pub async fn get(&self, event_id: &str, ticket_id: &str) -> ApiResult<Reply> {
        let params = id("event_id", event_id).with("ticket_id", ticket_id);
        self.call("get", params, None).await
    }

    /// Tickets across every event.
    pub async fn all(&self) -> ApiResult<Reply> {
        self.call("all", Params::new(), None).await
    }

    pub async fn add(&self, event_id: &str, person: Value) -> ApiResult<Reply> {
        self.call("add", id("event_id", event_id), Some(person)).await
    }

    /// Save a ticket. The ticket identifier comes from its `_id`.
    pub async fn update(&self, event_id: &str, ticket: Value) -> ApiResult<Reply> {
        self.call("update", id("event_id", event_id), Some(ticket)).await
    }

    pub async fn delete(&self, event_id: &str, ticket_id: &str) -> ApiResult<Reply> {
        let params = id("event_id", event_id).with("ticket_id", ticket_id);
        self.call("delete", params, None).await
    }
}

impl EntityClient<Settings> {
    pub async fn query(&self) -> ApiResult<Reply> {
        self.call("query", Params::new(), None).await
    }

    pub async fn update(&self, setting: Value) -> ApiResult<Reply> {
        self.call("update", Params::new(), Some(setting)).await
    }
}

impl EntityClient<Infos> {
    /// Server metadata, `{}` when the server has none.
    pub async fn get(&self) -> ApiResult<Reply> {
        self.call("get", Params::new(), None).await
    }
}

impl EntityClient<Users> {
    pub async fn all(&self) -> ApiResult<Reply> {
        self.call("all", Params::new(), None).await
    }

    pub async fn get(&self, user_id: &str) -> ApiResult<Reply> {
        self.call("get", id("id", user_id), None).await
    }

    pub async fn add(&self, user: Value) -> ApiResult<Reply> {
        self.call("add", Params::new(), Some(user)).await
    }

    pub async fn update(&self, user: Value) -> ApiResult<Reply> {
        self.call("update", Params::new(), Some(user)).await
    }

    pub async fn login(&self, credentials: Value) -> ApiResult<Reply> {
        self.call("login", Params::new(), Some(credentials)).await
    }

    pub async fn logout(&self) -> ApiResult<Reply> {
        self.call("logout", Params::new(), None).await
    }
}
