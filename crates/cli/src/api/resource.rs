// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative operation tables for every backend entity.
//!
//! Each entity is a [`ResourceSpec`]: a base URL template, parameter defaults
//! and an ordered table of [`Operation`]s. The tables are plain data; the
//! dispatcher in [`super::client`] is the only code that interprets them.

use em_core::Normalizer;

/// HTTP verbs used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the entity being acted on is sent as the request body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter's default value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// A field of the entity being acted on (`@_id`). Callers may override it.
    Entity(&'static str),
    /// The session's app instance identifier. Always attached, never overridden.
    AppInstance,
}

/// A parameter default.
pub type ParamDefault = (&'static str, ParamSource);

/// One named operation on an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub method: HttpMethod,
    /// Overrides the resource's base URL.
    pub url: Option<&'static str>,
    /// Extra defaults, layered over the resource's.
    pub params: &'static [ParamDefault],
    pub normalizer: Normalizer,
}

impl Operation {
    const fn new(name: &'static str, method: HttpMethod, normalizer: Normalizer) -> Self {
        Operation {
            name,
            method,
            url: None,
            params: &[],
            normalizer,
        }
    }

    const fn at(mut self, url: &'static str) -> Self {
        self.url = Some(url);
        self
    }

    const fn params(mut self, params: &'static [ParamDefault]) -> Self {
        self.params = params;
        self
    }
}

/// Everything the client knows about one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    pub name: &'static str,
    pub url: &'static str,
    pub defaults: &'static [ParamDefault],
    pub operations: &'static [Operation],
}

impl ResourceSpec {
    pub fn operation(&self, name: &str) -> Option<&'static Operation> {
        self.operations.iter().find(|op| op.name == name)
    }

    /// URL template used by an operation.
    pub fn url_for(&self, op: &Operation) -> &'static str {
        op.url.unwrap_or(self.url)
    }

    /// Defaults for an operation, resource defaults first. An operation
    /// default replaces a resource default of the same name in place.
    pub fn defaults_for(&self, op: &Operation) -> Vec<ParamDefault> {
        let mut merged: Vec<ParamDefault> = self.defaults.to_vec();
        for &(key, source) in op.params {
            match merged.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = source,
                None => merged.push((key, source)),
            }
        }
        merged
    }
}

use HttpMethod::{Delete, Get, Post, Put};

const APP_INSTANCE: &[ParamDefault] = &[("uuid", ParamSource::AppInstance)];

pub static EVENTS: ResourceSpec = ResourceSpec {
    name: "event",
    url: "events/:id",
    defaults: &[("id", ParamSource::Entity("_id"))],
    operations: &[
        Operation::new("all", Get, Normalizer::EventList),
        Operation::new("get", Get, Normalizer::SingleEvent),
        Operation::new("update", Put, Normalizer::Identity),
        Operation::new("group_persons", Get, Normalizer::GroupedPersons)
            .at("events/:id/group_persons"),
    ],
};

pub static TICKETS: ResourceSpec = ResourceSpec {
    name: "ticket",
    url: "events/:event_id/tickets",
    defaults: &[
        ("event_id", ParamSource::Entity("event_id")),
        ("ticket_id", ParamSource::Entity("_id")),
    ],
    operations: &[
        Operation::new("get", Get, Normalizer::Entity("person"))
            .at("events/:event_id/tickets/:ticket_id"),
        Operation::new("all", Get, Normalizer::TicketList).at("/tickets"),
        Operation::new("add", Post, Normalizer::Entity("person"))
            .at("events/:event_id/tickets")
            .params(APP_INSTANCE),
        Operation::new("update", Put, Normalizer::Identity)
            .at("events/:event_id/tickets/:ticket_id")
            .params(APP_INSTANCE),
        Operation::new("delete", Delete, Normalizer::Identity)
            .at("events/:event_id/tickets/:ticket_id")
            .params(APP_INSTANCE),
    ],
};

pub static SETTINGS: ResourceSpec = ResourceSpec {
    name: "setting",
    url: "settings/",
    defaults: &[],
    operations: &[
        Operation::new("query", Get, Normalizer::List("settings")),
        Operation::new("update", Put, Normalizer::Identity),
    ],
};

pub static INFO: ResourceSpec = ResourceSpec {
    name: "info",
    url: "info/",
    defaults: &[],
    operations: &[Operation::new("get", Get, Normalizer::Singleton("info"))],
};

pub static USERS: ResourceSpec = ResourceSpec {
    name: "user",
    url: "users/:id",
    defaults: &[("id", ParamSource::Entity("_id"))],
    operations: &[
        Operation::new("all", Get, Normalizer::List("users")),
        Operation::new("get", Get, Normalizer::Identity),
        Operation::new("add", Post, Normalizer::Identity),
        Operation::new("update", Put, Normalizer::Identity),
        Operation::new("login", Post, Normalizer::Identity).at("/login"),
        Operation::new("logout", Get, Normalizer::Identity).at("/logout"),
    ],
};

/// Every entity the backend exposes.
pub static REGISTRY: [&ResourceSpec; 5] = [&EVENTS, &TICKETS, &SETTINGS, &INFO, &USERS];

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
