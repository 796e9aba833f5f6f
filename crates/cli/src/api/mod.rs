// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resource access for the eventman REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ EntityClient │────►│  ApiClient  │────►│  Transport  │────► server
//! │  (per type)  │◄────│ (dispatch)  │◄────│   (trait)   │◄────
//! └──────────────┘     └─────────────┘     └─────────────┘
//!                        │        │
//!                        ▼        ▼
//!               ┌────────────┐  ┌─────────────┐
//!               │ Normalizer │  │ Interceptor │  (failures only)
//!               └────────────┘  └─────────────┘
//! ```
//!
//! Operations are described by static tables in [`resource`]; nothing is
//! entity-specific past those tables.

mod client;
mod entities;
mod interceptor;
mod params;
pub mod resource;
mod template;
mod transport;

pub use client::{ApiClient, ApiError, ApiResult, Session};
pub use entities::{EntityClient, Events, Infos, Resource, Settings, Tickets, Users};
pub use interceptor::{ErrorInterceptor, FailureKind, FnInterceptor, LogInterceptor, RequestFailure};
pub use params::Params;
pub use resource::{HttpMethod, Operation, ParamSource, ResourceSpec};
pub use template::{Expanded, UrlTemplate};
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError, TransportResult,
};

#[cfg(test)]
mod client_tests;
