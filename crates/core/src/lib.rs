// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! em-core: Shared library for the eventman client
//!
//! This crate provides the domain views, response normalization, and
//! live-update primitives used by the `em` data-access layer and CLI.

pub mod error;
pub mod identity;
pub mod location;
pub mod model;
pub mod normalize;
pub mod protocol;

pub use error::{Error, Result};
pub use identity::AppInstanceId;
pub use location::PageLocation;
pub use model::{Event, Info, Person, Reply, Setting, Ticket, User};
pub use normalize::Normalizer;
pub use protocol::UpdateMessage;
