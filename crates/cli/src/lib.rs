// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! emrs - client library for the eventman event and ticket server.
//!
//! This crate provides the functionality behind the `em` CLI tool: typed
//! access to the server's REST resources and a live-update channel for the
//! event being followed.
//!
//! # Main Components
//!
//! - [`api::ApiClient`] - Dispatches every resource operation through one
//!   code path, with a pluggable transport and failure interceptor
//! - [`updates::LiveUpdateChannel`] - Server-pushed updates for one page
//! - [`Config`] - Client configuration (API root, timeout, default page)
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use emrs::api::{ApiClient, LogInterceptor, Session};
//!
//! let api = ApiClient::new("http://localhost:5242/", None, Session::new(), Arc::new(LogInterceptor))?;
//! let events = api.events().all().await?;
//! ```

mod cli;
mod commands;
mod env;
mod notify;

pub mod api;
pub mod config;
pub mod error;
pub mod updates;

pub use cli::{
    Cli, Command, EventsCommand, FieldArgs, SettingsCommand, TicketsCommand, UsersCommand,
};
pub use config::Config;
pub use error::{Error, Result};
pub use notify::NotifyInterceptor;

use std::path::Path;
use std::sync::Arc;

use api::{ApiClient, Session};
use updates::LiveUpdateChannel;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Filter directive for the log subscriber.
///
/// `--verbose` wins, then `EM_LOG`, then `warn`.
pub fn log_directive(verbose: bool, env_filter: Option<String>) -> String {
    if verbose {
        "debug".to_string()
    } else {
        env_filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }
}

/// Install the stderr log subscriber.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let directive = log_directive(verbose, env::log_filter());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration and apply overrides, lowest precedence first.
pub fn resolve_config(
    config_path: Option<&Path>,
    env_api_root: Option<String>,
    flag_api_root: Option<String>,
) -> Result<Config> {
    let mut config = Config::discover(config_path)?;
    config.override_api_root(env_api_root);
    config.override_api_root(flag_api_root);
    config.validate()?;
    Ok(config)
}

/// Build the REST client for a configuration.
pub fn connect(config: &Config) -> Result<ApiClient> {
    let api = ApiClient::new(
        &config.api_root,
        config.timeout(),
        Session::new(),
        Arc::new(NotifyInterceptor::new()),
    )?;
    tracing::debug!(root = %api.root(), instance = %api.session().app_instance_id(), "client ready");
    Ok(api)
}

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref(), env::api_root(), cli.api)?;
    let api = || connect(&config);

    let reply = match cli.command {
        Command::Events(cmd) => commands::events::run(&api()?, cmd).await?,
        Command::Tickets(cmd) => commands::tickets::run(&api()?, cmd).await?,
        Command::Settings(cmd) => commands::settings::run(&api()?, cmd).await?,
        Command::Info => commands::info::run(&api()?).await?,
        Command::Users(cmd) => commands::users::run(&api()?, cmd).await?,
        Command::Login { username, password } => {
            commands::session::login(&api()?, &username, &password).await?
        }
        Command::Logout => commands::session::logout(&api()?).await?,
        Command::Watch { page, count } => {
            let page = page
                .or_else(|| config.page.clone())
                .ok_or(Error::FieldRequired { field: "page url" })?;
            let mut channel = LiveUpdateChannel::new();
            let mut stdout = std::io::stdout();
            commands::watch::run(&mut channel, &page, count, &mut stdout, interrupted()).await?;
            return Ok(());
        }
    };

    commands::emit(&reply, &mut std::io::stdout().lock())
}

/// Resolves on Ctrl-C. Never resolves when the signal cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
