// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// Custom help template that groups commands into sections
const HELP_TEMPLATE: &str = "{about-with-newline}
{usage-heading} {usage}

{before-help}Options:
{options}{after-help}";

const COMMANDS_HELP: &str = "\
Events & Tickets:
  events      List, show and update events
  tickets     Manage the tickets of an event
  watch       Follow live updates for a page

Administration:
  settings    Show and update server settings
  users       Manage application users
  info        Show server information
  login       Log in
  logout      Log out";

const QUICKSTART_HELP: &str = "\
Get started:
  em info                             Check the server is reachable
  em events list                      List all events
  em tickets add <event> name=Ann     Register a person
  em watch http://host/events/<id>    Follow an event live";

#[derive(Parser)]
#[command(name = "em")]
#[command(about = "Command-line client for the eventman event and ticket server")]
#[command(help_template = HELP_TEMPLATE)]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// API root URL (overrides the config file and EM_API_ROOT)
    #[arg(long, global = true, value_name = "URL")]
    pub api: Option<String>,

    /// Path to a config file (default: nearest .eventman/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log requests and stream activity to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List, show and update events
    #[command(subcommand)]
    Events(EventsCommand),

    /// Manage the tickets of an event
    #[command(subcommand)]
    Tickets(TicketsCommand),

    /// Show and update server settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Show server information
    Info,

    /// Manage application users
    #[command(subcommand)]
    Users(UsersCommand),

    /// Log in
    #[command(after_help = "Examples:\n  \
        em login admin --password secret")]
    Login {
        /// Username
        username: String,

        /// Password
        #[arg(long, short)]
        password: String,
    },

    /// Log out
    Logout,

    /// Follow live updates for a page
    #[command(after_help = "Examples:\n  \
        em watch http://localhost:5242/events/5e1f   Print each update as it arrives\n  \
        em watch --count 1                           Wait for one update on the configured page")]
    Watch {
        /// Page URL (default: `page` from the config file)
        page: Option<String>,

        /// Stop after this many updates
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },
}

/// Entity fields given on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Fields as key=value (string) or key:=value (raw JSON)
    #[arg(value_name = "FIELD")]
    pub fields: Vec<String>,

    /// Fields as a JSON object, merged before key=value fields
    #[arg(long, value_name = "OBJECT")]
    pub json: Option<String>,
}

/// Event commands.
#[derive(Subcommand)]
pub enum EventsCommand {
    /// List all events
    List,

    /// Show an event and its roster
    Show {
        /// Event ID
        id: String,
    },

    /// Update an event
    #[command(
        arg_required_else_help = true,
        after_help = "Examples:\n  \
        em events update 5e1f title=\"Linux Day\"\n  \
        em events update 5e1f begin-date=2015-04-25T10:00:00Z"
    )]
    Update {
        /// Event ID
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// List the persons of an event as the server groups them
    Persons {
        /// Event ID
        id: String,
    },
}

/// Ticket commands.
#[derive(Subcommand)]
pub enum TicketsCommand {
    /// List tickets across all events
    List,

    /// Show a ticket
    Show {
        /// Event ID
        event_id: String,
        /// Ticket ID
        ticket_id: String,
    },

    /// Register a person for an event
    #[command(after_help = "Examples:\n  \
        em tickets add 5e1f name=Ann email=ann@example.org")]
    Add {
        /// Event ID
        event_id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Update a ticket
    Update {
        /// Event ID
        event_id: String,
        /// Ticket ID
        ticket_id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a ticket
    Delete {
        /// Event ID
        event_id: String,
        /// Ticket ID
        ticket_id: String,
    },
}

/// Settings commands.
#[derive(Subcommand)]
pub enum SettingsCommand {
    /// List settings
    List,

    /// Update settings
    Update {
        #[command(flatten)]
        fields: FieldArgs,
    },
}

/// User commands.
#[derive(Subcommand)]
pub enum UsersCommand {
    /// List users
    List,

    /// Show a user
    Show {
        /// User ID
        id: String,
    },

    /// Create a user
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Update a user
    Update {
        /// User ID
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },
}

#[cfg(test)]
#[path = "cli_tests/mod.rs"]
mod tests;
