//! Command-line interface definitions.

use clap::{Parser, Subcommand};

use crate::config::SchemeChoice;

/// Build and resolve Matrix permalinks
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Scheme used for generated links (overrides PERMALINK_SCHEME)
    #[arg(long, global = true, value_enum)]
    pub scheme: Option<SchemeChoice>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Link to a user, e.g. @alice:example.org
    #[command(visible_alias = "u")]
    User { user_id: String },

    /// Link to a room by ID (!…) or alias (#…)
    #[command(visible_alias = "r")]
    Room {
        room: String,

        /// Routing hint; repeat for several servers
        #[arg(long = "via")]
        via: Vec<String>,
    },

    /// Link to an event inside a room
    #[command(visible_alias = "e")]
    Event {
        room: String,
        event_id: String,

        /// Routing hint; repeat for several servers
        #[arg(long = "via")]
        via: Vec<String>,
    },

    /// Link to any sigiled identifier, printed after its kind and a tab
    Entity { id: String },

    /// Decode a permalink of any known scheme and print it as JSON
    #[command(visible_alias = "p")]
    Parse { link: String },

    /// Report whether a URL host belongs to a known permalink scheme
    Host { host: String },

    /// Suggest routing hints from members given as USER_ID[=POWER_LEVEL]
    Via {
        #[arg(required = true)]
        members: Vec<String>,
    },
}
