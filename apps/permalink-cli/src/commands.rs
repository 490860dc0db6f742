//! Subcommand execution. Every command produces the text printed to stdout.

use permalink_core::{
    EntityReference, MatrixSchemePermalinkConstructor, MatrixToPermalinkConstructor,
    PermalinkConstructor, PermalinkError, PermalinkResolver, RoomMember, pick_server_candidates,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    cli::Commands,
    config::{CliConfig, SchemeChoice},
};

/// Errors surfaced by a single CLI invocation.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Permalink(#[from] PermalinkError),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("invalid member '{member}': {reason}")]
    InvalidMember { member: String, reason: String },
}

fn constructor_for(scheme: SchemeChoice, config: &CliConfig) -> Box<dyn PermalinkConstructor> {
    match scheme {
        SchemeChoice::Matrix => Box::new(MatrixSchemePermalinkConstructor::new()),
        SchemeChoice::MatrixTo => Box::new(MatrixToPermalinkConstructor::with_base_url(
            &config.matrix_to_base,
        )),
    }
}

fn resolver_for(config: &CliConfig) -> PermalinkResolver {
    PermalinkResolver::new(vec![
        Box::new(MatrixToPermalinkConstructor::with_base_url(
            &config.matrix_to_base,
        )),
        Box::new(MatrixSchemePermalinkConstructor::new()),
    ])
}

/// Parse `@user:server[=power_level]`; a missing level means 0.
fn parse_member(raw: &str) -> Result<RoomMember, CommandError> {
    let (user_id, power_level) = match raw.rsplit_once('=') {
        Some((user_id, level)) => {
            let level = level
                .trim()
                .parse::<i64>()
                .map_err(|err| CommandError::InvalidMember {
                    member: raw.to_owned(),
                    reason: err.to_string(),
                })?;
            (user_id.trim(), level)
        }
        None => (raw.trim(), 0),
    };

    if !user_id.starts_with('@') {
        return Err(CommandError::InvalidMember {
            member: raw.to_owned(),
            reason: "user IDs start with '@'".to_owned(),
        });
    }
    Ok(RoomMember::new(user_id, power_level))
}

/// Execute one subcommand.
pub fn run(
    command: &Commands,
    scheme: SchemeChoice,
    config: &CliConfig,
) -> Result<String, CommandError> {
    let constructor = constructor_for(scheme, config);
    debug!(scheme = constructor.scheme_name(), "running permalink command");

    match command {
        Commands::User { user_id } => Ok(constructor.for_user(user_id)?),
        Commands::Room { room, via } => Ok(constructor.for_room(room, &config.via_for(via))?),
        Commands::Event {
            room,
            event_id,
            via,
        } => Ok(constructor.for_event(room, event_id, &config.via_for(via))?),
        Commands::Entity { id } => {
            let kind = EntityReference::from_id(id)?.kind();
            let link = constructor.for_entity(id)?;
            debug!(kind, "built entity permalink");
            Ok(format!("{kind}\t{link}"))
        }
        Commands::Parse { link } => {
            let parts = resolver_for(config).parse(link)?;
            Ok(serde_json::to_string_pretty(&parts)?)
        }
        Commands::Host { host } => Ok(resolver_for(config).is_permalink_host(host).to_string()),
        Commands::Via { members } => {
            let members = members
                .iter()
                .map(|raw| parse_member(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let servers = pick_server_candidates(&members, config.max_via);
            debug!(count = servers.len(), "picked routing hints");
            Ok(serde_json::to_string(&servers)?)
        }
    }
}
