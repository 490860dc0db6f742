//! Selection of "via" routing hints for room permalinks.

use std::{
    collections::HashMap,
    net::{Ipv4Addr, Ipv6Addr},
};

use serde::{Deserialize, Serialize};

use crate::types::ServerCandidateList;

/// Default number of routing hints attached to a room link.
pub const MAX_SERVER_CANDIDATES: usize = 3;

/// Power level at which a member's server is preferred as the first hint.
pub const MIN_POWER_LEVEL_FOR_CANDIDATE: i64 = 50;

/// Joined room member as seen by the candidate picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomMember {
    /// Sigiled user ID, for example `@alice:example.org`.
    pub user_id: String,
    pub power_level: i64,
}

impl RoomMember {
    pub fn new(user_id: impl Into<String>, power_level: i64) -> Self {
        Self {
            user_id: user_id.into(),
            power_level,
        }
    }
}

/// Server name portion of a user ID (everything after the first `:`).
pub fn server_name(user_id: &str) -> Option<&str> {
    user_id
        .split_once(':')
        .map(|(_, server)| server)
        .filter(|server| !server.is_empty())
}

/// Whether a server name's host is an IPv4 or bracketed IPv6 literal.
pub fn is_ip_literal(server: &str) -> bool {
    if let Some(rest) = server.strip_prefix('[') {
        return rest
            .split_once(']')
            .is_some_and(|(addr, _)| addr.parse::<Ipv6Addr>().is_ok());
    }

    let host = server.rsplit_once(':').map_or(server, |(host, _)| host);
    host.parse::<Ipv4Addr>().is_ok()
}

/// Pick up to `limit` servers likely to stay joined to the room.
///
/// The highest-power member (at or above [`MIN_POWER_LEVEL_FOR_CANDIDATE`])
/// contributes the first server; the rest follow by member population,
/// largest first, ties broken by name. IP literals are never suggested.
pub fn pick_server_candidates(members: &[RoomMember], limit: usize) -> ServerCandidateList {
    let mut candidates = ServerCandidateList::new();
    if limit == 0 {
        return candidates;
    }

    let mut top: Option<&RoomMember> = None;
    for member in members {
        if member.power_level < MIN_POWER_LEVEL_FOR_CANDIDATE {
            continue;
        }
        if top.is_none_or(|current| member.power_level > current.power_level) {
            top = Some(member);
        }
    }
    if let Some(server) = top
        .and_then(|member| server_name(&member.user_id))
        .filter(|server| !is_ip_literal(server))
    {
        candidates.push(server.to_owned());
    }

    let mut population: HashMap<&str, usize> = HashMap::new();
    for server in members
        .iter()
        .filter_map(|member| server_name(&member.user_id))
    {
        *population.entry(server).or_default() += 1;
    }

    let mut by_population = population.into_iter().collect::<Vec<_>>();
    by_population.sort_by(|(a_name, a_count), (b_name, b_count)| {
        b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
    });

    for (server, _) in by_population {
        if candidates.len() >= limit {
            break;
        }
        if is_ip_literal(server) || candidates.iter().any(|existing| existing == server) {
            continue;
        }
        candidates.push(server.to_owned());
    }

    candidates.truncate(limit);
    candidates
}
