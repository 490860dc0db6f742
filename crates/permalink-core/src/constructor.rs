use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

use crate::{
    error::PermalinkError,
    types::{PermalinkParts, ServerCandidateList},
};

/// Characters escaped in `via=` values. Unreserved characters and `:` (legal
/// in a query, and common in `host:port` server names) pass through.
const VIA_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b':');

static VIA_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("&?via=").expect("via separator pattern is valid"));

/// Capability shared by every permalink scheme.
///
/// Builders validate sigils (and reject a bare sigil) but nothing else;
/// `parse_permalink` either yields fully populated parts or fails.
///
/// `parse_permalink(render(p)) == p` holds when every identifier body is free
/// of `/` and `?` and every via candidate is non-empty and needs no
/// percent-encoding. Outside that domain links still render, but identifiers
/// are not escaped and via values are not decoded, so parsing may disagree.
pub trait PermalinkConstructor: Send + Sync {
    /// Short scheme name used in logs and configuration.
    fn scheme_name(&self) -> &'static str;

    fn for_event(
        &self,
        room_id_or_alias: &str,
        event_id: &str,
        server_candidates: &[String],
    ) -> Result<String, PermalinkError>;

    fn for_room(
        &self,
        room_id_or_alias: &str,
        server_candidates: &[String],
    ) -> Result<String, PermalinkError>;

    fn for_user(&self, user_id: &str) -> Result<String, PermalinkError>;

    /// Link to any sigiled identifier when the caller does not know its kind.
    fn for_entity(&self, entity_id: &str) -> Result<String, PermalinkError>;

    /// Whether a URL host names this scheme's links.
    fn is_permalink_host(&self, host: &str) -> bool;

    fn parse_permalink(&self, link: &str) -> Result<PermalinkParts, PermalinkError>;

    /// Render decoded parts back into this scheme.
    fn render(&self, parts: &PermalinkParts) -> Result<String, PermalinkError> {
        match parts {
            PermalinkParts::User { user_id } => self.for_user(user_id),
            PermalinkParts::Room {
                room_id_or_alias,
                via_servers,
            } => self.for_room(room_id_or_alias, via_servers),
            PermalinkParts::Event {
                room_id_or_alias,
                event_id,
                via_servers,
            } => self.for_event(room_id_or_alias, event_id, via_servers),
        }
    }
}

/// Encode routing hints as a query string (`""` when there are none).
pub fn encode_server_candidates(candidates: &[String]) -> String {
    if candidates.is_empty() {
        return String::new();
    }

    let encoded = candidates
        .iter()
        .map(|candidate| utf8_percent_encode(candidate, VIA_ENCODE_SET).to_string())
        .collect::<Vec<_>>();
    format!("?via={}", encoded.join("&via="))
}

/// Extract `via=` fragments from a query string, in order.
///
/// Fragments are returned as written; no percent-decoding is applied.
pub fn parse_server_candidates(query: &str) -> ServerCandidateList {
    VIA_SEPARATOR
        .split(query)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Split `<id>?<query>` on the first `?`.
pub(crate) fn split_query(tail: &str) -> (&str, &str) {
    tail.split_once('?').unwrap_or((tail, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_no_candidates_as_empty_query() {
        assert_eq!(encode_server_candidates(&[]), "");
    }

    #[test]
    fn preserves_candidate_order_and_duplicates() {
        let candidates = vec!["a".to_owned(), "b".to_owned(), "a".to_owned()];
        assert_eq!(encode_server_candidates(&candidates), "?via=a&via=b&via=a");
    }

    #[test]
    fn percent_encodes_query_unsafe_characters() {
        let candidates = vec!["hs.example:8448".to_owned(), "a b&c".to_owned()];
        assert_eq!(
            encode_server_candidates(&candidates),
            "?via=hs.example:8448&via=a%20b%26c"
        );
    }

    #[test]
    fn parses_via_fragments_in_order() {
        assert_eq!(
            parse_server_candidates("via=s1&via=s2"),
            vec!["s1".to_owned(), "s2".to_owned()]
        );
        assert!(parse_server_candidates("").is_empty());
    }

    #[test]
    fn keeps_non_via_fragments_as_written() {
        assert_eq!(
            parse_server_candidates("action=join&via=s1"),
            vec!["action=join".to_owned(), "s1".to_owned()]
        );
        assert_eq!(
            parse_server_candidates("via=a%20b"),
            vec!["a%20b".to_owned()]
        );
    }

    #[test]
    fn splits_on_first_question_mark_only() {
        assert_eq!(split_query("room?via=a?b"), ("room", "via=a?b"));
        assert_eq!(split_query("room"), ("room", ""));
    }
}
