use serde::{Deserialize, Serialize};

use crate::error::PermalinkError;

/// Ordered list of homeserver names suggested as routes ("via" hints).
///
/// The first entry is the preferred route. Duplicates are kept as given.
pub type ServerCandidateList = Vec<String>;

/// Leading character that marks the kind of a Matrix identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sigil {
    /// Internal room ID (`!`).
    RoomId,
    /// Human-readable room alias (`#`).
    RoomAlias,
    /// User ID (`@`).
    User,
    /// Event ID (`$`).
    Event,
}

impl Sigil {
    /// Map a leading character to its sigil.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '!' => Some(Self::RoomId),
            '#' => Some(Self::RoomAlias),
            '@' => Some(Self::User),
            '$' => Some(Self::Event),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::RoomId => '!',
            Self::RoomAlias => '#',
            Self::User => '@',
            Self::Event => '$',
        }
    }

    /// Split a sigiled identifier into its sigil and the remaining body.
    ///
    /// A sigil with nothing after it is not an identifier.
    pub fn split(id: &str) -> Result<(Self, &str), PermalinkError> {
        let mut chars = id.chars();
        let sigil = chars
            .next()
            .and_then(Self::from_char)
            .ok_or_else(|| PermalinkError::unrecognized_sigil(id))?;
        let body = chars.as_str();
        if body.is_empty() {
            return Err(PermalinkError::MissingEntity);
        }
        Ok((sigil, body))
    }

    /// Prepend this sigil to a bare identifier body.
    pub fn attach(self, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + 1);
        out.push(self.as_char());
        out.push_str(body);
        out
    }
}

/// Structured reference to something a permalink can point at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntityReference {
    /// A room, by internal ID (`!…`) or alias (`#…`).
    Room(String),
    /// A user (`@…`).
    User(String),
    /// A bare event (`$…`). Events are only routable together with a room.
    Event(String),
    /// An event scoped to its room.
    RoomEvent {
        room_id_or_alias: String,
        event_id: String,
    },
}

impl EntityReference {
    /// Classify a single sigiled identifier.
    pub fn from_id(id: &str) -> Result<Self, PermalinkError> {
        let (sigil, _) = Sigil::split(id)?;
        Ok(match sigil {
            Sigil::RoomId | Sigil::RoomAlias => Self::Room(id.to_owned()),
            Sigil::User => Self::User(id.to_owned()),
            Sigil::Event => Self::Event(id.to_owned()),
        })
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Room(_) => "room",
            Self::User(_) => "user",
            Self::Event(_) => "event",
            Self::RoomEvent { .. } => "room_event",
        }
    }
}

/// Decoded permalink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PermalinkParts {
    /// Link to a user. Users are never routed through specific servers.
    User {
        /// Sigiled user ID, for example `@alice:example.org`.
        user_id: String,
    },
    /// Link to a room.
    Room {
        /// Sigiled room ID or alias.
        room_id_or_alias: String,
        /// Routing hints in preference order.
        via_servers: ServerCandidateList,
    },
    /// Link to an event inside a room.
    Event {
        /// Sigiled room ID or alias.
        room_id_or_alias: String,
        /// Sigiled event ID, for example `$abc:example.org`.
        event_id: String,
        /// Routing hints in preference order.
        via_servers: ServerCandidateList,
    },
}

impl PermalinkParts {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self::User {
            user_id: user_id.into(),
        }
    }

    pub fn for_room(room_id_or_alias: impl Into<String>, via_servers: ServerCandidateList) -> Self {
        Self::Room {
            room_id_or_alias: room_id_or_alias.into(),
            via_servers,
        }
    }

    pub fn for_event(
        room_id_or_alias: impl Into<String>,
        event_id: impl Into<String>,
        via_servers: ServerCandidateList,
    ) -> Self {
        Self::Event {
            room_id_or_alias: room_id_or_alias.into(),
            event_id: event_id.into(),
            via_servers,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            _ => None,
        }
    }

    pub fn room_id_or_alias(&self) -> Option<&str> {
        match self {
            Self::Room {
                room_id_or_alias, ..
            }
            | Self::Event {
                room_id_or_alias, ..
            } => Some(room_id_or_alias),
            Self::User { .. } => None,
        }
    }

    pub fn event_id(&self) -> Option<&str> {
        match self {
            Self::Event { event_id, .. } => Some(event_id),
            _ => None,
        }
    }

    /// Routing hints; always empty for user links.
    pub fn via_servers(&self) -> &[String] {
        match self {
            Self::Room { via_servers, .. } | Self::Event { via_servers, .. } => via_servers,
            Self::User { .. } => &[],
        }
    }

    /// The most specific identifier in the link (event, else room, else user).
    pub fn primary_entity_id(&self) -> &str {
        match self {
            Self::User { user_id } => user_id,
            Self::Room {
                room_id_or_alias, ..
            } => room_id_or_alias,
            Self::Event { event_id, .. } => event_id,
        }
    }

    pub fn entity(&self) -> EntityReference {
        match self {
            Self::User { user_id } => EntityReference::User(user_id.clone()),
            Self::Room {
                room_id_or_alias, ..
            } => EntityReference::Room(room_id_or_alias.clone()),
            Self::Event {
                room_id_or_alias,
                event_id,
                ..
            } => EntityReference::RoomEvent {
                room_id_or_alias: room_id_or_alias.clone(),
                event_id: event_id.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_sigil_from_body() {
        let (sigil, body) = Sigil::split("#room:example.org").expect("alias should split");
        assert_eq!(sigil, Sigil::RoomAlias);
        assert_eq!(body, "room:example.org");
        assert_eq!(sigil.attach(body), "#room:example.org");
    }

    #[test]
    fn rejects_unknown_and_empty_sigils() {
        assert_eq!(
            Sigil::split("alice"),
            Err(PermalinkError::unrecognized_sigil("alice"))
        );
        assert_eq!(Sigil::split(""), Err(PermalinkError::unrecognized_sigil("")));
    }

    #[test]
    fn sigil_without_body_is_missing_entity() {
        for id in ["@", "!", "#", "$"] {
            assert_eq!(Sigil::split(id), Err(PermalinkError::MissingEntity), "input: {id}");
        }
    }

    #[test]
    fn classifies_entity_by_sigil() {
        assert_eq!(
            EntityReference::from_id("!abc:example.org"),
            Ok(EntityReference::Room("!abc:example.org".into()))
        );
        assert_eq!(
            EntityReference::from_id("$evt"),
            Ok(EntityReference::Event("$evt".into()))
        );
        assert!(EntityReference::from_id("%nope").is_err());
        assert_eq!(
            EntityReference::from_id("#room:example.org").map(|entity| entity.kind()),
            Ok("room")
        );
    }

    #[test]
    fn user_parts_carry_no_routing_hints() {
        let parts = PermalinkParts::for_user("@alice:example.org");
        assert!(parts.via_servers().is_empty());
        assert_eq!(parts.user_id(), Some("@alice:example.org"));
        assert_eq!(parts.room_id_or_alias(), None);
        assert_eq!(
            parts.entity(),
            EntityReference::User("@alice:example.org".into())
        );
    }

    #[test]
    fn event_parts_expose_room_and_event() {
        let parts = PermalinkParts::for_event(
            "!abc:example.org",
            "$evt:example.org",
            vec!["example.org".into()],
        );
        assert_eq!(parts.room_id_or_alias(), Some("!abc:example.org"));
        assert_eq!(parts.event_id(), Some("$evt:example.org"));
        assert_eq!(parts.primary_entity_id(), "$evt:example.org");
        assert_eq!(parts.via_servers(), ["example.org".to_owned()]);
        assert!(matches!(parts.entity(), EntityReference::RoomEvent { .. }));
    }
}
