//! The `matrix:` URI scheme.
//!
//! ```text
//! permalink   = "matrix:" kind "/" id [ "/" "e" "/" event-id ] [ "?" via-params ]
//! kind        = "u" / "r" / "roomid"
//! via-params  = "via=" server *( "&via=" server )
//! ```

use crate::{
    constructor::{
        PermalinkConstructor, encode_server_candidates, parse_server_candidates, split_query,
    },
    error::PermalinkError,
    types::{PermalinkParts, Sigil},
};

pub const MATRIX_SCHEME_PREFIX: &str = "matrix:";

const USER_KIND: &str = "u";
const ALIAS_KIND: &str = "r";
const ROOM_ID_KIND: &str = "roomid";
const EVENT_KIND: &str = "e";

/// Builds and parses `matrix:` links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixSchemePermalinkConstructor;

impl MatrixSchemePermalinkConstructor {
    pub fn new() -> Self {
        Self
    }
}

/// Path keyword the scheme uses for each sigil.
fn kind_for(sigil: Sigil) -> &'static str {
    match sigil {
        Sigil::RoomId => ROOM_ID_KIND,
        Sigil::RoomAlias => ALIAS_KIND,
        Sigil::User => USER_KIND,
        Sigil::Event => EVENT_KIND,
    }
}

/// Encode one sigiled identifier as its `<kind>/<id-without-sigil>` segment.
pub fn encode_entity(entity_id: &str) -> Result<String, PermalinkError> {
    let (sigil, body) = Sigil::split(entity_id)?;
    Ok(format!("{}/{body}", kind_for(sigil)))
}

impl PermalinkConstructor for MatrixSchemePermalinkConstructor {
    fn scheme_name(&self) -> &'static str {
        "matrix"
    }

    fn for_event(
        &self,
        room_id_or_alias: &str,
        event_id: &str,
        server_candidates: &[String],
    ) -> Result<String, PermalinkError> {
        Ok(format!(
            "{MATRIX_SCHEME_PREFIX}{}/{}{}",
            encode_entity(room_id_or_alias)?,
            encode_entity(event_id)?,
            encode_server_candidates(server_candidates)
        ))
    }

    fn for_room(
        &self,
        room_id_or_alias: &str,
        server_candidates: &[String],
    ) -> Result<String, PermalinkError> {
        Ok(format!(
            "{MATRIX_SCHEME_PREFIX}{}{}",
            encode_entity(room_id_or_alias)?,
            encode_server_candidates(server_candidates)
        ))
    }

    fn for_user(&self, user_id: &str) -> Result<String, PermalinkError> {
        Ok(format!("{MATRIX_SCHEME_PREFIX}{}", encode_entity(user_id)?))
    }

    fn for_entity(&self, entity_id: &str) -> Result<String, PermalinkError> {
        Ok(format!("{MATRIX_SCHEME_PREFIX}{}", encode_entity(entity_id)?))
    }

    /// `matrix:` URIs have no host, so only the empty host matches.
    fn is_permalink_host(&self, host: &str) -> bool {
        // TODO: take the parsed URI instead so an absent host can be told apart from "".
        host.is_empty()
    }

    fn parse_permalink(&self, link: &str) -> Result<PermalinkParts, PermalinkError> {
        let rest = link
            .strip_prefix(MATRIX_SCHEME_PREFIX)
            .ok_or_else(|| PermalinkError::not_a_permalink(link))?;

        let parts = rest.split('/').collect::<Vec<_>>();
        let kind = parts.first().copied().unwrap_or_default();
        let entity_no_sigil = parts
            .get(1)
            .copied()
            .filter(|segment| !segment.is_empty());

        let room_sigil = match kind {
            USER_KIND => {
                let user = entity_no_sigil.ok_or(PermalinkError::MissingEntity)?;
                return Ok(PermalinkParts::for_user(Sigil::User.attach(user)));
            }
            ALIAS_KIND => Sigil::RoomAlias,
            ROOM_ID_KIND => Sigil::RoomId,
            other => return Err(PermalinkError::unknown_entity_type(other)),
        };
        let entity_no_sigil = entity_no_sigil.ok_or(PermalinkError::MissingEntity)?;

        if parts.len() == 2 {
            let (room, query) = split_query(entity_no_sigil);
            if room.is_empty() {
                return Err(PermalinkError::MissingEntity);
            }
            return Ok(PermalinkParts::for_room(
                room_sigil.attach(room),
                parse_server_candidates(query),
            ));
        }

        match parts.get(2).copied() {
            Some(EVENT_KIND) => {
                // Event IDs may themselves contain '/', so the whole tail belongs to the event.
                let event_and_query = parts.get(3..).unwrap_or_default().join("/");
                let (event, query) = split_query(&event_and_query);
                if event.is_empty() {
                    return Err(PermalinkError::MissingEntity);
                }
                Ok(PermalinkParts::for_event(
                    room_sigil.attach(entity_no_sigil),
                    Sigil::Event.attach(event),
                    parse_server_candidates(query),
                ))
            }
            other => Err(PermalinkError::MalformedRoomPermalink {
                segment: other.unwrap_or_default().to_owned(),
            }),
        }
    }
}
