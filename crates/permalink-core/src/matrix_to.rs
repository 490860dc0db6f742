//! `https://matrix.to/#/…` web permalinks.

use url::Url;

use crate::{
    constructor::{
        PermalinkConstructor, encode_server_candidates, parse_server_candidates, split_query,
    },
    error::PermalinkError,
    types::{PermalinkParts, Sigil},
};

pub const DEFAULT_MATRIX_TO_BASE: &str = "https://matrix.to";

/// Builds and parses matrix.to-style links against a configurable base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixToPermalinkConstructor {
    base_url: String,
    host: Option<String>,
}

impl Default for MatrixToPermalinkConstructor {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MATRIX_TO_BASE.to_owned(),
            host: Some("matrix.to".to_owned()),
        }
    }
}

impl MatrixToPermalinkConstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a self-hosted link service instead of `https://matrix.to`.
    pub fn with_base_url(base_url: &Url) -> Self {
        let host = base_url.host_str().map(|host| match base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        });

        Self {
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            host,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn link_prefix(&self) -> String {
        format!("{}/#/", self.base_url)
    }
}

impl PermalinkConstructor for MatrixToPermalinkConstructor {
    fn scheme_name(&self) -> &'static str {
        "matrix-to"
    }

    fn for_event(
        &self,
        room_id_or_alias: &str,
        event_id: &str,
        server_candidates: &[String],
    ) -> Result<String, PermalinkError> {
        Sigil::split(room_id_or_alias)?;
        Sigil::split(event_id)?;
        Ok(format!(
            "{}{room_id_or_alias}/{event_id}{}",
            self.link_prefix(),
            encode_server_candidates(server_candidates)
        ))
    }

    fn for_room(
        &self,
        room_id_or_alias: &str,
        server_candidates: &[String],
    ) -> Result<String, PermalinkError> {
        Sigil::split(room_id_or_alias)?;
        Ok(format!(
            "{}{room_id_or_alias}{}",
            self.link_prefix(),
            encode_server_candidates(server_candidates)
        ))
    }

    fn for_user(&self, user_id: &str) -> Result<String, PermalinkError> {
        Sigil::split(user_id)?;
        Ok(format!("{}{user_id}", self.link_prefix()))
    }

    fn for_entity(&self, entity_id: &str) -> Result<String, PermalinkError> {
        Sigil::split(entity_id)?;
        Ok(format!("{}{entity_id}", self.link_prefix()))
    }

    fn is_permalink_host(&self, host: &str) -> bool {
        self.host.as_deref() == Some(host)
    }

    fn parse_permalink(&self, link: &str) -> Result<PermalinkParts, PermalinkError> {
        let prefix = self.link_prefix();
        let rest = link
            .strip_prefix(prefix.as_str())
            .ok_or_else(|| PermalinkError::not_a_permalink(link))?;

        let (entity, tail) = match rest.split_once('/') {
            Some((entity, tail)) => (entity, Some(tail)),
            None => (rest, None),
        };
        if entity.is_empty() {
            return Err(PermalinkError::MissingEntity);
        }

        let Some(sigil) = entity.chars().next().and_then(Sigil::from_char) else {
            return Err(PermalinkError::unknown_entity_type(entity));
        };

        match sigil {
            Sigil::User => {
                let (user, _) = split_query(entity);
                Sigil::split(user)?;
                Ok(PermalinkParts::for_user(user))
            }
            Sigil::RoomId | Sigil::RoomAlias => match tail {
                None => {
                    let (room, query) = split_query(entity);
                    Sigil::split(room)?;
                    Ok(PermalinkParts::for_room(room, parse_server_candidates(query)))
                }
                Some(event_and_query) => {
                    let (event, query) = split_query(event_and_query);
                    if event.is_empty() {
                        return Err(PermalinkError::MissingEntity);
                    }
                    Ok(PermalinkParts::for_event(
                        entity,
                        event,
                        parse_server_candidates(query),
                    ))
                }
            },
            Sigil::Event => Err(PermalinkError::unknown_entity_type(entity)),
        }
    }
}
