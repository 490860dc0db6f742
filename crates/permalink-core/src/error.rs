use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Permanent failure while encoding or decoding a permalink.
///
/// None of these are retryable: the input itself is outside the supported
/// grammar, so callers should surface the error rather than try again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum PermalinkError {
    /// Identifier does not start with one of `!`, `#`, `@`, `$`.
    #[error("cannot encode entity '{id}': unrecognized sigil")]
    UnrecognizedSigil {
        /// The offending identifier.
        id: String,
    },
    /// Input does not carry the constructor's scheme prefix.
    #[error("'{input}' does not appear to be a permalink")]
    NotAPermalink {
        /// The rejected input.
        input: String,
    },
    /// Identifier kind segment (or sigil) is not one the scheme understands.
    #[error("unknown entity type '{kind}' in permalink")]
    UnknownEntityType {
        /// The unrecognized kind segment.
        kind: String,
    },
    /// Room permalink has an unexpected segment after the room identifier.
    #[error("faulty room permalink: unexpected segment '{segment}'")]
    MalformedRoomPermalink {
        /// The segment found where `e` was expected.
        segment: String,
    },
    /// Permalink path is missing the identifier itself.
    #[error("permalink is missing the entity identifier")]
    MissingEntity,
}

impl PermalinkError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnrecognizedSigil { .. } => "unrecognized_sigil",
            Self::NotAPermalink { .. } => "not_a_permalink",
            Self::UnknownEntityType { .. } => "unknown_entity_type",
            Self::MalformedRoomPermalink { .. } => "malformed_room_permalink",
            Self::MissingEntity => "missing_entity",
        }
    }

    pub(crate) fn unrecognized_sigil(id: impl Into<String>) -> Self {
        Self::UnrecognizedSigil { id: id.into() }
    }

    pub(crate) fn not_a_permalink(input: impl Into<String>) -> Self {
        Self::NotAPermalink {
            input: input.into(),
        }
    }

    pub(crate) fn unknown_entity_type(kind: impl Into<String>) -> Self {
        Self::UnknownEntityType { kind: kind.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_error_codes_stable() {
        assert_eq!(
            PermalinkError::unrecognized_sigil("alice").code(),
            "unrecognized_sigil"
        );
        assert_eq!(
            PermalinkError::not_a_permalink("https://example.org").code(),
            "not_a_permalink"
        );
        assert_eq!(
            PermalinkError::unknown_entity_type("x").code(),
            "unknown_entity_type"
        );
        assert_eq!(
            PermalinkError::MalformedRoomPermalink {
                segment: "z".into()
            }
            .code(),
            "malformed_room_permalink"
        );
        assert_eq!(PermalinkError::MissingEntity.code(), "missing_entity");
    }

    #[test]
    fn renders_offending_input_in_message() {
        let err = PermalinkError::not_a_permalink("https://example.org");
        assert_eq!(
            err.to_string(),
            "'https://example.org' does not appear to be a permalink"
        );
    }

    #[test]
    fn serializes_as_tagged_variant() {
        let err = PermalinkError::unknown_entity_type("x");
        let json = serde_json::to_string(&err).expect("error should serialize");
        assert_eq!(json, r#"{"UnknownEntityType":{"kind":"x"}}"#);
    }
}
