//! Matrix permalink model and codecs.
//!
//! This crate defines the identifier/permalink types, the scheme-agnostic
//! constructor capability, the `matrix:` and matrix.to schemes, and routing
//! hint selection for room links.

/// Scheme-agnostic constructor trait and shared `via=` query helpers.
pub mod constructor;
/// Stable permalink error taxonomy.
pub mod error;
/// The `matrix:` URI scheme.
pub mod matrix_scheme;
/// matrix.to web links.
pub mod matrix_to;
/// Multi-scheme link resolution.
pub mod resolver;
/// Routing hint selection from room membership.
pub mod server_candidates;
/// Sigils, entity references, and decoded permalink parts.
pub mod types;

#[cfg(test)]
mod test_strategies;

pub use constructor::{PermalinkConstructor, encode_server_candidates, parse_server_candidates};
pub use error::PermalinkError;
pub use matrix_scheme::{MATRIX_SCHEME_PREFIX, MatrixSchemePermalinkConstructor, encode_entity};
pub use matrix_to::{DEFAULT_MATRIX_TO_BASE, MatrixToPermalinkConstructor};
pub use resolver::PermalinkResolver;
pub use server_candidates::{
    MAX_SERVER_CANDIDATES, RoomMember, is_ip_literal, pick_server_candidates, server_name,
};
pub use types::{EntityReference, PermalinkParts, ServerCandidateList, Sigil};
