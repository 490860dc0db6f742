use tracing::trace;

use crate::{
    constructor::PermalinkConstructor,
    error::PermalinkError,
    matrix_scheme::MatrixSchemePermalinkConstructor,
    matrix_to::MatrixToPermalinkConstructor,
    types::PermalinkParts,
};

/// Resolves links written in any of several permalink schemes.
pub struct PermalinkResolver {
    constructors: Vec<Box<dyn PermalinkConstructor>>,
}

impl Default for PermalinkResolver {
    fn default() -> Self {
        Self::new(vec![
            Box::new(MatrixToPermalinkConstructor::new()),
            Box::new(MatrixSchemePermalinkConstructor::new()),
        ])
    }
}

impl std::fmt::Debug for PermalinkResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermalinkResolver")
            .field("schemes", &self.scheme_names())
            .finish()
    }
}

impl PermalinkResolver {
    /// Constructors are tried in the given order.
    pub fn new(constructors: Vec<Box<dyn PermalinkConstructor>>) -> Self {
        Self { constructors }
    }

    pub fn scheme_names(&self) -> Vec<&'static str> {
        self.constructors
            .iter()
            .map(|constructor| constructor.scheme_name())
            .collect()
    }

    pub fn is_permalink_host(&self, host: &str) -> bool {
        self.constructors
            .iter()
            .any(|constructor| constructor.is_permalink_host(host))
    }

    /// Parse with the first scheme that recognizes the link's prefix.
    ///
    /// Once a scheme claims the link its verdict is final; later schemes are
    /// only consulted when the prefix did not match.
    pub fn parse(&self, link: &str) -> Result<PermalinkParts, PermalinkError> {
        for constructor in &self.constructors {
            match constructor.parse_permalink(link) {
                Err(PermalinkError::NotAPermalink { .. }) => {
                    trace!(scheme = constructor.scheme_name(), "permalink prefix did not match");
                }
                result => {
                    trace!(
                        scheme = constructor.scheme_name(),
                        ok = result.is_ok(),
                        "permalink claimed"
                    );
                    return result;
                }
            }
        }

        Err(PermalinkError::not_a_permalink(link))
    }
}
