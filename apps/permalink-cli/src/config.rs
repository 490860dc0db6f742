//! Environment-backed runtime configuration for the `permalink` CLI.

use std::{env, error::Error, fmt};

use clap::ValueEnum;
use permalink_core::{DEFAULT_MATRIX_TO_BASE, MAX_SERVER_CANDIDATES};
use url::Url;

/// Permalink scheme used when building links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SchemeChoice {
    /// `matrix:` URIs.
    #[default]
    Matrix,
    /// `https://matrix.to/#/…` links.
    MatrixTo,
}

impl SchemeChoice {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "matrix" => Some(Self::Matrix),
            "matrix-to" | "matrix.to" => Some(Self::MatrixTo),
            _ => None,
        }
    }
}

/// Runtime configuration used by the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Scheme used when `--scheme` is not given.
    pub scheme: SchemeChoice,
    /// Base URL for matrix.to-style links.
    pub matrix_to_base: Url,
    /// Routing hints attached to room/event links when no `--via` is given.
    pub default_via: Vec<String>,
    /// Upper bound on routing hints per link.
    pub max_via: usize,
}

impl CliConfig {
    /// Parse configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let scheme = match optional_trimmed_env("PERMALINK_SCHEME", &mut lookup) {
            None => SchemeChoice::default(),
            Some(value) => {
                SchemeChoice::from_name(&value).ok_or_else(|| ConfigError::InvalidValue {
                    key: "PERMALINK_SCHEME",
                    value,
                    reason: "expected 'matrix' or 'matrix-to'".to_owned(),
                })?
            }
        };

        let matrix_to_base = optional_trimmed_env("PERMALINK_MATRIX_TO_BASE", &mut lookup)
            .unwrap_or_else(|| DEFAULT_MATRIX_TO_BASE.to_owned());
        let matrix_to_base =
            Url::parse(&matrix_to_base).map_err(|err| ConfigError::InvalidValue {
                key: "PERMALINK_MATRIX_TO_BASE",
                value: matrix_to_base.clone(),
                reason: err.to_string(),
            })?;
        if matrix_to_base.host_str().is_none() {
            return Err(ConfigError::InvalidValue {
                key: "PERMALINK_MATRIX_TO_BASE",
                value: matrix_to_base.to_string(),
                reason: "must include a host".to_owned(),
            });
        }

        let default_via = optional_trimmed_env("PERMALINK_DEFAULT_VIA", &mut lookup)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|server| !server.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        let max_via =
            parse_optional_usize("PERMALINK_MAX_VIA", MAX_SERVER_CANDIDATES, &mut lookup)?;
        if max_via == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PERMALINK_MAX_VIA",
                value: "0".to_owned(),
                reason: "must be at least 1".to_owned(),
            });
        }

        Ok(Self {
            scheme,
            matrix_to_base,
            default_via,
            max_via,
        })
    }

    /// Routing hints to attach: explicit ones win over configured defaults.
    pub fn via_for(&self, explicit: &[String]) -> Vec<String> {
        let source = if explicit.is_empty() {
            &self.default_via
        } else {
            explicit
        };
        source.iter().take(self.max_via).cloned().collect()
    }
}

/// Errors produced while parsing runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid {key}='{value}': {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

fn optional_trimmed_env<F>(key: &'static str, lookup: &mut F) -> Option<String>
where
    F: FnMut(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_optional_usize<F>(
    key: &'static str,
    default: usize,
    lookup: &mut F,
) -> Result<usize, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    let Some(value) = optional_trimmed_env(key, lookup) else {
        return Ok(default);
    };
    value
        .parse::<usize>()
        .map_err(|err| ConfigError::InvalidValue {
            key,
            value,
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from_pairs(pairs: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>();
        CliConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config_from_pairs(&[]).expect("empty config should parse");
        assert_eq!(cfg.scheme, SchemeChoice::Matrix);
        assert_eq!(cfg.matrix_to_base.as_str(), "https://matrix.to/");
        assert!(cfg.default_via.is_empty());
        assert_eq!(cfg.max_via, MAX_SERVER_CANDIDATES);
    }

    #[test]
    fn parses_scheme_base_and_default_via() {
        let cfg = config_from_pairs(&[
            ("PERMALINK_SCHEME", " matrix-to "),
            ("PERMALINK_MATRIX_TO_BASE", "https://links.example.org"),
            ("PERMALINK_DEFAULT_VIA", "example.org, matrix.org ,,"),
            ("PERMALINK_MAX_VIA", "5"),
        ])
        .expect("config should parse");

        assert_eq!(cfg.scheme, SchemeChoice::MatrixTo);
        assert_eq!(cfg.matrix_to_base.host_str(), Some("links.example.org"));
        assert_eq!(
            cfg.default_via,
            vec!["example.org".to_owned(), "matrix.org".to_owned()]
        );
        assert_eq!(cfg.max_via, 5);
    }

    #[test]
    fn explicit_via_wins_and_is_capped() {
        let cfg = config_from_pairs(&[
            ("PERMALINK_DEFAULT_VIA", "fallback.example"),
            ("PERMALINK_MAX_VIA", "2"),
        ])
        .expect("config should parse");

        assert_eq!(cfg.via_for(&[]), vec!["fallback.example".to_owned()]);
        let explicit = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
        assert_eq!(cfg.via_for(&explicit), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn rejects_unknown_scheme() {
        let err = config_from_pairs(&[("PERMALINK_SCHEME", "https")])
            .expect_err("unknown scheme should fail");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "PERMALINK_SCHEME",
                ..
            }
        ));
    }

    #[test]
    fn rejects_invalid_base_and_zero_via_cap() {
        let err = config_from_pairs(&[("PERMALINK_MATRIX_TO_BASE", "not a url")])
            .expect_err("invalid base should fail");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "PERMALINK_MATRIX_TO_BASE",
                ..
            }
        ));

        let err = config_from_pairs(&[("PERMALINK_MAX_VIA", "0")])
            .expect_err("zero cap should fail");
        assert_eq!(err.to_string(), "invalid PERMALINK_MAX_VIA='0': must be at least 1");
    }
}
