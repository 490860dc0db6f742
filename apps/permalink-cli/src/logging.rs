//! Tracing/logging bootstrap for the permalink CLI.

use std::env;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,permalink_cli=info,permalink_core=info";

/// Initialize the global tracing subscriber, writing to stderr so stdout
/// carries only command output.
///
/// By default only warnings from dependencies and info from the CLI and the
/// codec crate are shown; `debug` on `permalink_cli` adds scheme selection and
/// entity classification records. Precedence:
/// 1) `RUST_LOG`
/// 2) `PERMALINK_LOG`
/// 3) internal default filter
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_env_filter(filter_from_env())
        .try_init();
}

fn filter_from_env() -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if let Some(value) = env::var("PERMALINK_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        && let Ok(filter) = EnvFilter::try_new(value)
    {
        return filter;
    }

    EnvFilter::new(DEFAULT_FILTER)
}
