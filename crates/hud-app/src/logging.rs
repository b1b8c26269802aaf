//! Log filter selection.
//!
//! The first valid directive wins: `RUST_LOG`, then the `--log-level`
//! flag, then the config file's level, then `hud=info`.

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "hud=info";

/// Build the filter from the process environment.
pub fn env_filter(cli: Option<&str>, config: Option<&str>) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = select_directive(rust_log.as_deref(), cli, config);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

fn select_directive<'a>(rust_log: Option<&'a str>, cli: Option<&'a str>, config: Option<&'a str>) -> &'a str {
    [rust_log, cli, config]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty() && EnvFilter::try_new(d).is_ok())
        .unwrap_or(DEFAULT_LOG_DIRECTIVE)
}
