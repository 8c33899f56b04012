use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;

/// Picks the filter directive: explicit override, then `RUST_LOG`, then the default.
#[must_use]
pub fn resolve_filter(explicit: Option<&str>, env_value: Option<&str>) -> String {
    explicit
        .or(env_value)
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or(DEFAULT_LOG_FILTER)
        .to_owned()
}

/// Installs the global stderr subscriber. Later calls are ignored.
pub fn init(explicit_filter: Option<&str>) {
    let env_value = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = resolve_filter(explicit_filter, env_value.as_deref());
    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
