use std::path::PathBuf;

/// Log filter used when neither `--log-filter` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Player id assumed by scripts that do not name one.
pub const DEFAULT_PLAYER_ID: &str = "player-1";

/// Runtime settings for one CLI invocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AppConfig {
    pub script: PathBuf,
    /// Pretty-print the snapshot JSON.
    pub pretty: bool,
    /// Explicit `tracing` filter directive; overrides `RUST_LOG`.
    pub log_filter: Option<String>,
}
