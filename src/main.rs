use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use snake_player::config::AppConfig;
use snake_player::logging;
use snake_player::script::{PlayerSnapshot, load_script};

/// Replays a JSON script of player operations and prints the resulting player.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Path to the script file.
    script: PathBuf,

    /// Print the snapshot on a single line.
    #[arg(long)]
    compact: bool,

    /// Tracing filter directive, e.g. `snake_player=trace`.
    #[arg(long = "log-filter")]
    log_filter: Option<String>,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            script: cli.script,
            pretty: !cli.compact,
            log_filter: cli.log_filter,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from(Cli::parse());
    logging::init(config.log_filter.as_deref());

    run(&config)
}

fn run(config: &AppConfig) -> anyhow::Result<()> {
    let script = load_script(&config.script)
        .with_context(|| format!("loading {}", config.script.display()))?;
    let player = script.run().context("replaying script")?;
    let snapshot = PlayerSnapshot::from(&player);

    let json = if config.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
