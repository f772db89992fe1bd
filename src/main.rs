mod config;
mod error;
mod models;
mod prompt;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let settings = config::Settings::from_env()?;
    init_logging(&settings.log_filter);

    let store = store::LedgerStore::new(settings.ledger);
    store
        .initialize()
        .with_context(|| format!("Failed to open ledger: {}", store.path().display()))?;
    tracing::debug!(path = %store.path().display(), "ledger ready");

    match args.len() {
        1 => run::as_menu(&store),
        2.. => run::as_cli(&args, &store),
        _ => {
            eprintln!("Usage: fintrack [command]");
            Ok(())
        }
    }
}

/// Logs go to stderr so they never interleave with prompts on stdout.
fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
