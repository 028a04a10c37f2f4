mod backup;
mod cli;
mod config;
mod db;
mod error;
mod ledger;
mod models;
mod query;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let config = config::Config::resolve(args.db, args.log)?;
    init_tracing(&config.log_filter);

    let db = db::Database::open(&config.db_path)
        .with_context(|| format!("Failed to open store: {}", config.db_path.display()))?;
    let mut ledger = ledger::Ledger::new(db);

    let stdin = std::io::stdin();
    let outcome = cli::run(
        args.command,
        &mut ledger,
        &mut stdin.lock(),
        &mut std::io::stdout(),
    );
    ledger.close().context("Failed to close store")?;
    outcome
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
