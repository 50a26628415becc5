// contactbook — interactive personal contact book
//
// Reads menu choices from stdin, writes feedback to stdout, and keeps the
// contact list in a JSON file. Logs go to stderr.

mod config;
mod menu;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use contactbook_core::JsonFileStorage;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contactbook")]
#[command(about = "Personal contact book with a text menu", long_about = None)]
#[command(version)]
struct Cli {
    /// Contacts file to load and save
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::new(cli.file, cli.verbose);

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr)
        .init();

    for (key, value) in config.list() {
        tracing::debug!("config {} = {}", key, value);
    }

    let storage = JsonFileStorage::new(&config.contacts_file);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    let mut session = shell::Session::open(storage, stdin.lock(), stdout.lock())
        .context("Failed to start contact book session")?;
    let state = session.run().context("Terminal I/O failed")?;

    tracing::info!(
        "Session ended: {:?} (changed: {}, contacts: {})",
        state,
        session.changed(),
        session.store().len()
    );

    Ok(())
}
