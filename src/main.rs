//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `pos_db` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//!
//! All database work is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use pos_db::cli::{run, Cli};
use pos_db::initialization::init_logger_with;

#[tokio::main]
async fn main() -> Result<()> {
    // DB_* and DATABASE_URL may come from a .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("pos-db error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
