//! Way2Rare CLI - Database migrations and catalog seeding.
//!
//! # Usage
//!
//! ```bash
//! # Create the product and gallery tables
//! w2r-cli migrate
//!
//! # Replace the catalog with the launch products and gallery
//! w2r-cli seed
//!
//! # Show what would be written without touching the database
//! w2r-cli seed --dry-run
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "w2r-cli")]
#[command(author, version, about = "Way2Rare CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Clear and repopulate the product and gallery tables
    Seed {
        /// Log the records that would be written and exit
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { dry_run } => commands::seed::catalog(dry_run).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seed_dry_run() {
        let cli = Cli::try_parse_from(["w2r-cli", "seed", "--dry-run"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Seed { dry_run: true })
        ));
    }
}
