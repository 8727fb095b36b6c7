//! mcstat - Minecraft server player statistics lookup
//!
//! CLI entry point.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use mcstat::cli::{PlayersCommand, StatCommand, TermsCommand};
use mcstat::config::Config;
use mcstat::server::MinecraftServer;

/// mcstat - Minecraft server player statistics lookup
#[derive(Parser)]
#[command(name = "mcstat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./mcstat.toml)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the statistics available for the configured version and language
    Terms {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
    },

    /// List players discovered in the server logs
    Players {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
    },

    /// Resolve a statistic for a player
    Stat {
        /// Username, case insensitive
        username: String,
        /// Statistic term, case insensitive (accents optional for Spanish)
        term: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> mcstat::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    config.ensure_complete()?;

    let mut server = MinecraftServer::new(
        config.server.version.as_str(),
        config.server.language.as_str(),
        &config.server.logs_path,
        &config.server.stats_path,
        &config.server.storage_path,
    )?;

    match cli.command {
        Commands::Terms { json } => TermsCommand { json }.execute(&server),
        Commands::Players { json } => PlayersCommand { json }.execute(&server),
        Commands::Stat {
            username,
            term,
            json,
        } => StatCommand {
            username,
            term,
            json,
        }
        .execute(&mut server),
    }
}
