//! CLI commands for mcstat.
//!
//! Each command renders either aligned plain text or pretty JSON from the
//! same [`MinecraftServer`] queries the library exposes.

use crate::error::Result;
use crate::server::MinecraftServer;
use crate::stats::{StatCounter, StatRecord};

/// `mcstat terms` — list the available statistics.
#[derive(Debug, Clone, Default)]
pub struct TermsCommand {
    /// Output as JSON.
    pub json: bool,
}

impl TermsCommand {
    pub fn execute(&self, server: &MinecraftServer) -> Result<()> {
        let catalog = server.available_stats();

        if self.json {
            println!("{}", serde_json::to_string_pretty(catalog)?);
            return Ok(());
        }

        let width = catalog.iter().map(|(term, _)| term.len()).max().unwrap_or(0);
        for (term, entry) in catalog.iter() {
            println!(
                "{term:width$}  {:6}  {:8}  {}",
                entry.category, entry.unit, entry.key
            );
        }
        Ok(())
    }
}

/// `mcstat players` — list players discovered in the logs.
#[derive(Debug, Clone, Default)]
pub struct PlayersCommand {
    /// Output as JSON.
    pub json: bool,
}

impl PlayersCommand {
    pub fn execute(&self, server: &MinecraftServer) -> Result<()> {
        let players = server.player_list();

        if self.json {
            println!("{}", serde_json::to_string_pretty(players)?);
            return Ok(());
        }

        let width = players.keys().map(|name| name.len()).max().unwrap_or(0);
        for (username, uuid) in players {
            println!("{username:width$}  {uuid}");
        }
        Ok(())
    }
}

/// `mcstat stat <username> <term>` — resolve one statistic.
#[derive(Debug, Clone)]
pub struct StatCommand {
    pub username: String,
    pub term: String,
    /// Output as JSON.
    pub json: bool,
}

impl StatCommand {
    pub fn execute(&self, server: &mut MinecraftServer) -> Result<()> {
        let record = server.get_player_stat(&self.username, &self.term)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&record)?);
            return Ok(());
        }

        print_record(&record);
        Ok(())
    }
}

fn print_record(record: &StatRecord) {
    println!(
        "{} ({}, {}) for {} [{}]",
        record.pretty_term, record.category, record.unit, record.username, record.uuid
    );

    let mut any = false;
    for counter in StatCounter::ALL {
        if let Some(value) = record.counter(counter) {
            println!("  {}: {value}", counter.as_key());
            any = true;
        }
    }
    if !any {
        println!("  no recorded values for {}", record.key);
    }
}
