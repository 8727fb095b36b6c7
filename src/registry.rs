//! Player registry: username to UUID mapping discovered from server logs.
//!
//! The server writes one `UUID of player <name> is <uuid>` line per join.
//! Rotated logs (`YYYY-MM-DD-N.log.gz`) are immutable, so each is scanned at
//! most once: a watermark token derived from the newest scanned filename
//! gates rescans. The live `latest.log` keeps growing and is re-scanned on
//! every pass so newly joined players are discoverable before rotation.
//!
//! Per-file I/O and decode errors are logged at `warn` and skip the file;
//! only a failure to list the directory itself fails a scan.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};

use crate::error::{McstatError, Result};

/// Marker phrase identifying join lines in server logs.
const UUID_MARKER: &str = "UUID of player";

/// Username → UUID table with a scan watermark.
///
/// Usernames are stored lowercased; lookups are case-insensitive. The
/// watermark is the separator-stripped date token of the newest rotated log
/// already incorporated, serialized under the `last update` key alongside
/// the player map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRegistry {
    #[serde(default)]
    players: BTreeMap<String, String>,
    #[serde(rename = "last update", default, skip_serializing_if = "Option::is_none")]
    last_update: Option<String>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a player's UUID, case-insensitively.
    pub fn get(&self, username: &str) -> Option<&str> {
        self.players.get(&username.to_lowercase()).map(String::as_str)
    }

    /// The username → UUID table, without the watermark.
    pub fn players(&self) -> &BTreeMap<String, String> {
        &self.players
    }

    /// The current watermark token, if any rotated log has been scanned.
    pub fn watermark(&self) -> Option<&str> {
        self.last_update.as_deref()
    }

    /// Whether a rotated log's stripped date token is already covered.
    ///
    /// Tokens compare as plain strings; zero-padded date tokens of equal
    /// length make that ordering chronological.
    fn covers(&self, token: &str) -> bool {
        token <= self.last_update.as_deref().unwrap_or("0")
    }

    /// Scan the logs directory, merging discovered players into the
    /// registry and advancing the watermark past newly scanned rotated logs.
    pub fn scan_logs(&mut self, logs_dir: &Path) -> Result<()> {
        let entries = fs::read_dir(logs_dir).map_err(|e| McstatError::storage(logs_dir, e))?;
        let mut scanned_tokens: Vec<String> = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(dir = %logs_dir.display(), error = %e, "skipping log entry");
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if let Some(stem) = name.strip_suffix(".log.gz") {
                let token = strip_separators(stem);
                if self.covers(&token) {
                    continue;
                }
                match fs::File::open(&path) {
                    Ok(file) => {
                        let reader = BufReader::new(GzDecoder::new(file));
                        match self.merge_lines(reader) {
                            Ok(found) => {
                                tracing::debug!(
                                    log = %path.display(),
                                    players = found,
                                    "scanned rotated log"
                                );
                                scanned_tokens.push(token);
                            }
                            Err(e) => {
                                tracing::warn!(
                                    log = %path.display(),
                                    error = %e,
                                    "skipping unreadable rotated log"
                                );
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(log = %path.display(), error = %e, "skipping rotated log");
                    }
                }
            } else if name.ends_with(".log") {
                // The live log grows in place; no watermark check.
                match fs::File::open(&path) {
                    Ok(file) => {
                        if let Err(e) = self.merge_lines(BufReader::new(file)) {
                            tracing::warn!(
                                log = %path.display(),
                                error = %e,
                                "skipping unreadable live log"
                            );
                        }
                    }
                    Err(e) => {
                        tracing::warn!(log = %path.display(), error = %e, "skipping live log");
                    }
                }
            }
        }

        if let Some(max) = scanned_tokens.into_iter().max() {
            self.last_update = Some(max);
        }

        Ok(())
    }

    /// Merge join lines from one log into the player table.
    ///
    /// Later lines for the same username overwrite earlier ones, so a
    /// renamed or re-identified player ends up with the newest UUID.
    fn merge_lines<R: BufRead>(&mut self, reader: R) -> std::io::Result<usize> {
        let mut found = 0;
        for line in reader.lines() {
            let line = line?;
            if let Some((username, uuid)) = parse_join_line(&line) {
                self.players.insert(username, uuid);
                found += 1;
            }
        }
        Ok(found)
    }
}

/// Parse a `... UUID of player <username> is <uuid>` log line.
///
/// Returns the lowercased username and the UUID.
fn parse_join_line(line: &str) -> Option<(String, String)> {
    if !line.contains(UUID_MARKER) {
        return None;
    }
    let collapsed = line.replace(" is ", " ");
    let mut words = collapsed.split_whitespace().rev();
    let uuid = words.next()?.to_string();
    let username = words.next()?.to_lowercase();
    Some((username, uuid))
}

/// Strip date separators so tokens compare as digit strings.
fn strip_separators(token: &str) -> String {
    token.replace('-', "")
}
