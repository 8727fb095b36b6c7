//! Per-player statistics files and the resolved stat record.
//!
//! A Java Edition server writes one JSON file per player UUID under its
//! `stats/` directory, shaped as nested namespaced maps:
//!
//! ```json
//! {"stats": {"minecraft:killed": {"minecraft:zombie": 8}}, "DataVersion": 3120}
//! ```
//!
//! [`StatsDocument`] parses that shape into typed unsigned counters so a
//! malformed file fails at parse time instead of at field access.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{ItemCategory, UnitKind};

/// Fixed namespace prefix used by the vanilla server in stats files.
pub const NAMESPACE: &str = "minecraft";

/// The nine counters a stats file can record for an item key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCounter {
    Broken,
    Crafted,
    Custom,
    Dropped,
    Killed,
    KilledBy,
    Mined,
    PickedUp,
    Used,
}

impl StatCounter {
    /// All counters, in output field order.
    pub const ALL: [StatCounter; 9] = [
        StatCounter::Broken,
        StatCounter::Crafted,
        StatCounter::Custom,
        StatCounter::Dropped,
        StatCounter::Killed,
        StatCounter::KilledBy,
        StatCounter::Mined,
        StatCounter::PickedUp,
        StatCounter::Used,
    ];

    /// Wire name used in stats files, without the namespace prefix.
    pub fn as_key(&self) -> &'static str {
        match self {
            StatCounter::Broken => "broken",
            StatCounter::Crafted => "crafted",
            StatCounter::Custom => "custom",
            StatCounter::Dropped => "dropped",
            StatCounter::Killed => "killed",
            StatCounter::KilledBy => "killed_by",
            StatCounter::Mined => "mined",
            StatCounter::PickedUp => "picked_up",
            StatCounter::Used => "used",
        }
    }
}

/// Typed parse of a per-player stats file.
///
/// Top-level fields other than `stats` (e.g. `DataVersion`) are ignored.
/// Counter values must be unsigned integers; anything else fails the parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsDocument {
    #[serde(default)]
    stats: BTreeMap<String, BTreeMap<String, u64>>,
}

impl StatsDocument {
    /// Read one counter for an internal item key.
    ///
    /// Returns `None` when either the counter section or the key entry is
    /// absent, which is how the server represents "never happened".
    pub fn counter(&self, counter: StatCounter, key: &str) -> Option<u64> {
        self.stats
            .get(&format!("{NAMESPACE}:{}", counter.as_key()))
            .and_then(|section| section.get(&format!("{NAMESPACE}:{key}")))
            .copied()
    }
}

/// A fully resolved player statistic.
///
/// Immutable once constructed. The nine counters are `None` when the player
/// has no recorded value for that counter under the resolved key; which
/// counters can be populated follows from the item category (entities only
/// appear under killed/killed_by, custom stats only under custom).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatRecord {
    /// Username the query was made for, as given.
    pub username: String,
    /// Resolved player UUID.
    pub uuid: String,
    /// Query term, as given.
    pub term: String,
    /// Normalized form of the term used for catalog lookup.
    pub normalized_term: String,
    /// Internal stat key (e.g. `fly_one_cm`, `zombie`).
    pub key: String,
    /// Display label from the translation catalog.
    pub pretty_term: String,
    /// Item category of the resolved key.
    pub category: ItemCategory,
    /// Unit kind: distance counters are centimeters, time counters are ticks.
    pub unit: UnitKind,
    pub broken: Option<u64>,
    pub crafted: Option<u64>,
    pub custom: Option<u64>,
    pub dropped: Option<u64>,
    pub killed: Option<u64>,
    pub killed_by: Option<u64>,
    pub mined: Option<u64>,
    pub picked_up: Option<u64>,
    pub used: Option<u64>,
}

impl StatRecord {
    /// Read one counter by name.
    pub fn counter(&self, counter: StatCounter) -> Option<u64> {
        match counter {
            StatCounter::Broken => self.broken,
            StatCounter::Crafted => self.crafted,
            StatCounter::Custom => self.custom,
            StatCounter::Dropped => self.dropped,
            StatCounter::Killed => self.killed,
            StatCounter::KilledBy => self.killed_by,
            StatCounter::Mined => self.mined,
            StatCounter::PickedUp => self.picked_up,
            StatCounter::Used => self.used,
        }
    }
}
