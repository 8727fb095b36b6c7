//! mcstat - Minecraft server player statistics lookup
//!
//! mcstat resolves a named player statistic (e.g. "wooden axe", "Distance
//! flown") for a player on a Java Edition server installation. It combines
//! a translation catalog (term → internal stat key), the server's log files
//! (username → UUID), and per-player stats files into one typed
//! [`StatRecord`](stats::StatRecord).
//!
//! Catalogs and player registries are cached on disk per (version, language)
//! pair; rotated logs are scanned at most once thanks to a filename-derived
//! watermark.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod server;
pub mod stats;
pub mod storage;

pub use catalog::{
    FileTranslationSource, HttpTranslationSource, ItemCategory, TermCatalog, TermEntry,
    TranslationSource, UnitKind,
};
pub use config::Config;
pub use error::{McstatError, Result};
pub use normalize::normalize;
pub use registry::PlayerRegistry;
pub use server::{MinecraftServer, ServerContext};
pub use stats::{StatCounter, StatRecord, StatsDocument};
pub use storage::JsonStore;
