//! The server aggregation and lookup component.
//!
//! [`MinecraftServer`] ties the pieces together: it validates the
//! installation's directories, builds or loads the term catalog, loads and
//! extends the player registry from logs, and resolves (username, term)
//! queries into [`StatRecord`]s.
//!
//! One instance manages one (version, language) installation. Construction
//! and queries are synchronous blocking I/O; two instances must not share a
//! (version, language, storage) triple concurrently, as persistence writes
//! are not lock-guarded.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{HttpTranslationSource, TermCatalog, TranslationSource};
use crate::error::{McstatError, Result};
use crate::normalize::normalize;
use crate::registry::PlayerRegistry;
use crate::stats::{StatCounter, StatRecord, StatsDocument};
use crate::storage::JsonStore;

/// Immutable description of one server installation.
#[derive(Debug, Clone)]
pub struct ServerContext {
    version: String,
    language: String,
    fold_accents: bool,
    logs_dir: PathBuf,
    stats_dir: PathBuf,
    base_path: PathBuf,
}

impl ServerContext {
    /// Validate directories and freeze the context.
    ///
    /// The logs and stats directories must be listable and the storage base
    /// path for this (version, language) pair creatable, otherwise
    /// construction fails with `InvalidConfiguration` before any state is
    /// built. The language code is lowercased; Spanish codes (`es_*`)
    /// enable accent folding for catalog keys and lookups.
    pub fn new(
        version: impl Into<String>,
        language: impl Into<String>,
        logs_dir: impl Into<PathBuf>,
        stats_dir: impl Into<PathBuf>,
        storage_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let version = version.into();
        let language = language.into().to_lowercase();
        let logs_dir = logs_dir.into();
        let stats_dir = stats_dir.into();
        let storage_dir = storage_dir.into();

        ensure_listable(&logs_dir)?;
        ensure_listable(&stats_dir)?;

        let base_path = storage_dir.join(&version).join(&language);
        fs::create_dir_all(&base_path).map_err(|e| {
            McstatError::invalid_configuration(
                &storage_dir,
                format!("storage directory is not writable: {e}"),
            )
        })?;

        let fold_accents = language.contains("es_");

        Ok(Self {
            version,
            language,
            fold_accents,
            logs_dir,
            stats_dir,
            base_path,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether catalog keys and lookups fold Spanish accents.
    pub fn fold_accents(&self) -> bool {
        self.fold_accents
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    pub fn stats_dir(&self) -> &Path {
        &self.stats_dir
    }

    /// Storage base path for this (version, language) pair.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the persisted term catalog.
    pub fn terms_path(&self) -> PathBuf {
        self.base_path.join("terms.json")
    }

    /// Path of the persisted player registry.
    pub fn players_path(&self) -> PathBuf {
        self.base_path.join("players.json")
    }

    /// Path of one player's stats file.
    pub fn player_stats_path(&self, uuid: &str) -> PathBuf {
        self.stats_dir.join(format!("{uuid}.json"))
    }
}

fn ensure_listable(dir: &Path) -> Result<()> {
    fs::read_dir(dir)
        .map(|_| ())
        .map_err(|e| McstatError::invalid_configuration(dir, format!("directory is not readable: {e}")))
}

/// Statistics lookup for one server installation.
#[derive(Debug)]
pub struct MinecraftServer {
    ctx: ServerContext,
    store: JsonStore,
    catalog: TermCatalog,
    registry: PlayerRegistry,
}

impl MinecraftServer {
    /// Construct against the default remote translation mirror.
    ///
    /// See [mcasset.cloud](https://mcasset.cloud) for available languages.
    pub fn new(
        version: impl Into<String>,
        language: impl Into<String>,
        logs_dir: impl Into<PathBuf>,
        stats_dir: impl Into<PathBuf>,
        storage_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        Self::with_source(
            version,
            language,
            logs_dir,
            stats_dir,
            storage_dir,
            &HttpTranslationSource::new(),
        )
    }

    /// Construct with an injected translation source.
    ///
    /// Construction validates the directories, builds or loads the term
    /// catalog, loads the persisted registry if one exists, and runs one
    /// log scan so the registry reflects the current logs.
    pub fn with_source(
        version: impl Into<String>,
        language: impl Into<String>,
        logs_dir: impl Into<PathBuf>,
        stats_dir: impl Into<PathBuf>,
        storage_dir: impl Into<PathBuf>,
        source: &dyn TranslationSource,
    ) -> Result<Self> {
        let ctx = ServerContext::new(version, language, logs_dir, stats_dir, storage_dir)?;
        let store = JsonStore::new();

        let catalog = TermCatalog::build_or_load(&ctx, &store, source)?;

        let players_path = ctx.players_path();
        let registry = if store.exists(&players_path) {
            store.load(&players_path)?
        } else {
            PlayerRegistry::new()
        };

        let mut server = Self {
            ctx,
            store,
            catalog,
            registry,
        };
        server.refresh_registry()?;
        Ok(server)
    }

    /// The context this server was constructed with.
    pub fn context(&self) -> &ServerContext {
        &self.ctx
    }

    /// The full available-terms catalog.
    pub fn available_stats(&self) -> &TermCatalog {
        &self.catalog
    }

    /// Known players: lowercased username → UUID.
    pub fn player_list(&self) -> &BTreeMap<String, String> {
        self.registry.players()
    }

    /// Resolve a statistic for a player.
    ///
    /// The term and username are case-insensitive; for Spanish languages the
    /// term may be written without accents. An unknown username triggers
    /// exactly one additional log scan before failing, to tolerate players
    /// who joined after the previous pass.
    pub fn get_player_stat(&mut self, username: &str, term: &str) -> Result<StatRecord> {
        let normalized_term = normalize(term, self.ctx.fold_accents());
        let entry = self
            .catalog
            .get(&normalized_term)
            .ok_or_else(|| McstatError::unknown_term(term))?
            .clone();

        if self.registry.get(username).is_none() {
            tracing::debug!(username, "player not in registry, rescanning logs");
            self.refresh_registry()?;
        }
        let uuid = self
            .registry
            .get(username)
            .ok_or_else(|| McstatError::unknown_player(username))?
            .to_string();

        let stats_path = self.ctx.player_stats_path(&uuid);
        let document: StatsDocument = self
            .store
            .load(&stats_path)
            .map_err(|e| McstatError::stats_unavailable(username, e))?;

        let key = entry.key.as_str();
        Ok(StatRecord {
            username: username.to_string(),
            uuid,
            term: term.to_string(),
            normalized_term,
            key: entry.key.clone(),
            pretty_term: entry.pretty_term.clone(),
            category: entry.category,
            unit: entry.unit,
            broken: document.counter(StatCounter::Broken, key),
            crafted: document.counter(StatCounter::Crafted, key),
            custom: document.counter(StatCounter::Custom, key),
            dropped: document.counter(StatCounter::Dropped, key),
            killed: document.counter(StatCounter::Killed, key),
            killed_by: document.counter(StatCounter::KilledBy, key),
            mined: document.counter(StatCounter::Mined, key),
            picked_up: document.counter(StatCounter::PickedUp, key),
            used: document.counter(StatCounter::Used, key),
        })
    }

    /// Scan the logs directory and persist the updated registry.
    fn refresh_registry(&mut self) -> Result<()> {
        self.registry.scan_logs(self.ctx.logs_dir())?;
        self.store.save(&self.ctx.players_path(), &self.registry)
    }
}
