//! Term catalog: available statistics for a server version and language.
//!
//! The catalog maps normalized display terms to their internal stat keys.
//! It is built once from a translation source and persisted to
//! `{storage}/{version}/{language}/terms.json`; later constructions for the
//! same pair load the persisted file verbatim, with no re-validation against
//! the source.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{McstatError, Result};
use crate::normalize::normalize;
use crate::server::ServerContext;
use crate::storage::JsonStore;

/// Default mirror serving raw translation assets per version and language.
pub const ASSETS_BASE_URL: &str =
    "https://raw.githubusercontent.com/InventivetalentDev/minecraft-assets";

/// Category of the subject a statistic counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Block,
    Entity,
    Item,
    Stat,
}

impl ItemCategory {
    /// Parse the first segment of a dotted translation key.
    ///
    /// Returns `None` for any other segment (`advancements`, `gui`, ...),
    /// which excludes the entry from the catalog.
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "block" => Some(Self::Block),
            "entity" => Some(Self::Entity),
            "item" => Some(Self::Item),
            "stat" => Some(Self::Stat),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Entity => "entity",
            Self::Item => "item",
            Self::Stat => "stat",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Measurement unit of a counter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Plain count.
    Amount,
    /// Centimeters.
    Distance,
    /// Game ticks.
    Time,
}

impl UnitKind {
    /// Derive the unit kind from an internal stat key.
    ///
    /// `time` is checked before `one_cm` to match the server's own key
    /// naming (no key carries both substrings today).
    pub fn for_key(key: &str) -> Self {
        if key.contains("time") {
            Self::Time
        } else if key.contains("one_cm") {
            Self::Distance
        } else {
            Self::Amount
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Distance => "distance",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One catalog entry: a statistic the server can report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Internal stat key (third segment of the dotted translation key).
    pub key: String,
    /// Display label from the translation file.
    pub pretty_term: String,
    /// Category (first segment of the dotted translation key).
    #[serde(rename = "type")]
    pub category: ItemCategory,
    /// Unit kind derived from the key.
    #[serde(rename = "unit_type")]
    pub unit: UnitKind,
}

/// The available-terms table, keyed by normalized display term.
///
/// A `BTreeMap` keeps the catalog sorted by normalized key, which is the
/// order it is persisted and listed in. Normalized-key collisions overwrite
/// silently, last wins in translation-source definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermCatalog(BTreeMap<String, TermEntry>);

impl TermCatalog {
    /// Load the persisted catalog for this context, or build it from the
    /// translation source and persist the result.
    ///
    /// A fetch or parse failure from the source surfaces as
    /// [`McstatError::SourceUnavailable`] naming the version and language.
    pub fn build_or_load(
        ctx: &ServerContext,
        store: &JsonStore,
        source: &dyn TranslationSource,
    ) -> Result<Self> {
        let path = ctx.terms_path();
        if store.exists(&path) {
            tracing::debug!(path = %path.display(), "loading persisted term catalog");
            return store.load(&path);
        }

        let translations = source
            .fetch(ctx.version(), ctx.language())
            .map_err(|e| McstatError::source_unavailable(ctx.version(), ctx.language(), e))?;

        let catalog = Self::from_translations(&translations, ctx.fold_accents());
        tracing::debug!(
            terms = catalog.len(),
            path = %path.display(),
            "built term catalog from translation source"
        );
        store.save(&path, &catalog)?;
        Ok(catalog)
    }

    /// Build a catalog from a raw translation mapping.
    ///
    /// Keeps only dotted keys with exactly three segments whose first
    /// segment is a valid [`ItemCategory`]; everything else in the
    /// translation file (GUI strings, advancements, ...) is skipped.
    pub fn from_translations(
        translations: &IndexMap<String, String>,
        fold_accents: bool,
    ) -> Self {
        let mut entries = BTreeMap::new();

        for (dotted, label) in translations {
            let segments: Vec<&str> = dotted.split('.').collect();
            let [category, _, key] = segments.as_slice() else {
                continue;
            };
            let Some(category) = ItemCategory::parse(category) else {
                continue;
            };

            entries.insert(
                normalize(label, fold_accents),
                TermEntry {
                    key: key.to_string(),
                    pretty_term: label.clone(),
                    category,
                    unit: UnitKind::for_key(key),
                },
            );
        }

        Self(entries)
    }

    /// Look up an entry by its normalized term.
    pub fn get(&self, normalized_term: &str) -> Option<&TermEntry> {
        self.0.get(normalized_term)
    }

    /// Iterate entries in normalized-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TermEntry)> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Pluggable source of raw translation data.
///
/// A translation mapping is dotted keys (`category.subject.itemKey`) to
/// display labels, in definition order. Implementations fetch it per
/// (version, language); tests and air-gapped installations substitute a
/// local fixture via [`FileTranslationSource`].
pub trait TranslationSource {
    fn fetch(&self, version: &str, language: &str) -> Result<IndexMap<String, String>>;
}

/// Translation source backed by the remote assets mirror.
#[derive(Debug, Clone)]
pub struct HttpTranslationSource {
    base_url: String,
}

impl HttpTranslationSource {
    /// Create a source against the default assets mirror.
    pub fn new() -> Self {
        Self::with_base_url(ASSETS_BASE_URL)
    }

    /// Create a source against a custom mirror.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, version: &str, language: &str) -> String {
        format!(
            "{}/{version}/assets/minecraft/lang/{language}.json",
            self.base_url
        )
    }
}

impl Default for HttpTranslationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationSource for HttpTranslationSource {
    fn fetch(&self, version: &str, language: &str) -> Result<IndexMap<String, String>> {
        let url = self.url_for(version, language);
        let response = reqwest::blocking::get(&url)
            .and_then(|r| r.error_for_status())
            .map_err(|e| McstatError::fetch(format!("GET {url}: {e}")))?;

        response
            .json()
            .map_err(|e| McstatError::fetch(format!("GET {url}: {e}")))
    }
}

/// Translation source backed by a local JSON file.
///
/// The file holds the same shape the mirror serves: a single JSON object of
/// dotted keys to display labels.
#[derive(Debug, Clone)]
pub struct FileTranslationSource {
    path: PathBuf,
}

impl FileTranslationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TranslationSource for FileTranslationSource {
    fn fetch(&self, _version: &str, _language: &str) -> Result<IndexMap<String, String>> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| McstatError::storage(&self.path, e))?;
        serde_json::from_str(&content).map_err(|e| {
            McstatError::serde(format!("failed to parse {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;

    fn sample_translations() -> IndexMap<String, String> {
        indexmap! {
            "entity.minecraft.zombie".to_string() => "Zombie".to_string(),
            "item.minecraft.wooden_axe".to_string() => "Wooden Axe".to_string(),
            "block.minecraft.stone".to_string() => "Stone".to_string(),
            "stat.minecraft.fly_one_cm".to_string() => "Distance flown".to_string(),
            "stat.minecraft.time_since_death".to_string() => "Time Since Last Death".to_string(),
            "gui.minecraft.done".to_string() => "Done".to_string(),
            "advancements.story.root.title".to_string() => "Minecraft".to_string(),
        }
    }

    #[test]
    fn test_keeps_only_three_segment_keys_with_valid_category() {
        let catalog = TermCatalog::from_translations(&sample_translations(), false);

        assert_eq!(catalog.len(), 5);
        assert!(catalog.get("done").is_none());
        assert!(catalog.get("minecraft").is_none());
    }

    #[test]
    fn test_entry_fields() {
        let catalog = TermCatalog::from_translations(&sample_translations(), false);

        let zombie = catalog.get("zombie").unwrap();
        assert_eq!(zombie.key, "zombie");
        assert_eq!(zombie.pretty_term, "Zombie");
        assert_eq!(zombie.category, ItemCategory::Entity);
        assert_eq!(zombie.unit, UnitKind::Amount);
    }

    #[test]
    fn test_unit_kind_derivation() {
        assert_eq!(UnitKind::for_key("fly_one_cm"), UnitKind::Distance);
        assert_eq!(UnitKind::for_key("time_since_death"), UnitKind::Time);
        assert_eq!(UnitKind::for_key("zombie"), UnitKind::Amount);

        let catalog = TermCatalog::from_translations(&sample_translations(), false);
        assert_eq!(catalog.get("distance flown").unwrap().unit, UnitKind::Distance);
        assert_eq!(
            catalog.get("time since last death").unwrap().unit,
            UnitKind::Time
        );
    }

    #[test]
    fn test_keys_are_normalized_labels() {
        let catalog = TermCatalog::from_translations(&sample_translations(), false);
        assert!(catalog.get("wooden axe").is_some());
        assert!(catalog.get("Wooden Axe").is_none());
    }

    #[test]
    fn test_spanish_folding_applied_to_catalog_keys() {
        let translations = indexmap! {
            "stat.minecraft.time_since_death".to_string() =>
                "Tiempo desde la última muerte".to_string(),
        };
        let catalog = TermCatalog::from_translations(&translations, true);

        let entry = catalog.get("tiempo desde la ultima muerte").unwrap();
        // Display label keeps its accents; only the lookup key folds.
        assert_eq!(entry.pretty_term, "Tiempo desde la última muerte");
    }

    #[test]
    fn test_iteration_sorted_by_normalized_key() {
        let catalog = TermCatalog::from_translations(&sample_translations(), false);
        let keys: Vec<&String> = catalog.iter().map(|(k, _)| k).collect();

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_normalized_collision_last_wins_in_source_order() {
        let translations = indexmap! {
            "block.minecraft.grass".to_string() => "Grass".to_string(),
            "item.minecraft.grass".to_string() => "Grass".to_string(),
        };
        let catalog = TermCatalog::from_translations(&translations, false);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("grass").unwrap().category, ItemCategory::Item);
    }

    #[test]
    fn test_build_is_idempotent() {
        let translations = sample_translations();
        let first = TermCatalog::from_translations(&translations, false);
        let second = TermCatalog::from_translations(&translations, false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_serde_wire_format_uses_type_and_unit_type() {
        let catalog = TermCatalog::from_translations(&sample_translations(), false);
        let json = serde_json::to_value(&catalog).unwrap();

        assert_eq!(json["zombie"]["type"], "entity");
        assert_eq!(json["distance flown"]["unit_type"], "distance");

        let parsed: TermCatalog = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_file_source_missing_file_is_storage_error() {
        let source = FileTranslationSource::new("/nonexistent/en_us.json");
        let err = source.fetch("1.19.2", "en_us").unwrap_err();
        assert!(matches!(err, McstatError::Storage { .. }));
    }

    #[test]
    fn test_http_source_url_layout() {
        let source = HttpTranslationSource::with_base_url("http://127.0.0.1:9/assets");
        assert_eq!(
            source.url_for("1.19.2", "es_es"),
            "http://127.0.0.1:9/assets/1.19.2/assets/minecraft/lang/es_es.json"
        );
    }
}
