//! Unified error types for mcstat.
//!
//! Every failure is typed and terminal: a query either fully resolves or
//! fails with one of the variants below. Error messages carry the offending
//! path, username, or term verbatim so callers can diagnose the installation
//! without re-running the query. Only per-file log scanning degrades
//! gracefully (logged at `warn`, never surfaced as an error).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for mcstat operations.
#[derive(Error, Debug)]
pub enum McstatError {
    /// A source directory is unreadable or the storage directory is
    /// unwritable. Raised at construction, before any state is built.
    #[error("invalid configuration at {path}: {reason}")]
    InvalidConfiguration { path: PathBuf, reason: String },

    /// The version/language combination yields no usable translation data.
    #[error("no translation data for version {version}, language {language}")]
    SourceUnavailable {
        version: String,
        language: String,
        #[source]
        source: Box<McstatError>,
    },

    /// The normalized term is absent from the catalog.
    #[error("unknown term: {term}")]
    UnknownTerm { term: String },

    /// The username is absent from the registry after one rescan.
    #[error("unknown player: {username}")]
    UnknownPlayer { username: String },

    /// The per-player stats file is missing, unreadable, or malformed.
    /// Common for players who joined but never produced a stats file.
    #[error("no stats available for player {username}")]
    StatsUnavailable {
        username: String,
        #[source]
        source: Box<McstatError>,
    },

    /// I/O errors from catalog, registry, or stats file operations.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Translation source transport failures (HTTP or local fixture).
    #[error("translation fetch error: {message}")]
    Fetch { message: String },

    /// JSON or TOML parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },
}

/// A specialized Result type for mcstat operations.
pub type Result<T> = std::result::Result<T, McstatError>;

impl McstatError {
    /// Create an invalid configuration error.
    pub fn invalid_configuration(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a source unavailable error wrapping the underlying failure.
    pub fn source_unavailable(
        version: impl Into<String>,
        language: impl Into<String>,
        source: McstatError,
    ) -> Self {
        Self::SourceUnavailable {
            version: version.into(),
            language: language.into(),
            source: Box::new(source),
        }
    }

    /// Create an unknown term error.
    pub fn unknown_term(term: impl Into<String>) -> Self {
        Self::UnknownTerm { term: term.into() }
    }

    /// Create an unknown player error.
    pub fn unknown_player(username: impl Into<String>) -> Self {
        Self::UnknownPlayer {
            username: username.into(),
        }
    }

    /// Create a stats unavailable error wrapping the underlying failure.
    pub fn stats_unavailable(username: impl Into<String>, source: McstatError) -> Self {
        Self::StatsUnavailable {
            username: username.into(),
            source: Box::new(source),
        }
    }

    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a translation fetch error.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for McstatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}
