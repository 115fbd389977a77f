/// Crate-level error types for wikiref diagnostics.
use std::path::PathBuf;

/// Errors that reach the caller. Reference-resolution ambiguities (unknown
/// field tokens, unregistered wiki names) are settled by policy and never
/// show up here; only structural failures in configuration inputs do.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The project config file named on the command line does not exist.
    #[error("config not found: {}", path.display())]
    ConfigNotFound {
        /// Path to the missing config file.
        path: PathBuf,
    },

    /// An interwiki map file could not be read.
    #[error("cannot read interwiki map {}: {source}", path.display())]
    InterwikiMapIo {
        /// Path of the map file after `~` expansion.
        path: PathBuf,
        /// The underlying read failure, surfaced unchanged.
        #[source]
        source: std::io::Error,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of a projection failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// A non-blank, non-comment map line lacks the `<name> <url>` form.
    #[error("malformed interwiki map string: {line}")]
    MalformedInterwikiMap {
        /// The offending line after comment removal.
        line: String,
        /// One-based line number within the map source.
        line_number: usize,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// The filesystem watcher could not be set up.
    #[error("watch failed: {reason}")]
    Watch {
        /// Description of the watcher failure.
        reason: String,
    },
}
