//! Error types and load result structures for the catalog loader.

use std::path::PathBuf;

/// Errors that can occur while reading catalog files.
///
/// The engine itself never errors; these only cover getting bytes off disk
/// and into [`RawHoliday`](crate::schema::RawHoliday) records.
#[derive(Debug, thiserror::Error)]
pub enum HolidayError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File parsed but is not a catalog (e.g. top level is a string).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Filesystem watcher error.
    #[error("Notify watcher error: {0}")]
    Notify(#[from] notify::Error),
}

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, HolidayError>;

/// Outcome of loading a single catalog file.
#[derive(Debug)]
pub struct LoadResult {
    /// Path to the file that was loaded.
    pub path: PathBuf,
    /// Status of the load attempt.
    pub status: LoadStatus,
}

/// Status of a single file load attempt.
#[derive(Debug)]
pub enum LoadStatus {
    /// File parsed; `records` were kept and `rejected` elements were not records at all.
    Loaded { records: usize, rejected: usize },
    /// File was skipped (dotfile, unsupported extension).
    Skipped { reason: String },
    /// Read or parse error occurred; nothing from this file was kept.
    Failed { error: String },
}
