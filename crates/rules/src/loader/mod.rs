//! Filesystem catalog loader with hot-reload via `notify` watcher.
//!
//! Reads holiday catalogs from a file or a directory tree of YAML/JSON files
//! and keeps their raw records in memory, reloading affected files when the
//! watcher reports a change.

mod core;
mod error;
mod parse;
mod watcher;

#[cfg(test)]
mod tests;

pub use self::core::HolidayLoader;
pub use self::error::{HolidayError, LoadResult, LoadStatus, Result};
pub use self::parse::{parse_catalog, CatalogFormat, ParsedCatalog};
