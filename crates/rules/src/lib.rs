//! Holiday banner rule engine.
//!
//! This crate provides:
//! - Tolerant record types for hand-edited YAML/JSON holiday catalogs
//! - A normalizer that turns raw records into canonical [`Holiday`] rules
//! - A matcher that picks the banner in effect at a given local instant
//! - Catalog diagnostics with fuzzy field-name suggestions
//! - Filesystem loader with hot-reload via `notify` watcher

pub mod loader;
pub mod matcher;
pub mod normalize;
pub mod schema;
pub mod validation;

pub use loader::{HolidayError, HolidayLoader};
pub use matcher::{matches, matching, select_active};
pub use normalize::{normalize, normalize_reporting};
pub use schema::{DatePredicate, Holiday, MonthDay, RawHoliday};
pub use validation::{validate_records, ValidationResult};
