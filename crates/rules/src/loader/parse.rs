//! Catalog file decoding.
//!
//! A catalog is either a top-level sequence of records or a mapping with a
//! `holidays` sequence. Elements are decoded one at a time so a single
//! malformed element cannot take the rest of the file down with it.

use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::schema::RawHoliday;

use super::error::{HolidayError, Result};

/// Supported on-disk encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    /// Detect the format from a file extension (`yml`, `yaml`, `json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Some(CatalogFormat::Yaml),
            Some("json") => Some(CatalogFormat::Json),
            _ => None,
        }
    }
}

/// Records decoded from one catalog document.
#[derive(Debug, Clone, Default)]
pub struct ParsedCatalog {
    pub records: Vec<RawHoliday>,
    /// One message per element that could not be read as a record.
    pub rejected: Vec<String>,
}

/// Decode catalog text.
///
/// Fails only when the text does not parse or its top level is neither a
/// sequence nor a mapping with a `holidays` sequence.
pub fn parse_catalog(contents: &str, format: CatalogFormat) -> Result<ParsedCatalog> {
    if contents.trim().is_empty() {
        return Ok(ParsedCatalog::default());
    }

    let document: Value = match format {
        CatalogFormat::Yaml => serde_yaml::from_str(contents)?,
        CatalogFormat::Json => serde_json::from_str(contents)?,
    };

    let elements = match document {
        Value::Array(elements) => elements,
        Value::Object(mut map) => match map.remove("holidays") {
            Some(Value::Array(elements)) => elements,
            _ => {
                return Err(HolidayError::Validation(
                    "catalog mapping must contain a `holidays` sequence".to_string(),
                ))
            }
        },
        // A YAML document holding only comments.
        Value::Null => Vec::new(),
        _ => {
            return Err(HolidayError::Validation(
                "catalog must be a sequence of holidays".to_string(),
            ))
        }
    };

    let mut parsed = ParsedCatalog::default();
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<RawHoliday>(element) {
            Ok(record) => parsed.records.push(record),
            Err(e) => {
                warn!(index, error = %e, "skipping catalog element that is not a holiday record");
                parsed.rejected.push(format!("holidays[{index}]: {e}"));
            }
        }
    }
    Ok(parsed)
}
