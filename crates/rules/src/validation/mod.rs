//! Catalog diagnostics with structured errors and suggestions.
//!
//! The engine itself never fails on bad data; this module is the side channel
//! that explains what was dropped or will never match, and why.
//! Errors mark records the normalizer drops; warnings are advisory.

mod fuzzy;
mod record_checks;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_reporting;
use crate::schema::RawHoliday;

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `false` as soon as one error is recorded.
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A record-level problem: the record is dropped or unidentifiable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Location in the catalog, e.g. `"holidays[2].range"`.
    pub path: String,
    pub message: String,
    /// Optional "Did you mean …?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn warn_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }

    /// Append another result, e.g. one per catalog file.
    pub fn merge(&mut self, other: ValidationResult) {
        self.valid &= other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// `true` when there is nothing to report at all.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Lint a list of raw records.
///
/// Reports everything [`normalize_reporting`] does (dropped records,
/// discarded and shadowed predicates) plus checks the normalizer does not
/// act on: empty or duplicate ids, unknown fields, unparseable time windows
/// and out-of-range weekdays.
pub fn validate_records(records: &[RawHoliday]) -> ValidationResult {
    let mut result = ValidationResult::new();
    normalize_reporting(records, &mut result);
    record_checks::validate_ids(records, &mut result);
    for (index, raw) in records.iter().enumerate() {
        let path = format!("holidays[{index}]");
        record_checks::validate_fields(raw, &path, &mut result);
        record_checks::validate_schedule(raw, &path, &mut result);
    }
    result
}
