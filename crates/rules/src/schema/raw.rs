//! Untrusted rule records as they arrive from configuration or remote data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::payload::{Content, Display, StyleOptions};
use super::schedule::Schedule;

/// Value of `date.type` that marks a single-day predicate.
pub const SINGLE_TAG: &str = "single";

/// Top-level keys a record understands.
pub const KNOWN_FIELDS: &[&str] = &[
    "id", "title", "active", "date", "range", "multi", "schedule", "display", "content", "style",
    "priority", "tags", "notes",
];

/// A rule record before normalization.
///
/// The temporal fields (`date`, `range`, `multi`) are kept as raw JSON values
/// so that any shape (wrong types, out-of-range numbers, missing keys) is
/// accepted here and judged later by the normalizer. Keys outside
/// [`KNOWN_FIELDS`] are collected in `extra` instead of being rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHoliday {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Expected shape: `{ type: "single", month, day }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    /// Expected shape: `{ start: { month, day }, end: { month, day }, inclusive? }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Value>,
    /// Expected shape: `[{ month, day }, ...]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}
