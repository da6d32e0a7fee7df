//! Optional schedule refinement ANDed with a rule's date predicate.

use serde::{Deserialize, Serialize};

/// Year, weekday and time-of-day restrictions.
///
/// Every empty or absent restriction passes. Values are carried as written;
/// out-of-range entries simply never match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Calendar years the rule is limited to. Empty means every year.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub years: Vec<i32>,
    /// ISO weekday numbers, 1 = Monday .. 7 = Sunday. Empty means every day.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
}

/// Local time-of-day window as `"HH:mm"` strings.
///
/// `start > end` wraps past midnight (e.g. `22:00`–`02:00`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}
