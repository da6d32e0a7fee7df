//! The canonical rule record.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::date::DatePredicate;
use super::payload::{Content, Display, StyleOptions};
use super::raw::{RawHoliday, SINGLE_TAG};
use super::schedule::Schedule;

/// A validated holiday rule.
///
/// Always carries exactly one [`DatePredicate`]; records that cannot produce
/// one are dropped by the normalizer and never become a `Holiday`.
///
/// Serializes to the same camelCase wire shape that [`RawHoliday`] reads, and
/// deserializes through the normalizer, so canonical data can be stored and
/// re-read without change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawHoliday", try_from = "RawHoliday")]
pub struct Holiday {
    /// Unique within a list. The resolver's tie-break assumes it.
    pub id: String,
    pub title: Option<String>,
    /// Inactive rules never match.
    pub active: bool,
    /// Higher wins when several rules match at once.
    pub priority: i64,
    pub predicate: DatePredicate,
    pub schedule: Option<Schedule>,
    pub display: Option<Display>,
    pub content: Option<Content>,
    pub style: Option<StyleOptions>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl Holiday {
    /// A bare active rule with priority 0 and no schedule or payload.
    pub fn new(id: impl Into<String>, predicate: DatePredicate) -> Self {
        Self {
            id: id.into(),
            title: None,
            active: true,
            priority: 0,
            predicate,
            schedule: None,
            display: None,
            content: None,
            style: None,
            tags: None,
            notes: None,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

impl TryFrom<RawHoliday> for Holiday {
    type Error = String;

    fn try_from(raw: RawHoliday) -> std::result::Result<Self, Self::Error> {
        crate::normalize::normalize_record(&raw).ok_or_else(|| {
            format!(
                "holiday '{}' has no valid `date`, `range` or `multi` predicate",
                raw.id
            )
        })
    }
}

impl From<&Holiday> for RawHoliday {
    fn from(holiday: &Holiday) -> Self {
        let (date, range, multi) = match &holiday.predicate {
            DatePredicate::Single(day) => (
                Some(json!({ "type": SINGLE_TAG, "month": day.month(), "day": day.day() })),
                None,
                None,
            ),
            DatePredicate::Range(range) => (
                None,
                Some(json!({
                    "start": range.start,
                    "end": range.end,
                    "inclusive": range.inclusive,
                })),
                None,
            ),
            DatePredicate::Multi(days) => (None, None, Some(json!(days))),
        };

        RawHoliday {
            id: holiday.id.clone(),
            title: holiday.title.clone(),
            // Defaults are left implicit on the wire.
            active: (!holiday.active).then_some(false),
            date,
            range,
            multi,
            schedule: holiday.schedule.clone(),
            display: holiday.display.clone(),
            content: holiday.content.clone(),
            style: holiday.style.clone(),
            priority: (holiday.priority != 0).then_some(holiday.priority),
            tags: holiday.tags.clone(),
            notes: holiday.notes.clone(),
            extra: Default::default(),
        }
    }
}

impl From<Holiday> for RawHoliday {
    fn from(holiday: Holiday) -> Self {
        RawHoliday::from(&holiday)
    }
}
