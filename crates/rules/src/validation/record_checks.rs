//! Per-record checks the normalizer does not act on.

use std::collections::HashMap;

use crate::matcher::parse_hm;
use crate::schema::{RawHoliday, KNOWN_FIELDS};

use super::fuzzy::fuzzy_match;
use super::ValidationResult;

/// Empty ids are errors; case-insensitive duplicates are warnings because
/// the resolver's tie-break assumes ids are unique.
pub(super) fn validate_ids(records: &[RawHoliday], result: &mut ValidationResult) {
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (index, raw) in records.iter().enumerate() {
        let path = format!("holidays[{index}].id");
        if raw.id.trim().is_empty() {
            result.error(path, "`id` must not be empty");
            continue;
        }
        let key = raw.id.to_lowercase();
        match seen.get(&key) {
            Some(first) => result.warn(
                path,
                format!(
                    "duplicate id '{}' (case-insensitive) also used by holidays[{first}]; \
                     ties between them resolve by list order",
                    raw.id
                ),
            ),
            None => {
                seen.insert(key, index);
            }
        }
    }
}

/// Unknown top-level keys, with a suggestion when one is a likely typo.
pub(super) fn validate_fields(raw: &RawHoliday, path: &str, result: &mut ValidationResult) {
    for key in raw.extra.keys() {
        let field_path = format!("{path}.{key}");
        let message = format!("unknown field `{key}` is ignored");
        match fuzzy_match(key, KNOWN_FIELDS) {
            Some(suggestion) => {
                result.warn_with_suggestion(field_path, message, format!("Did you mean '{suggestion}'?"))
            }
            None => result.warn(field_path, message),
        }
    }
}

/// Schedule entries that make a rule unable to ever match.
pub(super) fn validate_schedule(raw: &RawHoliday, path: &str, result: &mut ValidationResult) {
    let Some(schedule) = &raw.schedule else {
        return;
    };

    for day in &schedule.days_of_week {
        if !(1..=7).contains(day) {
            result.warn(
                format!("{path}.schedule.daysOfWeek"),
                format!("weekday {day} is outside 1 (Monday) .. 7 (Sunday) and never matches"),
            );
        }
    }

    if let Some(window) = &schedule.time_window {
        for (field, value) in [("start", &window.start), ("end", &window.end)] {
            if parse_hm(value).is_none() {
                result.warn(
                    format!("{path}.schedule.timeWindow.{field}"),
                    format!("'{value}' is not a valid HH:mm time; holiday '{}' can never match", raw.id),
                );
            }
        }
    }
}
