//! Matcher and resolver: which canonical rule is active at a given instant.
//!
//! The reference instant is always an explicit local wall-clock
//! [`NaiveDateTime`]; nothing in here reads the system clock. Evaluation
//! short-circuits per rule:
//!
//! 1. inactive rules are skipped
//! 2. the date predicate is checked against the instant's `(month, day)`
//! 3. the optional [`Schedule`](crate::schema::Schedule) refines the match
//!
//! Among matches, the highest `priority` wins; ties go to the `id` that sorts
//! first case-insensitively.

mod date;
mod schedule;

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::schema::{Holiday, MonthDay};

use date::date_matches;
use schedule::schedule_matches;

pub use schedule::parse_hm;

/// Whether a single rule is active at `now`.
pub fn matches(holiday: &Holiday, now: NaiveDateTime) -> bool {
    if !holiday.active {
        return false;
    }
    if !date_matches(&holiday.predicate, MonthDay::of(&now)) {
        return false;
    }
    holiday
        .schedule
        .as_ref()
        .map_or(true, |schedule| schedule_matches(schedule, now))
}

/// Every rule active at `now`, best first.
///
/// The sort is stable, so rules whose ids differ only by case keep their
/// list order.
pub fn matching(holidays: &[Holiday], now: NaiveDateTime) -> Vec<&Holiday> {
    let mut matched: Vec<&Holiday> = holidays.iter().filter(|h| matches(h, now)).collect();
    matched.sort_by(|a, b| rank(a, b));
    matched
}

/// The winning rule at `now`, or `None` when nothing matches.
pub fn select_active(holidays: &[Holiday], now: NaiveDateTime) -> Option<&Holiday> {
    let winner = matching(holidays, now).into_iter().next();
    match winner {
        Some(holiday) => {
            debug!(holiday_id = %holiday.id, priority = holiday.priority, %now, "selected holiday")
        }
        None => debug!(%now, candidates = holidays.len(), "no holiday active"),
    }
    winner
}

/// Priority descending, then lower-cased id ascending by code point.
fn rank(a: &Holiday, b: &Holiday) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.id.to_lowercase().cmp(&b.id.to_lowercase()))
}
