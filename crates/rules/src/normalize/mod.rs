//! Normalizer: untrusted [`RawHoliday`] records to canonical [`Holiday`] rules.
//!
//! Each record is validated on its own. Unusable temporal fields are treated
//! as absent; a record left with no usable predicate is dropped. Nothing here
//! returns an error: bad data degrades to "rule not present".

mod fields;


use tracing::debug;

use crate::schema::{DatePredicate, Holiday, RawHoliday};
use crate::validation::ValidationResult;

pub(crate) use fields::{Candidate, Candidates};

/// Normalize a list of records, keeping the relative order of survivors.
pub fn normalize(records: &[RawHoliday]) -> Vec<Holiday> {
    records
        .iter()
        .filter_map(|raw| {
            let holiday = normalize_record(raw);
            if holiday.is_none() {
                debug!(holiday_id = %raw.id, "dropping holiday without a valid date predicate");
            }
            holiday
        })
        .collect()
}

/// Same output as [`normalize`], with a diagnostic for every dropped record
/// and every discarded or shadowed predicate written to `report`.
///
/// Paths take the form `holidays[<index>]` / `holidays[<index>].<field>`.
pub fn normalize_reporting(records: &[RawHoliday], report: &mut ValidationResult) -> Vec<Holiday> {
    let mut out = Vec::with_capacity(records.len());

    for (index, raw) in records.iter().enumerate() {
        let path = format!("holidays[{index}]");
        let candidates = Candidates::read(raw);
        report_candidates(raw, &candidates, &path, report);

        match candidates.into_predicate() {
            Some(predicate) => out.push(build(raw, predicate)),
            None => {
                debug!(holiday_id = %raw.id, "dropping holiday without a valid date predicate");
                report.error(
                    path,
                    format!(
                        "holiday '{}' dropped: no valid `date`, `range` or `multi` predicate",
                        raw.id
                    ),
                );
            }
        }
    }

    out
}

/// Normalize one record, or `None` when it has no usable predicate.
pub(crate) fn normalize_record(raw: &RawHoliday) -> Option<Holiday> {
    let predicate = Candidates::read(raw).into_predicate()?;
    Some(build(raw, predicate))
}

fn build(raw: &RawHoliday, predicate: DatePredicate) -> Holiday {
    Holiday {
        id: raw.id.clone(),
        title: raw.title.clone(),
        active: raw.active.unwrap_or(true),
        priority: raw.priority.unwrap_or(0),
        predicate,
        schedule: raw.schedule.clone(),
        display: raw.display.clone(),
        content: raw.content.clone(),
        style: raw.style.clone(),
        tags: raw.tags.clone(),
        notes: raw.notes.clone(),
    }
}

fn report_candidates(
    raw: &RawHoliday,
    candidates: &Candidates,
    path: &str,
    report: &mut ValidationResult,
) {
    if candidates.single == Candidate::Invalid {
        report.warn(
            format!("{path}.date"),
            "`date` ignored: expected type \"single\" with an integer month 1-12 and day 1-31",
        );
    }
    if candidates.range == Candidate::Invalid {
        report.warn(
            format!("{path}.range"),
            "`range` ignored: `start` and `end` both need an integer month 1-12 and day 1-31",
        );
    }
    match &candidates.multi {
        Candidate::Invalid => report.warn(
            format!("{path}.multi"),
            "`multi` ignored: no entry has an integer month 1-12 and day 1-31",
        ),
        Candidate::Valid(_) if candidates.multi_discarded > 0 => report.warn(
            format!("{path}.multi"),
            format!(
                "{} `multi` entr{} dropped: month must be 1-12 and day 1-31",
                candidates.multi_discarded,
                if candidates.multi_discarded == 1 { "y" } else { "ies" }
            ),
        ),
        _ => {}
    }

    let valid = candidates.valid_fields();
    if let Some((chosen, shadowed)) = valid.split_first() {
        for field in shadowed {
            debug!(holiday_id = %raw.id, chosen = %chosen, shadowed = %field, "predicate shadowed by precedence");
            report.warn(
                format!("{path}.{field}"),
                format!("`{field}` is shadowed by `{chosen}` and never evaluated"),
            );
        }
    }
}
