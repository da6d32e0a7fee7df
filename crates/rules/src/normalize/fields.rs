//! Lenient readers for the untyped temporal fields of a [`RawHoliday`].

use serde_json::Value;

use crate::schema::{DatePredicate, DateRange, MonthDay, RawHoliday, SINGLE_TAG};

/// Outcome of reading one temporal field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Candidate<T> {
    /// Field missing, `null`, or an empty `multi` list.
    Absent,
    /// Field present but unusable.
    Invalid,
    Valid(T),
}

impl<T> Candidate<T> {
    pub(crate) fn is_valid(&self) -> bool {
        matches!(self, Candidate::Valid(_))
    }
}

/// All three temporal fields of a record, read independently.
#[derive(Debug, Clone)]
pub(crate) struct Candidates {
    pub(crate) single: Candidate<MonthDay>,
    pub(crate) range: Candidate<DateRange>,
    pub(crate) multi: Candidate<Vec<MonthDay>>,
    /// `multi` entries rejected while at least one other entry survived.
    pub(crate) multi_discarded: usize,
}

impl Candidates {
    pub(crate) fn read(raw: &RawHoliday) -> Self {
        let (multi, multi_discarded) = match &raw.multi {
            Some(value) => read_multi(value),
            None => (Candidate::Absent, 0),
        };
        Self {
            single: raw.date.as_ref().map_or(Candidate::Absent, read_single),
            range: raw.range.as_ref().map_or(Candidate::Absent, read_range),
            multi,
            multi_discarded,
        }
    }

    /// Wire names of the valid fields, in precedence order.
    pub(crate) fn valid_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.single.is_valid() {
            fields.push("date");
        }
        if self.range.is_valid() {
            fields.push("range");
        }
        if self.multi.is_valid() {
            fields.push("multi");
        }
        fields
    }

    /// Pick the winning predicate: single, then range, then multi.
    pub(crate) fn into_predicate(self) -> Option<DatePredicate> {
        if let Candidate::Valid(day) = self.single {
            return Some(DatePredicate::Single(day));
        }
        if let Candidate::Valid(range) = self.range {
            return Some(DatePredicate::Range(range));
        }
        if let Candidate::Valid(days) = self.multi {
            return Some(DatePredicate::Multi(days));
        }
        None
    }
}

/// A JSON number with no fractional part that fits the target range.
///
/// `1` and `1.0` pass; `"1"`, `true`, `null` and `1.5` do not.
fn small_integer(value: Option<&Value>) -> Option<u8> {
    let Value::Number(number) = value? else {
        return None;
    };
    let int = match number.as_i64() {
        Some(i) => i,
        None => {
            let f = number.as_f64()?;
            if !f.is_finite() || f.fract() != 0.0 {
                return None;
            }
            // Saturating cast; anything that large fails the range check below.
            f as i64
        }
    };
    u8::try_from(int).ok()
}

fn read_month_day(value: &Value) -> Option<MonthDay> {
    let month = small_integer(value.get("month"))?;
    let day = small_integer(value.get("day"))?;
    MonthDay::new(month, day)
}

fn read_single(value: &Value) -> Candidate<MonthDay> {
    if value.get("type").and_then(Value::as_str) != Some(SINGLE_TAG) {
        return Candidate::Invalid;
    }
    match read_month_day(value) {
        Some(day) => Candidate::Valid(day),
        None => Candidate::Invalid,
    }
}

fn read_range(value: &Value) -> Candidate<DateRange> {
    let start = value.get("start").and_then(read_month_day);
    let end = value.get("end").and_then(read_month_day);
    match (start, end) {
        (Some(start), Some(end)) => Candidate::Valid(DateRange {
            start,
            end,
            // Anything but an explicit `false` keeps the endpoints.
            inclusive: value
                .get("inclusive")
                .and_then(Value::as_bool)
                .unwrap_or(true),
        }),
        _ => Candidate::Invalid,
    }
}

fn read_multi(value: &Value) -> (Candidate<Vec<MonthDay>>, usize) {
    let Some(entries) = value.as_array() else {
        return (Candidate::Invalid, 0);
    };
    if entries.is_empty() {
        return (Candidate::Absent, 0);
    }
    let days: Vec<MonthDay> = entries.iter().filter_map(read_month_day).collect();
    if days.is_empty() {
        (Candidate::Invalid, 0)
    } else {
        let discarded = entries.len() - days.len();
        (Candidate::Valid(days), discarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn small_integer_accepts_integral_numbers_only() {
        assert_eq!(small_integer(Some(&json!(7))), Some(7));
        assert_eq!(small_integer(Some(&json!(7.0))), Some(7));
        assert_eq!(small_integer(Some(&json!(7.5))), None);
        assert_eq!(small_integer(Some(&json!("7"))), None);
        assert_eq!(small_integer(Some(&json!(true))), None);
        assert_eq!(small_integer(Some(&json!(-1))), None);
        assert_eq!(small_integer(Some(&json!(1e300))), None);
        assert_eq!(small_integer(None), None);
    }

    #[test]
    fn single_requires_tag() {
        assert_eq!(
            read_single(&json!({ "type": "single", "month": 3, "day": 8 })),
            Candidate::Valid(MonthDay::new(3, 8).unwrap())
        );
        assert_eq!(read_single(&json!({ "month": 3, "day": 8 })), Candidate::Invalid);
        assert_eq!(
            read_single(&json!({ "type": "Single", "month": 3, "day": 8 })),
            Candidate::Invalid
        );
        assert_eq!(
            read_single(&json!({ "type": "single", "month": 13, "day": 8 })),
            Candidate::Invalid
        );
    }

    #[test]
    fn range_needs_both_endpoints() {
        let only_start = json!({ "start": { "month": 1, "day": 1 } });
        assert_eq!(read_range(&only_start), Candidate::Invalid);

        let bad_end = json!({ "start": { "month": 1, "day": 1 }, "end": { "month": 2, "day": 0 } });
        assert_eq!(read_range(&bad_end), Candidate::Invalid);
    }

    #[test]
    fn range_inclusive_defaults_to_true() {
        let value = json!({
            "start": { "month": 1, "day": 1 },
            "end": { "month": 1, "day": 7 },
            "inclusive": "no"
        });
        match read_range(&value) {
            Candidate::Valid(range) => assert!(range.inclusive),
            other => panic!("expected valid range, got {other:?}"),
        }

        let exclusive = json!({
            "start": { "month": 1, "day": 1 },
            "end": { "month": 1, "day": 7 },
            "inclusive": false
        });
        match read_range(&exclusive) {
            Candidate::Valid(range) => assert!(!range.inclusive),
            other => panic!("expected valid range, got {other:?}"),
        }
    }

    #[test]
    fn multi_keeps_valid_entries() {
        let value = json!([
            { "month": 5, "day": 1 },
            { "month": 5, "day": 40 },
            "garbage",
            { "month": 5, "day": 19 }
        ]);
        let (candidate, discarded) = read_multi(&value);
        assert_eq!(
            candidate,
            Candidate::Valid(vec![MonthDay::new(5, 1).unwrap(), MonthDay::new(5, 19).unwrap()])
        );
        assert_eq!(discarded, 2);
    }

    #[test]
    fn multi_empty_is_absent_and_all_invalid_is_invalid() {
        assert_eq!(read_multi(&json!([])).0, Candidate::Absent);
        assert_eq!(read_multi(&json!([{ "month": 0, "day": 1 }])).0, Candidate::Invalid);
        assert_eq!(read_multi(&json!({ "month": 1, "day": 1 })).0, Candidate::Invalid);
    }
}
