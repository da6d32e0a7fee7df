//! Year-independent calendar dates and the temporal predicate union.

use chrono::Datelike;
use serde::Serialize;

/// Highest day value accepted for any month.
///
/// Day-of-month is not checked against the month's length: `Feb 30` is a
/// valid value that simply never occurs on a real calendar.
pub const MAX_DAY: u8 = 31;

/// A `(month, day)` pair without a year.
///
/// Ordering is lexicographic: month first, then day. Only constructible
/// through [`MonthDay::new`], so `month` is always in `1..=12` and `day`
/// in `1..=31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthDay {
    month: u8,
    day: u8,
}

impl MonthDay {
    /// Build a pair, rejecting out-of-range values.
    pub fn new(month: u8, day: u8) -> Option<Self> {
        if (1..=12).contains(&month) && (1..=MAX_DAY).contains(&day) {
            Some(Self { month, day })
        } else {
            None
        }
    }

    /// The calendar day of a real date.
    pub fn of(date: &impl Datelike) -> Self {
        // chrono guarantees month 1..=12 and day 1..=31.
        Self {
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }

    pub fn month(self) -> u8 {
        self.month
    }

    pub fn day(self) -> u8 {
        self.day
    }
}

/// A `(month, day)` interval, possibly wrapping across the year boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: MonthDay,
    pub end: MonthDay,
    /// Whether `start` and `end` themselves belong to the range.
    pub inclusive: bool,
}

impl DateRange {
    /// `true` when `start` comes after `end`, e.g. Dec 20 to Jan 5.
    ///
    /// Such a range is the union of `start..=Dec 31` and `Jan 1..=end`.
    pub fn wraps(&self) -> bool {
        self.start > self.end
    }
}

/// The single date predicate a canonical rule carries.
///
/// When an input record populates more than one predicate, the normalizer
/// keeps exactly one with precedence `Single > Range > Multi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatePredicate {
    /// One calendar day, every year.
    Single(MonthDay),
    /// An interval of calendar days, every year.
    Range(DateRange),
    /// Any of several calendar days. Never empty.
    Multi(Vec<MonthDay>),
}

impl DatePredicate {
    /// Wire name of the field this predicate is read from.
    pub fn field(&self) -> &'static str {
        match self {
            DatePredicate::Single(_) => "date",
            DatePredicate::Range(_) => "range",
            DatePredicate::Multi(_) => "multi",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn month_day_rejects_out_of_range() {
        assert!(MonthDay::new(0, 1).is_none());
        assert!(MonthDay::new(13, 1).is_none());
        assert!(MonthDay::new(1, 0).is_none());
        assert!(MonthDay::new(1, 32).is_none());
        assert!(MonthDay::new(2, 30).is_some(), "day is not checked against month length");
    }

    #[test]
    fn month_day_orders_by_month_then_day() {
        let jan_31 = MonthDay::new(1, 31).unwrap();
        let feb_1 = MonthDay::new(2, 1).unwrap();
        assert!(jan_31 < feb_1);
        assert!(MonthDay::new(12, 20).unwrap() > MonthDay::new(12, 19).unwrap());
    }

    #[test]
    fn month_day_of_real_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(MonthDay::of(&date), MonthDay::new(12, 25).unwrap());
    }

    #[test]
    fn range_wraps_when_start_after_end() {
        let winter = DateRange {
            start: MonthDay::new(12, 20).unwrap(),
            end: MonthDay::new(1, 5).unwrap(),
            inclusive: true,
        };
        assert!(winter.wraps());

        let summer = DateRange {
            start: MonthDay::new(6, 1).unwrap(),
            end: MonthDay::new(8, 31).unwrap(),
            inclusive: true,
        };
        assert!(!summer.wraps());
    }
}
