//! Schedule refinement: years, ISO weekdays and the time-of-day window.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::schema::{Schedule, TimeWindow};

/// Minutes since midnight for an `"HH:mm"` string.
///
/// Accepts one or two hour digits and exactly two minute digits after
/// trimming surrounding whitespace; hour must be 0–23 and minute 0–59.
pub fn parse_hm(text: &str) -> Option<u32> {
    let (hours, minutes) = text.trim().split_once(':')?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&hours.len()) || minutes.len() != 2 || !digits(hours) || !digits(minutes)
    {
        return None;
    }
    let h: u32 = hours.parse().ok()?;
    let m: u32 = minutes.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// `true` when every present restriction accepts `now`.
pub(super) fn schedule_matches(schedule: &Schedule, now: NaiveDateTime) -> bool {
    if !schedule.years.is_empty() && !schedule.years.contains(&now.year()) {
        return false;
    }

    if !schedule.days_of_week.is_empty() {
        let iso = now.weekday().number_from_monday();
        if !schedule.days_of_week.iter().any(|&d| u32::from(d) == iso) {
            return false;
        }
    }

    match &schedule.time_window {
        Some(window) => window_contains(window, now),
        None => true,
    }
}

/// Window membership by minute of day. A malformed bound never matches.
fn window_contains(window: &TimeWindow, now: NaiveDateTime) -> bool {
    let (Some(start), Some(end)) = (parse_hm(&window.start), parse_hm(&window.end)) else {
        return false;
    };
    let minute = now.hour() * 60 + now.minute();

    if start <= end {
        start <= minute && minute <= end
    } else {
        // wraps past midnight
        minute >= start || minute <= end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    fn window(start: &str, end: &str) -> Schedule {
        Schedule {
            time_window: Some(TimeWindow::new(start, end)),
            ..Schedule::default()
        }
    }

    #[test]
    fn parse_hm_valid() {
        assert_eq!(parse_hm("00:00"), Some(0));
        assert_eq!(parse_hm("9:05"), Some(545));
        assert_eq!(parse_hm(" 23:59 "), Some(1439));
    }

    #[test]
    fn parse_hm_invalid() {
        for text in ["25:00", "24:00", "12:60", "12:5", "123:00", "ab:cd", "1200", "", ":30", "+1:30"] {
            assert_eq!(parse_hm(text), None, "{text:?}");
        }
    }

    #[test]
    fn empty_schedule_passes() {
        assert!(schedule_matches(&Schedule::default(), at(2024, 1, 1, 0, 0)));
    }

    #[test]
    fn years_restrict() {
        let schedule = Schedule {
            years: vec![2024, 2026],
            ..Schedule::default()
        };
        assert!(schedule_matches(&schedule, at(2024, 3, 1, 12, 0)));
        assert!(!schedule_matches(&schedule, at(2025, 3, 1, 12, 0)));
    }

    #[test]
    fn iso_weekdays_restrict() {
        // 2024-03-04 is a Monday, 2024-03-10 a Sunday.
        let schedule = Schedule {
            days_of_week: vec![1, 7],
            ..Schedule::default()
        };
        assert!(schedule_matches(&schedule, at(2024, 3, 4, 9, 0)));
        assert!(schedule_matches(&schedule, at(2024, 3, 10, 9, 0)));
        assert!(!schedule_matches(&schedule, at(2024, 3, 6, 9, 0)));
    }

    #[test]
    fn same_day_window_is_inclusive() {
        let schedule = window("09:00", "17:30");
        assert!(schedule_matches(&schedule, at(2024, 5, 1, 9, 0)));
        assert!(schedule_matches(&schedule, at(2024, 5, 1, 17, 30)));
        assert!(!schedule_matches(&schedule, at(2024, 5, 1, 8, 59)));
        assert!(!schedule_matches(&schedule, at(2024, 5, 1, 17, 31)));
    }

    #[test]
    fn window_wraps_past_midnight() {
        let schedule = window("22:00", "02:00");
        assert!(schedule_matches(&schedule, at(2024, 5, 1, 23, 30)));
        assert!(schedule_matches(&schedule, at(2024, 5, 1, 1, 0)));
        assert!(!schedule_matches(&schedule, at(2024, 5, 1, 2, 1)));
        assert!(!schedule_matches(&schedule, at(2024, 5, 1, 21, 59)));
    }

    #[test]
    fn malformed_window_never_matches() {
        let schedule = window("25:00", "02:00");
        for hour in 0..24 {
            assert!(!schedule_matches(&schedule, at(2024, 5, 1, hour, 0)));
        }
    }
}
