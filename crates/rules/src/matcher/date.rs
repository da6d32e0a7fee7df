//! Date predicate evaluation against a calendar day.

use crate::schema::{DatePredicate, DateRange, MonthDay};

pub(super) fn date_matches(predicate: &DatePredicate, today: MonthDay) -> bool {
    match predicate {
        DatePredicate::Single(day) => *day == today,
        DatePredicate::Range(range) => range_contains(range, today),
        DatePredicate::Multi(days) => days.contains(&today),
    }
}

/// Range membership, splitting a wrapping range into its two arcs.
fn range_contains(range: &DateRange, today: MonthDay) -> bool {
    let DateRange { start, end, inclusive } = *range;

    if range.wraps() {
        // start..=Dec 31 or Jan 1..=end
        if inclusive {
            today >= start || today <= end
        } else {
            today > start || today < end
        }
    } else if inclusive {
        start <= today && today <= end
    } else {
        start < today && today < end
    }
}
