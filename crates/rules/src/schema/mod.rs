//! Rule record types.
//!
//! - [`RawHoliday`]: untrusted input, tolerant of any temporal field shape
//! - [`Holiday`]: canonical rule with exactly one [`DatePredicate`]
//! - [`Schedule`]: year / weekday / time-of-day refinement
//! - presentation payload (`Display`, `Content`, `StyleOptions`) carried opaquely

mod date;
mod holiday;
mod payload;
mod raw;
mod schedule;

pub use date::*;
pub use holiday::*;
pub use payload::*;
pub use raw::*;
pub use schedule::*;
