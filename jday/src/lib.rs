//! jday - Julian Day Numbers for the Gregorian and Revised Julian calendars
//!
//! Converts calendar date/times to arbitrary precision Julian Day Numbers
//! (noon-based) and fixed day numbers (midnight-based, day 1 = January 1,
//! year 1) and back. Whole-year spans are counted exactly with the calendar
//! cycles, so dates millions of years away convert as precisely as today's.
//!
//! ```ignore
//! use jday::prelude::*;
//!
//! let gregorian = Calendar::gregorian();
//! let dt = gregorian.date(2000, 1, 1, 12, 0, 0, 0)?;
//! let jdn = gregorian.to_jdn(&dt)?;
//! assert_eq!(jdn.as_decimal(1), "2451545.0");
//! assert_eq!(gregorian.from_jdn(&jdn)?, dt);
//! ```

pub mod anchor;
pub mod calendar;
pub mod config;
pub mod cycle;
pub mod forward;
pub mod inverse;
pub mod jdn;
pub mod richards;

pub use anchor::{CycleAnchor, Direction, YearSpan};
pub use calendar::{Calendar, Weekday};
pub use config::{CalendarCycleConfiguration, DayBoundary, Epoch};
pub use cycle::{CalendarCycleDefinition, total_days, total_days_by_iteration};
pub use jdn::{FixedDayNumber, JulianDayNumber};
pub use richards::civil_from_julian_day;

pub use jday_core::{
    CalendarDateTime, CalendarVariant, ConversionError, DateTimeField, Number, NumberError,
    Precision, Severity, Signum,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Calendar, FixedDayNumber, JulianDayNumber, Weekday};
    pub use jday_core::prelude::*;
}
