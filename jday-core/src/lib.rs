//! jday Core - Fundamental types
//!
//! This crate provides the building blocks shared by the day number
//! converters:
//! - `Number`: Arbitrary precision decimals with exact rounding primitives
//! - `CalendarDateTime`: Validated calendar instants
//! - `CalendarVariant`: Gregorian / Revised Julian leap-year rules
//! - `ordinal`: Day-of-year arithmetic
//! - `ConversionError`: The error taxonomy for validation and conversion

mod number;
mod error;
pub mod datetime;
pub mod leap;
pub mod ordinal;

pub use number::{Number, NumberError, Precision, Signum, SplitNumber, DEFAULT_PRECISION_BITS, MIN_PRECISION_BITS};
pub use error::{ConversionError, Severity, codes};
pub use datetime::{CalendarDateTime, DateTimeField, NANOS_PER_DAY, NANOS_PER_HALF_DAY};
pub use leap::{CalendarVariant, is_leap_year};
pub use ordinal::{MonthDay, OrdinalPosition};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CalendarDateTime, CalendarVariant, ConversionError, DateTimeField, Number, NumberError,
        Precision, Severity, Signum,
    };
    pub use crate::error::codes;
}
