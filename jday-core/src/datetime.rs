//! Calendar date/time values
//!
//! `CalendarDateTime` is an immutable instant in a proleptic calendar with
//! astronomical year numbering (year 0 exists) and nanosecond resolution.
//! It can only be built through the validating constructors, so every value
//! in circulation has in-range fields.
//!
//! Second 60 is accepted so leap seconds can be represented; nothing here
//! checks whether a leap second actually happened.

use crate::leap::CalendarVariant;
use crate::ordinal::{self, days_in_month};
use crate::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

pub const NANOS_PER_SECOND: u64 = 1_000_000_000;
pub const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
pub const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;
pub const NANOS_PER_DAY: u64 = 24 * NANOS_PER_HOUR;
pub const NANOS_PER_HALF_DAY: u64 = NANOS_PER_DAY / 2;

const MAX_NANOSECOND: u32 = 999_999_999;

/// Names of the validated fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTimeField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Nanosecond,
    /// Caller-supplied leap flag that disagrees with the calendar
    LeapYear,
}

impl DateTimeField {
    pub fn name(self) -> &'static str {
        match self {
            DateTimeField::Year => "year",
            DateTimeField::Month => "month",
            DateTimeField::Day => "day",
            DateTimeField::Hour => "hour",
            DateTimeField::Minute => "minute",
            DateTimeField::Second => "second",
            DateTimeField::Nanosecond => "nanosecond",
            DateTimeField::LeapYear => "leap year flag",
        }
    }
}

impl fmt::Display for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Check every field and return all violations, in field order
pub fn validate_all(
    is_leap_year: bool,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
) -> Vec<ConversionError> {
    let mut errors = Vec::new();

    match days_in_month(is_leap_year, month) {
        None => {
            errors.push(ConversionError::invalid_field(DateTimeField::Month, month));
            // Without a month only the absolute day range can be checked
            if day < 1 || day > 31 {
                errors.push(ConversionError::invalid_field(DateTimeField::Day, day));
            }
        }
        Some(max_day) => {
            if day < 1 || day > max_day {
                errors.push(ConversionError::invalid_field(DateTimeField::Day, day));
            }
        }
    }
    if hour > 23 {
        errors.push(ConversionError::invalid_field(DateTimeField::Hour, hour));
    }
    if minute > 59 {
        errors.push(ConversionError::invalid_field(DateTimeField::Minute, minute));
    }
    if second > 60 {
        errors.push(ConversionError::invalid_field(DateTimeField::Second, second));
    }
    if nanosecond > MAX_NANOSECOND {
        errors.push(ConversionError::invalid_field(DateTimeField::Nanosecond, nanosecond));
    }

    errors
}

/// Check every field and report the first violation
pub fn validate(
    is_leap_year: bool,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
) -> Result<(), ConversionError> {
    match validate_all(is_leap_year, month, day, hour, minute, second, nanosecond)
        .into_iter()
        .next()
    {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// ============================================================================
// CalendarDateTime
// ============================================================================

/// A validated calendar date and time of day
///
/// Field order makes the derived `Ord` chronological within one calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDateTime {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
    is_leap_year: bool,
}

impl CalendarDateTime {
    // ========== Construction ==========

    /// Create a datetime, taking the leap flag from `variant`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        variant: CalendarVariant,
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> Result<Self, ConversionError> {
        let is_leap_year = variant.is_leap_year(year);
        Self::with_leap_flag(is_leap_year, year, month, day, hour, minute, second, nanosecond)
    }

    /// Create a datetime with a caller-supplied leap flag
    ///
    /// The day range follows the flag. Converters check the flag against
    /// their calendar's rule before using the value.
    #[allow(clippy::too_many_arguments)]
    pub fn with_leap_flag(
        is_leap_year: bool,
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> Result<Self, ConversionError> {
        validate(is_leap_year, month, day, hour, minute, second, nanosecond)?;
        Ok(Self { year, month, day, hour, minute, second, nanosecond, is_leap_year })
    }

    /// Create a date (time = 00:00:00)
    pub fn from_ymd(variant: CalendarVariant, year: i64, month: u8, day: u8) -> Result<Self, ConversionError> {
        Self::new(variant, year, month, day, 0, 0, 0, 0)
    }

    /// Create a datetime without fractional seconds
    #[allow(clippy::too_many_arguments)]
    pub fn from_ymd_hms(
        variant: CalendarVariant,
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, ConversionError> {
        Self::new(variant, year, month, day, hour, minute, second, 0)
    }

    // ========== Accessors ==========

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    pub fn is_leap_year(&self) -> bool {
        self.is_leap_year
    }

    /// True for 23:59:60-style values
    pub fn is_leap_second(&self) -> bool {
        self.second == 60
    }

    /// Day of the year (1-366)
    pub fn ordinal(&self) -> u16 {
        // Fields were validated on construction
        ordinal::to_ordinal(self.is_leap_year, self.month, self.day).unwrap_or(0)
    }

    /// Nanoseconds since midnight
    ///
    /// A leap second can push this past `NANOS_PER_DAY`.
    pub fn nanos_since_midnight(&self) -> u64 {
        u64::from(self.hour) * NANOS_PER_HOUR
            + u64::from(self.minute) * NANOS_PER_MINUTE
            + u64::from(self.second) * NANOS_PER_SECOND
            + u64::from(self.nanosecond)
    }

    /// Revalidate the fields (useful for values that came through serde)
    pub fn validate(&self) -> Result<(), ConversionError> {
        validate(
            self.is_leap_year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.nanosecond,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: CalendarVariant = CalendarVariant::Gregorian;
    const RJ: CalendarVariant = CalendarVariant::RevisedJulian;

    #[test]
    fn test_from_ymd() {
        let dt = CalendarDateTime::from_ymd(G, 2025, 6, 15).unwrap();
        assert_eq!(dt.year(), 2025);
        assert_eq!(dt.month(), 6);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 0);
        assert!(!dt.is_leap_year());
    }

    #[test]
    fn test_year_zero_and_negative() {
        let dt = CalendarDateTime::from_ymd(G, 0, 2, 29).unwrap();
        assert!(dt.is_leap_year());
        assert!(CalendarDateTime::from_ymd(RJ, 0, 2, 29).is_err());
        assert!(CalendarDateTime::from_ymd(G, -4713, 11, 24).is_ok());
    }

    #[test]
    fn test_february_29_depends_on_variant() {
        assert!(CalendarDateTime::from_ymd(G, 2800, 2, 29).is_ok());
        assert!(CalendarDateTime::from_ymd(RJ, 2800, 2, 29).is_err());
        assert!(CalendarDateTime::from_ymd(G, 2900, 2, 29).is_err());
        assert!(CalendarDateTime::from_ymd(RJ, 2900, 2, 29).is_ok());
    }

    #[test]
    fn test_leap_second_accepted() {
        let dt = CalendarDateTime::new(G, 2016, 12, 31, 23, 59, 60, 0).unwrap();
        assert!(dt.is_leap_second());
        assert_eq!(dt.nanos_since_midnight(), NANOS_PER_DAY);
        assert!(CalendarDateTime::new(G, 2016, 12, 31, 23, 59, 61, 0).is_err());
    }

    #[test]
    fn test_validate_reports_first_field() {
        let err = validate(false, 13, 40, 25, 0, 0, 0).unwrap_err();
        assert_eq!(err.field(), Some(DateTimeField::Month));

        let err = validate(false, 1, 1, 24, 0, 0, 0).unwrap_err();
        assert_eq!(err, ConversionError::invalid_field(DateTimeField::Hour, 24u8));
    }

    #[test]
    fn test_validate_all_reports_every_field() {
        let errors = validate_all(false, 2, 30, 24, 60, 61, 1_000_000_000);
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field()).collect();
        assert_eq!(
            fields,
            vec![
                DateTimeField::Day,
                DateTimeField::Hour,
                DateTimeField::Minute,
                DateTimeField::Second,
                DateTimeField::Nanosecond,
            ]
        );
        assert!(validate_all(true, 2, 29, 23, 59, 60, 999_999_999).is_empty());
    }

    #[test]
    fn test_caller_supplied_leap_flag() {
        // The flag drives the day range, whatever the year
        assert!(CalendarDateTime::with_leap_flag(true, 2023, 2, 29, 0, 0, 0, 0).is_ok());
        assert!(CalendarDateTime::with_leap_flag(false, 2024, 2, 29, 0, 0, 0, 0).is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = CalendarDateTime::new(G, -1, 12, 31, 23, 59, 59, 999_999_999).unwrap();
        let b = CalendarDateTime::new(G, 0, 1, 1, 0, 0, 0, 0).unwrap();
        let c = CalendarDateTime::new(G, 0, 1, 1, 0, 0, 0, 1).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(CalendarDateTime::from_ymd(G, 2024, 12, 31).unwrap().ordinal(), 366);
        assert_eq!(CalendarDateTime::from_ymd(G, 2025, 12, 31).unwrap().ordinal(), 365);
    }

    #[test]
    fn test_serde_roundtrip() {
        let dt = CalendarDateTime::new(RJ, -4713, 11, 23, 12, 0, 0, 5).unwrap();
        let json = serde_json::to_string(&dt).unwrap();
        let back: CalendarDateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(dt, back);
        assert!(back.validate().is_ok());
    }
}
