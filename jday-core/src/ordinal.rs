//! Ordinal (day-of-year) numbers
//!
//! Maps (leap flag, month, day) to a 1-based day of the year and back.

use crate::datetime::DateTimeField;
use crate::ConversionError;
use serde::{Deserialize, Serialize};

/// Days in each month (non-leap year)
pub const MONTH_LENGTHS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn days_in_year(is_leap_year: bool) -> u16 {
    if is_leap_year { 366 } else { 365 }
}

/// Days in `month`, or None for a month outside 1-12
pub fn days_in_month(is_leap_year: bool, month: u8) -> Option<u8> {
    let index = usize::from(month).checked_sub(1)?;
    let days = *MONTH_LENGTHS.get(index)?;
    Some(if month == 2 && is_leap_year { days + 1 } else { days })
}

/// 1-based day of the year for `month`/`day`
pub fn to_ordinal(is_leap_year: bool, month: u8, day: u8) -> Result<u16, ConversionError> {
    let month_days = days_in_month(is_leap_year, month)
        .ok_or_else(|| ConversionError::invalid_field(DateTimeField::Month, month))?;
    if day < 1 || day > month_days {
        return Err(ConversionError::invalid_field(DateTimeField::Day, day));
    }

    let preceding: u16 = (1..month)
        .filter_map(|m| days_in_month(is_leap_year, m))
        .map(u16::from)
        .sum();
    Ok(preceding + u16::from(day))
}

/// A month and day within one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u8,
    pub day: u8,
}

/// Where an ordinal falls relative to the year it was computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdinalPosition {
    Within(MonthDay),
    /// Ordinal below 1: the day belongs to the previous year
    Before,
    /// Ordinal past the last day: the day belongs to the next year
    After,
}

impl OrdinalPosition {
    /// -1, 0 or +1 years to move to reach the containing year
    pub fn year_adjustment(&self) -> i8 {
        match self {
            OrdinalPosition::Within(_) => 0,
            OrdinalPosition::Before => -1,
            OrdinalPosition::After => 1,
        }
    }
}

/// Month and day for a 1-based ordinal
///
/// An ordinal outside `1..=days_in_year` comes back as `Before`/`After`; for
/// an ordinal computed correctly this never happens, so callers treat it as a
/// defect rather than a calendar value.
pub fn from_ordinal(is_leap_year: bool, ordinal: i64) -> OrdinalPosition {
    if ordinal < 1 {
        return OrdinalPosition::Before;
    }
    if ordinal > i64::from(days_in_year(is_leap_year)) {
        return OrdinalPosition::After;
    }

    let mut remaining = ordinal;
    for month in 1..=12u8 {
        let month_days = i64::from(days_in_month(is_leap_year, month).unwrap_or(0));
        if remaining <= month_days {
            return OrdinalPosition::Within(MonthDay { month, day: remaining as u8 });
        }
        remaining -= month_days;
    }
    OrdinalPosition::After
}
