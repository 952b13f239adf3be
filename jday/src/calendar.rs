//! Per-variant conversion facade

use crate::config::CalendarCycleConfiguration;
use crate::cycle;
use crate::forward;
use crate::inverse;
use crate::jdn::{FixedDayNumber, JulianDayNumber};
use dashu_int::{IBig, UBig};
use jday_core::{CalendarDateTime, CalendarVariant, ConversionError, Precision};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Weekday of the noon-to-noon day `jdn` (JDN 0 was a Monday)
    pub fn from_julian_day(jdn: &IBig) -> Self {
        let mut index = jdn % IBig::from(7);
        if index < IBig::ZERO {
            index += IBig::from(7);
        }
        let index = usize::try_from(index).unwrap_or(0);
        Self::ALL[index]
    }

    /// 1 (Monday) through 7 (Sunday)
    pub fn number_from_monday(self) -> u8 {
        self as u8 + 1
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Conversions for one calendar variant at a chosen precision
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    variant: CalendarVariant,
    precision: Precision,
    julian_day: &'static CalendarCycleConfiguration,
    fixed_day: &'static CalendarCycleConfiguration,
}

impl Calendar {
    pub fn new(variant: CalendarVariant) -> Self {
        Self {
            variant,
            precision: Precision::default(),
            julian_day: CalendarCycleConfiguration::julian_day(variant),
            fixed_day: CalendarCycleConfiguration::fixed_day(variant),
        }
    }

    pub fn gregorian() -> Self {
        Self::new(CalendarVariant::Gregorian)
    }

    pub fn revised_julian() -> Self {
        Self::new(CalendarVariant::RevisedJulian)
    }

    /// Precision used for fractional days
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn variant(&self) -> CalendarVariant {
        self.variant
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Build a date/time in this calendar
    #[allow(clippy::too_many_arguments)]
    pub fn date(
        &self,
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> Result<CalendarDateTime, ConversionError> {
        CalendarDateTime::new(self.variant, year, month, day, hour, minute, second, nanosecond)
    }

    pub fn is_leap_year(&self, year: i64) -> bool {
        self.variant.is_leap_year(year)
    }

    pub fn to_jdn(&self, dt: &CalendarDateTime) -> Result<JulianDayNumber, ConversionError> {
        forward::to_day_number(self.julian_day, dt, self.precision)
    }

    pub fn from_jdn(&self, jdn: &JulianDayNumber) -> Result<CalendarDateTime, ConversionError> {
        inverse::from_day_number(self.julian_day, jdn)
    }

    /// Midnight-based day number; January 1, year 1 is day 1
    pub fn to_fixed(&self, dt: &CalendarDateTime) -> Result<FixedDayNumber, ConversionError> {
        forward::to_day_number(self.fixed_day, dt, self.precision)
    }

    pub fn from_fixed(&self, fixed: &FixedDayNumber) -> Result<CalendarDateTime, ConversionError> {
        inverse::from_day_number(self.fixed_day, fixed)
    }

    pub fn to_ordinal_day(&self, dt: &CalendarDateTime) -> Result<u16, ConversionError> {
        forward::check_date(self.julian_day, dt)?;
        Ok(dt.ordinal())
    }

    /// Exact days in years 1 through `whole_years`
    pub fn total_days_for_whole_years(&self, whole_years: &UBig) -> UBig {
        cycle::total_days(self.variant, whole_years)
    }

    pub fn weekday(&self, dt: &CalendarDateTime) -> Result<Weekday, ConversionError> {
        let day = forward::date_day_number(self.julian_day, dt)?;
        Ok(Weekday::from_julian_day(&day))
    }

    /// The same instant expressed in `target`'s calendar
    pub fn convert(&self, dt: &CalendarDateTime, target: &Calendar) -> Result<CalendarDateTime, ConversionError> {
        let jdn = self.to_jdn(dt)?;
        target.from_jdn(&jdn)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::gregorian()
    }
}
