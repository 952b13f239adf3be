//! Calendar variants and their leap-year rules
//!
//! Both rules look at `|year|` only, so year -k is a leap year exactly when
//! year k is. Year 0 is a leap year in the Gregorian calendar but not in the
//! Revised Julian one (0 mod 900 is neither 200 nor 600).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Proleptic calendar variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarVariant {
    Gregorian,
    RevisedJulian,
}

impl CalendarVariant {
    pub const ALL: [CalendarVariant; 2] = [CalendarVariant::Gregorian, CalendarVariant::RevisedJulian];

    pub fn name(self) -> &'static str {
        match self {
            CalendarVariant::Gregorian => "gregorian",
            CalendarVariant::RevisedJulian => "revised_julian",
        }
    }

    /// Leap-year oracle for this variant
    pub fn is_leap_year(self, year: i64) -> bool {
        let year = year.unsigned_abs();
        if year % 4 != 0 {
            return false;
        }
        if year % 100 != 0 {
            return true;
        }
        match self {
            CalendarVariant::Gregorian => year % 400 == 0,
            CalendarVariant::RevisedJulian => matches!(year % 900, 200 | 600),
        }
    }

    pub fn days_in_year(self, year: i64) -> u16 {
        crate::ordinal::days_in_year(self.is_leap_year(year))
    }

    /// Days in `month` of `year`, or None for a month outside 1-12
    pub fn days_in_month(self, year: i64, month: u8) -> Option<u8> {
        crate::ordinal::days_in_month(self.is_leap_year(year), month)
    }
}

impl fmt::Display for CalendarVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Leap-year oracle as a free function
pub fn is_leap_year(variant: CalendarVariant, year: i64) -> bool {
    variant.is_leap_year(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Divisibility rules written out literally
    fn by_definition(variant: CalendarVariant, year: i64) -> bool {
        let y = year.abs();
        let div4 = y % 4 == 0;
        let div100 = y % 100 == 0;
        match variant {
            CalendarVariant::Gregorian => div4 && (!div100 || y % 400 == 0),
            CalendarVariant::RevisedJulian => {
                div4 && (!div100 || (div100 && (y % 900 == 200 || y % 900 == 600)))
            }
        }
    }

    #[test]
    fn test_gregorian_leap_years() {
        let g = CalendarVariant::Gregorian;
        assert!(g.is_leap_year(2000));
        assert!(g.is_leap_year(2024));
        assert!(!g.is_leap_year(1900));
        assert!(!g.is_leap_year(2023));
        assert!(g.is_leap_year(0));
        assert!(g.is_leap_year(-4));
        assert!(!g.is_leap_year(-100));
        assert!(g.is_leap_year(-400));
    }

    #[test]
    fn test_revised_julian_leap_years() {
        let rj = CalendarVariant::RevisedJulian;
        assert!(rj.is_leap_year(2000));
        assert!(rj.is_leap_year(2400));
        assert!(!rj.is_leap_year(2800));
        assert!(rj.is_leap_year(2900));
        assert!(!rj.is_leap_year(0));
        assert!(!rj.is_leap_year(900));
        assert!(rj.is_leap_year(-200));
        assert!(rj.is_leap_year(-600));
    }

    #[test]
    fn test_oracle_matches_definition() {
        for variant in CalendarVariant::ALL {
            for year in -5_000..=5_000 {
                assert_eq!(
                    variant.is_leap_year(year),
                    by_definition(variant, year),
                    "{} year {}", variant, year
                );
            }
            for year in [i64::MAX, i64::MIN + 1, 1_000_000_000_000, -999_999_999_600] {
                assert_eq!(variant.is_leap_year(year), by_definition(variant, year));
            }
        }
    }

    #[test]
    fn test_extreme_years_do_not_panic() {
        assert!(!CalendarVariant::Gregorian.is_leap_year(i64::MIN + 1));
        let _ = CalendarVariant::RevisedJulian.is_leap_year(i64::MIN);
    }

    #[test]
    fn test_days_in_year() {
        assert_eq!(CalendarVariant::Gregorian.days_in_year(0), 366);
        assert_eq!(CalendarVariant::RevisedJulian.days_in_year(0), 365);
        assert_eq!(CalendarVariant::Gregorian.days_in_month(2024, 2), Some(29));
        assert_eq!(CalendarVariant::Gregorian.days_in_month(2024, 13), None);
    }
}
