//! Whole-year day counting by calendar cycles
//!
//! A run of whole years starting at year 1 (or mirrored, ending at year -1)
//! is decomposed greedily into the calendar's repeating cycles, largest
//! first. Every step is exact integer arithmetic, so the count is exact for
//! any magnitude.
//!
//! The 100-year cycle length assumes the closing century year is common.
//! Centuries the leap rule accepts anyway (every 400th Gregorian year, the
//! 200/600 mod 900 Revised Julian years) add one day each.

use dashu_int::UBig;
use jday_core::CalendarVariant;
use serde::{Deserialize, Serialize};

pub const CENTURY_YEARS: u32 = 100;

/// Number of whole years and their exact day count for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarCycleDefinition {
    pub years_in_cycle: u32,
    pub days_in_cycle: u32,
}

impl CalendarCycleDefinition {
    pub const fn new(years_in_cycle: u32, days_in_cycle: u32) -> Self {
        Self { years_in_cycle, days_in_cycle }
    }

    /// Leap days gained by `count` consecutive cycles counted from the start
    /// of a top-level cycle, beyond what `days_in_cycle` already includes
    pub fn bonus_leap_days(&self, variant: CalendarVariant, count: u64) -> u64 {
        if self.years_in_cycle != CENTURY_YEARS {
            return 0;
        }
        (1..=count)
            .filter(|k| variant.is_leap_year((k * u64::from(CENTURY_YEARS)) as i64))
            .count() as u64
    }
}

pub const GREGORIAN_CYCLES: [CalendarCycleDefinition; 4] = [
    CalendarCycleDefinition::new(400, 146_097),
    CalendarCycleDefinition::new(100, 36_524),
    CalendarCycleDefinition::new(4, 1_461),
    CalendarCycleDefinition::new(1, 365),
];

pub const REVISED_JULIAN_CYCLES: [CalendarCycleDefinition; 4] = [
    CalendarCycleDefinition::new(900, 328_718),
    CalendarCycleDefinition::new(100, 36_524),
    CalendarCycleDefinition::new(4, 1_461),
    CalendarCycleDefinition::new(1, 365),
];

/// Cycle table for `variant`, largest cycle first
pub fn cycles(variant: CalendarVariant) -> &'static [CalendarCycleDefinition; 4] {
    match variant {
        CalendarVariant::Gregorian => &GREGORIAN_CYCLES,
        CalendarVariant::RevisedJulian => &REVISED_JULIAN_CYCLES,
    }
}

/// Values already reduced modulo a top-level cycle (at most a few hundred
/// thousand) always fit.
fn below_top_cycle(value: UBig) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Exact day count of the first `whole_years` years of a cycle run
pub fn total_days(variant: CalendarVariant, whole_years: &UBig) -> UBig {
    let table = cycles(variant);
    let top = &table[0];

    let top_years = UBig::from(top.years_in_cycle);
    let top_count = whole_years / &top_years;
    let mut days = &top_count * UBig::from(top.days_in_cycle);

    let mut remaining = below_top_cycle(whole_years % &top_years);
    let mut below_top = 0u64;
    for cycle in &table[1..] {
        let years = u64::from(cycle.years_in_cycle);
        let count = remaining / years;
        remaining %= years;
        below_top += count * u64::from(cycle.days_in_cycle) + cycle.bonus_leap_days(variant, count);
    }

    days += UBig::from(below_top);
    days
}

/// Reference counter: add up year lengths one year at a time
pub fn total_days_by_iteration(variant: CalendarVariant, whole_years: u64) -> u64 {
    (1..=whole_years)
        .map(|year| u64::from(variant.days_in_year(year as i64)))
        .sum()
}

/// Result of running the cycle table in reverse over a day count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleCandidate {
    /// Whole years that precede the candidate year in the run
    pub whole_years: UBig,
    /// 0-based day within the candidate year; may fall outside the year
    /// by a few days when bonus leap days shifted a boundary
    pub remainder_days: i64,
}

/// Split a 0-based day index of a cycle run into whole years plus a remainder
pub fn decompose_days(variant: CalendarVariant, days: &UBig) -> CycleCandidate {
    let table = cycles(variant);
    let top = &table[0];

    let top_days = UBig::from(top.days_in_cycle);
    let top_count = days / &top_days;
    let whole_top_years = &top_count * UBig::from(top.years_in_cycle);

    let mut remaining = below_top_cycle(days % &top_days) as i64;
    let mut years = 0u64;
    for pair in table.windows(2) {
        let (parent, cycle) = (&pair[0], &pair[1]);
        if remaining < 0 {
            break;
        }
        // The last day of a parent cycle must not spill into an extra sub-cycle
        let cap = u64::from(parent.years_in_cycle / cycle.years_in_cycle) - 1;
        let count = (remaining as u64 / u64::from(cycle.days_in_cycle)).min(cap);
        let consumed = count * u64::from(cycle.days_in_cycle) + cycle.bonus_leap_days(variant, count);
        remaining -= consumed as i64;
        years += count * u64::from(cycle.years_in_cycle);
    }

    CycleCandidate {
        whole_years: whole_top_years + UBig::from(years),
        remainder_days: remaining,
    }
}

/// Leap status of the `run_year`-th year (1-based) of a cycle run
pub fn run_year_is_leap(variant: CalendarVariant, run_year: &UBig) -> bool {
    let top_years = UBig::from(cycles(variant)[0].years_in_cycle);
    variant.is_leap_year(below_top_cycle(run_year % &top_years) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARIANTS: [CalendarVariant; 2] = CalendarVariant::ALL;

    #[test]
    fn test_cycle_lengths_match_leap_rule() {
        for variant in VARIANTS {
            for cycle in cycles(variant) {
                let years = u64::from(cycle.years_in_cycle);
                let expected = total_days_by_iteration(variant, years);
                let nominal = u64::from(cycle.days_in_cycle) + cycle.bonus_leap_days(variant, 1);
                assert_eq!(nominal, expected, "{} cycle of {} years", variant, years);
            }
        }
    }

    #[test]
    fn test_total_days_matches_iteration() {
        for variant in VARIANTS {
            let mut running = 0u64;
            for n in 0..=4_000u64 {
                if n > 0 {
                    running += u64::from(variant.days_in_year(n as i64));
                }
                assert_eq!(
                    total_days(variant, &UBig::from(n)),
                    UBig::from(running),
                    "{} after {} years", variant, n
                );
            }
        }
    }

    #[test]
    fn test_total_days_iteration_reference() {
        assert_eq!(total_days_by_iteration(CalendarVariant::Gregorian, 400), 146_097);
        assert_eq!(total_days_by_iteration(CalendarVariant::RevisedJulian, 900), 328_718);
        assert_eq!(total_days_by_iteration(CalendarVariant::RevisedJulian, 200), 73_049);
        assert_eq!(total_days_by_iteration(CalendarVariant::Gregorian, 0), 0);
    }

    #[test]
    fn test_total_days_huge_interval() {
        for variant in VARIANTS {
            let top = cycles(variant)[0];
            let cycles_count = UBig::from(10u8).pow(30);
            let base = UBig::from(1_234u32);
            let years = &base + &cycles_count * UBig::from(top.years_in_cycle);
            let expected = total_days(variant, &base) + &cycles_count * UBig::from(top.days_in_cycle);
            assert_eq!(total_days(variant, &years), expected);
        }
    }

    #[test]
    fn test_decompose_year_starts() {
        for variant in VARIANTS {
            for n in 0..=2_000u64 {
                let days = total_days(variant, &UBig::from(n));
                let candidate = decompose_days(variant, &days);
                assert_eq!(candidate.whole_years, UBig::from(n), "{} year start {}", variant, n);
                assert_eq!(candidate.remainder_days, 0);
            }
        }
    }

    #[test]
    fn test_decompose_last_day_of_long_cycles() {
        let g = CalendarVariant::Gregorian;
        // Dec 31 of year 400: day 366 of the 400th year
        let candidate = decompose_days(g, &UBig::from(146_096u32));
        assert_eq!(candidate.whole_years, UBig::from(399u32));
        assert_eq!(candidate.remainder_days, 365);

        // Dec 31 of Revised Julian year 600 lands one day short of the year
        let rj = CalendarVariant::RevisedJulian;
        let candidate = decompose_days(rj, &UBig::from(219_145u32));
        assert_eq!(candidate.whole_years, UBig::from(600u32));
        assert_eq!(candidate.remainder_days, -1);
    }

    #[test]
    fn test_run_year_is_leap() {
        let g = CalendarVariant::Gregorian;
        assert!(run_year_is_leap(g, &UBig::from(400u32)));
        assert!(run_year_is_leap(g, &UBig::from(800u32)));
        assert!(!run_year_is_leap(g, &UBig::from(500u32)));
        let rj = CalendarVariant::RevisedJulian;
        assert!(!run_year_is_leap(rj, &UBig::from(900u32)));
        assert!(run_year_is_leap(rj, &UBig::from(1_100u32)));
    }
}
