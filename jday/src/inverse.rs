//! Day number → calendar date/time
//!
//! The integer day is measured from January 1, year 1. Non-negative offsets
//! run the cycle tables forward. Negative offsets first cross the adjusted
//! year(s) directly before the anchor and then run the tables over the
//! mirrored years -1, -2, ... counted backward from December 31.

use crate::anchor::Direction;
use crate::config::CalendarCycleConfiguration;
use crate::cycle;
use crate::jdn::JulianDayNumber;
use dashu_int::{IBig, UBig};
use jday_core::datetime::{NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND};
use jday_core::ordinal::{self, OrdinalPosition};
use jday_core::{CalendarDateTime, CalendarVariant, ConversionError, NANOS_PER_DAY};
use tracing::{error, trace};

/// Convert a day number in the system described by `config` to a date/time
pub fn from_day_number(
    config: &CalendarCycleConfiguration,
    day_number: &JulianDayNumber,
) -> Result<CalendarDateTime, ConversionError> {
    let (day, since_boundary) = day_number.day_and_nanos()?;

    let mut date_day = day;
    let mut since_midnight = since_boundary + config.boundary().nanos_after_midnight();
    if since_midnight >= NANOS_PER_DAY {
        date_day += IBig::ONE;
        since_midnight -= NANOS_PER_DAY;
    }

    let (year, ordinal) = locate_date(config, &date_day)?;
    let variant = config.variant();
    let month_day = match ordinal::from_ordinal(variant.is_leap_year(year), i64::from(ordinal)) {
        OrdinalPosition::Within(month_day) => month_day,
        position => {
            error!(%variant, year, ordinal, ?position, "located ordinal outside its year");
            return Err(ConversionError::internal(format!(
                "ordinal {} is outside year {}",
                ordinal, year
            )));
        }
    };

    let hour = since_midnight / NANOS_PER_HOUR;
    let minute = since_midnight % NANOS_PER_HOUR / NANOS_PER_MINUTE;
    let second = since_midnight % NANOS_PER_MINUTE / NANOS_PER_SECOND;
    let nanosecond = since_midnight % NANOS_PER_SECOND;

    CalendarDateTime::new(
        variant,
        year,
        month_day.month,
        month_day.day,
        hour as u8,
        minute as u8,
        second as u8,
        nanosecond as u32,
    )
}

/// Year and ordinal of the date whose boundary interval starts on `date_day`
pub fn locate_date(config: &CalendarCycleConfiguration, date_day: &IBig) -> Result<(i64, u16), ConversionError> {
    let variant = config.variant();
    let offset = date_day - config.anchor_day_number();

    if offset >= IBig::ZERO {
        let anchor = config.anchor(Direction::Forward);
        let (_, days) = offset.into_parts();
        let (whole_years, ordinal) = locate_in_cycle_run(variant, &days)?;
        let year = checked_year(i128::from(anchor.year) - 1, &whole_years, 1)?;
        trace!(%variant, branch = "forward", year, ordinal, "date located");
        return Ok((year, ordinal));
    }

    let anchor = config.anchor(Direction::Backward);
    let (_, before_anchor) = offset.into_parts();
    let adjusted_days = UBig::from(anchor.adjustment_days);

    if before_anchor <= adjusted_days {
        let year = anchor.last_adjusted_year();
        let ordinal = u16::try_from(&adjusted_days - &before_anchor + UBig::ONE)
            .map_err(|_| ConversionError::internal("adjusted year ordinal does not fit a year"))?;
        trace!(%variant, branch = "adjusted", year, ordinal, "date located");
        return Ok((year, ordinal));
    }

    // 0 is December 31 of the first mirrored year
    let mirrored = before_anchor - adjusted_days - UBig::ONE;
    let (whole_years, mirrored_ordinal) = locate_in_cycle_run(variant, &mirrored)?;
    let year = checked_year(i128::from(anchor.last_adjusted_year()), &whole_years, -1)?;
    let ordinal = variant.days_in_year(year) - mirrored_ordinal + 1;
    trace!(%variant, branch = "backward", year, ordinal, "date located");
    Ok((year, ordinal))
}

/// `base + direction * (whole_years + 1)` as an i64 year
fn checked_year(base: i128, whole_years: &UBig, direction: i128) -> Result<i64, ConversionError> {
    let overflow = || ConversionError::overflow(format!("year {} years from {}", whole_years, base));
    let years = i128::try_from(whole_years.clone()).map_err(|_| overflow())?;
    let year = years
        .checked_add(1)
        .and_then(|n| n.checked_mul(direction))
        .and_then(|n| n.checked_add(base))
        .ok_or_else(overflow)?;
    i64::try_from(year).map_err(|_| overflow())
}

/// Whole years before, and 1-based ordinal within, the year of a cycle run
/// containing 0-based day `days`
fn locate_in_cycle_run(variant: CalendarVariant, days: &UBig) -> Result<(UBig, u16), ConversionError> {
    let candidate = cycle::decompose_days(variant, days);
    let mut run_year = &candidate.whole_years + UBig::ONE;
    let mut ordinal = candidate.remainder_days + 1;

    trace!(
        %variant,
        whole_years = %candidate.whole_years,
        remainder_days = candidate.remainder_days,
        "cycle run decomposed"
    );

    for attempt in 0..2 {
        let is_leap = cycle::run_year_is_leap(variant, &run_year);
        let position = ordinal::from_ordinal(is_leap, ordinal);
        match position {
            OrdinalPosition::Within(_) => {
                // Ordinals within a year always fit u16
                return Ok((run_year - UBig::ONE, ordinal as u16));
            }
            _ if attempt > 0 => {
                error!(%variant, run_year = %run_year, ordinal, ?position, "year correction exceeded one year");
                break;
            }
            OrdinalPosition::Before if run_year > UBig::ONE => {
                run_year -= UBig::ONE;
                let previous_leap = cycle::run_year_is_leap(variant, &run_year);
                ordinal += i64::from(ordinal::days_in_year(previous_leap));
            }
            OrdinalPosition::Before => {
                error!(%variant, ordinal, "remainder points before the start of the cycle run");
                break;
            }
            OrdinalPosition::After => {
                ordinal -= i64::from(ordinal::days_in_year(is_leap));
                run_year += UBig::ONE;
            }
        }
    }

    Err(ConversionError::internal(format!(
        "cycle remainder {} could not be placed within one year of run year {}",
        candidate.remainder_days,
        &candidate.whole_years + UBig::ONE
    )))
}
