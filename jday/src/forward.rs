//! Calendar date/time → day number

use crate::config::CalendarCycleConfiguration;
use crate::jdn::JulianDayNumber;
use dashu_int::IBig;
use jday_core::{CalendarDateTime, ConversionError, DateTimeField, Precision, Signum, NANOS_PER_DAY};
use std::cmp::Ordering;
use tracing::{error, trace};

/// Validate `dt` and check its leap flag against the configuration's calendar
pub fn check_date(config: &CalendarCycleConfiguration, dt: &CalendarDateTime) -> Result<(), ConversionError> {
    dt.validate()?;
    let expected = config.variant().is_leap_year(dt.year());
    if dt.is_leap_year() != expected {
        return Err(ConversionError::invalid_field(DateTimeField::LeapYear, dt.is_leap_year()));
    }
    Ok(())
}

/// Day number of the date's boundary interval, ignoring the time of day
pub fn date_day_number(config: &CalendarCycleConfiguration, dt: &CalendarDateTime) -> Result<IBig, ConversionError> {
    check_date(config, dt)?;
    Ok(config.date_day_number(dt.year(), dt.ordinal()))
}

/// Convert `dt` to a day number in the system described by `config`
pub fn to_day_number(
    config: &CalendarCycleConfiguration,
    dt: &CalendarDateTime,
    precision: Precision,
) -> Result<JulianDayNumber, ConversionError> {
    check_date(config, dt)?;

    let epoch_instant = config.epoch().instant(config.variant())?;
    // 23:59:60 folds into the next day, so the field order says nothing about it
    let expected_sign = (!dt.is_leap_second()).then(|| match dt.cmp(&epoch_instant) {
        Ordering::Less => Signum::Negative,
        Ordering::Equal => Signum::Zero,
        Ordering::Greater => Signum::Positive,
    });

    let ordinal = dt.ordinal();
    let date_day = config.date_day_number(dt.year(), ordinal);
    let (day, since_boundary) = split_at_boundary(date_day, dt.nanos_since_midnight(), config.boundary().nanos_after_midnight());

    trace!(
        variant = %config.variant(),
        year = dt.year(),
        ordinal,
        day = %day,
        since_boundary,
        "date placed on the day line"
    );

    let elapsed = &day - IBig::from(config.epoch().first_day_number());
    let actual_sign = match Signum::of(&elapsed) {
        Signum::Zero if since_boundary > 0 => Signum::Positive,
        sign => sign,
    };
    if let Some(expected_sign) = expected_sign.filter(|expected| *expected != actual_sign) {
        error!(
            variant = %config.variant(),
            year = dt.year(),
            ?expected_sign,
            ?actual_sign,
            "day number landed on the wrong side of the epoch"
        );
        return Err(ConversionError::internal(format!(
            "year {} produced a {:?} offset from the epoch, expected {:?}",
            dt.year(),
            actual_sign,
            expected_sign
        )));
    }

    JulianDayNumber::from_day_and_nanos(day, since_boundary, precision)
}

/// Move the start of the day from midnight to `boundary`
///
/// Times before the boundary belong to the previous integer day. A leap
/// second can leave `since_boundary` at a full day, which carries into the
/// next one.
fn split_at_boundary(date_day: IBig, since_midnight: u64, boundary: u64) -> (IBig, u64) {
    let (mut day, mut since_boundary) = if since_midnight >= boundary {
        (date_day, since_midnight - boundary)
    } else {
        (date_day - IBig::ONE, since_midnight + NANOS_PER_DAY - boundary)
    };
    if since_boundary >= NANOS_PER_DAY {
        day += IBig::ONE;
        since_boundary -= NANOS_PER_DAY;
    }
    (day, since_boundary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jday_core::{CalendarVariant, NANOS_PER_HALF_DAY};

    const G: CalendarVariant = CalendarVariant::Gregorian;

    #[test]
    fn test_split_at_noon() {
        let noon = NANOS_PER_HALF_DAY;
        assert_eq!(split_at_boundary(IBig::from(10), 0, noon), (IBig::from(9), noon));
        assert_eq!(split_at_boundary(IBig::from(10), noon, noon), (IBig::from(10), 0));
        assert_eq!(split_at_boundary(IBig::from(10), noon + 1, noon), (IBig::from(10), 1));
    }

    #[test]
    fn test_split_at_midnight() {
        assert_eq!(split_at_boundary(IBig::from(-4), 7, 0), (IBig::from(-4), 7));
        // 23:59:60 is midnight of the next day
        assert_eq!(split_at_boundary(IBig::from(-4), NANOS_PER_DAY, 0), (IBig::from(-3), 0));
    }

    #[test]
    fn test_leap_flag_mismatch_rejected() {
        let config = CalendarCycleConfiguration::julian_day(G);
        let dt = CalendarDateTime::with_leap_flag(true, 2023, 3, 1, 0, 0, 0, 0).unwrap();
        let err = to_day_number(config, &dt, Precision::default()).unwrap_err();
        assert_eq!(err.field(), Some(DateTimeField::LeapYear));
    }

    #[test]
    fn test_date_day_number() {
        let config = CalendarCycleConfiguration::julian_day(G);
        let dt = CalendarDateTime::from_ymd(G, 2000, 1, 1).unwrap();
        assert_eq!(date_day_number(config, &dt).unwrap(), IBig::from(2_451_545));
    }

    #[test]
    fn test_epoch_is_zero() {
        let config = CalendarCycleConfiguration::julian_day(G);
        let dt = CalendarDateTime::new(G, -4713, 11, 24, 12, 0, 0, 0).unwrap();
        let jdn = to_day_number(config, &dt, Precision::default()).unwrap();
        assert_eq!(jdn.sign(), Signum::Zero);

        let dt = CalendarDateTime::new(G, -4713, 11, 24, 11, 59, 59, 999_999_999).unwrap();
        let jdn = to_day_number(config, &dt, Precision::default()).unwrap();
        assert_eq!(jdn.sign(), Signum::Negative);
    }

    #[test]
    fn test_leap_second_before_fixed_epoch() {
        let config = CalendarCycleConfiguration::fixed_day(G);
        let dt = CalendarDateTime::new(G, 0, 12, 31, 23, 59, 60, 0).unwrap();
        let day = to_day_number(config, &dt, Precision::default()).unwrap();
        assert_eq!(day.as_decimal(1), "1.0");
    }
}
