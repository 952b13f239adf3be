//! Day-number systems: epoch, day boundary and cycle anchors per calendar
//!
//! A configuration places every calendar date on an integer day line.
//! `anchor_day_number` is the day number of January 1, year 1; the day
//! number of any other date is that plus the signed whole-day offset from
//! the anchor. The offset is counted with the cycle tables, forward for
//! years >= 1 and backward (through year 0) for earlier years.

use crate::anchor::{CycleAnchor, Direction, YearSpan};
use crate::cycle::{self, CalendarCycleDefinition};
use dashu_int::{IBig, UBig};
use jday_core::{CalendarDateTime, CalendarVariant, ConversionError, NANOS_PER_HALF_DAY};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Time of day at which the day number increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Julian day numbers roll over at 12:00
    Noon,
    /// Fixed day numbers roll over at 00:00
    Midnight,
}

impl DayBoundary {
    pub fn nanos_after_midnight(self) -> u64 {
        match self {
            DayBoundary::Noon => NANOS_PER_HALF_DAY,
            DayBoundary::Midnight => 0,
        }
    }
}

/// The calendar instant at which a day-number system reads `first_day_number`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Epoch {
    year: i64,
    month: u8,
    day: u8,
    boundary: DayBoundary,
    first_day_number: i64,
}

impl Epoch {
    /// JDN 0: 24 November 4714 BC (astronomical -4713), noon
    pub const GREGORIAN_JULIAN_DAY: Epoch = Epoch {
        year: -4713,
        month: 11,
        day: 24,
        boundary: DayBoundary::Noon,
        first_day_number: 0,
    };

    /// JDN 0 in the Revised Julian calendar falls one day earlier
    pub const REVISED_JULIAN_JULIAN_DAY: Epoch = Epoch {
        year: -4713,
        month: 11,
        day: 23,
        boundary: DayBoundary::Noon,
        first_day_number: 0,
    };

    /// Fixed day 1 is 1 January, year 1, midnight (both variants)
    pub const FIXED_DAY: Epoch = Epoch {
        year: 1,
        month: 1,
        day: 1,
        boundary: DayBoundary::Midnight,
        first_day_number: 1,
    };

    /// Custom epoch, checked against `variant`
    pub fn new(
        variant: CalendarVariant,
        year: i64,
        month: u8,
        day: u8,
        boundary: DayBoundary,
        first_day_number: i64,
    ) -> Result<Self, ConversionError> {
        CalendarDateTime::from_ymd(variant, year, month, day)?;
        Ok(Self { year, month, day, boundary, first_day_number })
    }

    pub fn julian_day(variant: CalendarVariant) -> Self {
        match variant {
            CalendarVariant::Gregorian => Self::GREGORIAN_JULIAN_DAY,
            CalendarVariant::RevisedJulian => Self::REVISED_JULIAN_JULIAN_DAY,
        }
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn boundary(&self) -> DayBoundary {
        self.boundary
    }

    pub fn first_day_number(&self) -> i64 {
        self.first_day_number
    }

    /// The epoch as a calendar instant (the date at its day boundary)
    pub fn instant(&self, variant: CalendarVariant) -> Result<CalendarDateTime, ConversionError> {
        let hour = match self.boundary {
            DayBoundary::Noon => 12,
            DayBoundary::Midnight => 0,
        };
        CalendarDateTime::new(variant, self.year, self.month, self.day, hour, 0, 0, 0)
    }

    /// Day of the year of the epoch date
    fn ordinal(&self, variant: CalendarVariant) -> u16 {
        let preceding: u16 = (1..self.month)
            .filter_map(|m| variant.days_in_month(self.year, m))
            .map(u16::from)
            .sum();
        preceding + u16::from(self.day)
    }
}

/// Everything a converter needs to map dates to day numbers for one system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCycleConfiguration {
    variant: CalendarVariant,
    epoch: Epoch,
    forward: CycleAnchor,
    backward: CycleAnchor,
    anchor_day_number: IBig,
}

impl CalendarCycleConfiguration {
    pub fn new(variant: CalendarVariant, epoch: Epoch) -> Self {
        let forward = CycleAnchor::new(1, 0, 0);
        // Year 0 sits between the backward anchor and the mirrored cycle run
        let backward = CycleAnchor::new(1, -1, u32::from(variant.days_in_year(0)));

        let mut config = Self {
            variant,
            epoch,
            forward,
            backward,
            anchor_day_number: IBig::ZERO,
        };
        let epoch_offset = config.day_offset(epoch.year, epoch.ordinal(variant));
        config.anchor_day_number = IBig::from(epoch.first_day_number) - epoch_offset;

        debug!(
            variant = %variant,
            epoch_year = epoch.year,
            boundary = ?epoch.boundary,
            anchor_day_number = %config.anchor_day_number,
            "calendar cycle configuration built"
        );
        config
    }

    /// Shared Julian Day Number configuration for `variant`
    pub fn julian_day(variant: CalendarVariant) -> &'static Self {
        match variant {
            CalendarVariant::Gregorian => &GREGORIAN_JULIAN_DAY,
            CalendarVariant::RevisedJulian => &REVISED_JULIAN_JULIAN_DAY,
        }
    }

    /// Shared fixed day number configuration for `variant`
    pub fn fixed_day(variant: CalendarVariant) -> &'static Self {
        match variant {
            CalendarVariant::Gregorian => &GREGORIAN_FIXED_DAY,
            CalendarVariant::RevisedJulian => &REVISED_JULIAN_FIXED_DAY,
        }
    }

    pub fn variant(&self) -> CalendarVariant {
        self.variant
    }

    pub fn epoch(&self) -> &Epoch {
        &self.epoch
    }

    pub fn boundary(&self) -> DayBoundary {
        self.epoch.boundary
    }

    pub fn anchor(&self, direction: Direction) -> &CycleAnchor {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    /// Day number of January 1, year 1
    pub fn anchor_day_number(&self) -> &IBig {
        &self.anchor_day_number
    }

    pub fn cycles(&self) -> &'static [CalendarCycleDefinition; 4] {
        cycle::cycles(self.variant)
    }

    /// Signed days from the anchor's January 1 to January 1 of `year`
    pub fn year_start_offset(&self, year: i64) -> IBig {
        let direction = if year >= self.forward.year {
            Direction::Forward
        } else {
            Direction::Backward
        };
        let anchor = self.anchor(direction);

        let days = match YearSpan::classify(anchor.year, year) {
            YearSpan::Equal => UBig::ZERO,
            YearSpan::Adjacent(Direction::Forward) => UBig::from(self.variant.days_in_year(anchor.year)),
            YearSpan::Adjacent(Direction::Backward) => UBig::from(self.variant.days_in_year(year)),
            YearSpan::Distant(_) => {
                let span = (i128::from(year) - i128::from(anchor.year)).abs();
                let whole_years = (span + i128::from(anchor.adjustment_years)).unsigned_abs();
                cycle::total_days(self.variant, &UBig::from(whole_years))
                    + UBig::from(anchor.adjustment_days)
            }
        };

        match direction {
            Direction::Forward => IBig::from(days),
            Direction::Backward => -IBig::from(days),
        }
    }

    /// Signed days from the anchor to the `ordinal`-th day of `year`
    pub fn day_offset(&self, year: i64, ordinal: u16) -> IBig {
        self.year_start_offset(year) + IBig::from(ordinal) - IBig::ONE
    }

    /// Day number whose boundary interval starts on the given date
    pub fn date_day_number(&self, year: i64, ordinal: u16) -> IBig {
        &self.anchor_day_number + self.day_offset(year, ordinal)
    }
}

static GREGORIAN_JULIAN_DAY: LazyLock<CalendarCycleConfiguration> = LazyLock::new(|| {
    CalendarCycleConfiguration::new(CalendarVariant::Gregorian, Epoch::GREGORIAN_JULIAN_DAY)
});

static REVISED_JULIAN_JULIAN_DAY: LazyLock<CalendarCycleConfiguration> = LazyLock::new(|| {
    CalendarCycleConfiguration::new(CalendarVariant::RevisedJulian, Epoch::REVISED_JULIAN_JULIAN_DAY)
});

static GREGORIAN_FIXED_DAY: LazyLock<CalendarCycleConfiguration> = LazyLock::new(|| {
    CalendarCycleConfiguration::new(CalendarVariant::Gregorian, Epoch::FIXED_DAY)
});

static REVISED_JULIAN_FIXED_DAY: LazyLock<CalendarCycleConfiguration> = LazyLock::new(|| {
    CalendarCycleConfiguration::new(CalendarVariant::RevisedJulian, Epoch::FIXED_DAY)
});

#[cfg(test)]
mod tests {
    use super::*;

    const G: CalendarVariant = CalendarVariant::Gregorian;
    const RJ: CalendarVariant = CalendarVariant::RevisedJulian;

    #[test]
    fn test_anchor_day_numbers() {
        // January 1, year 1 starts JDN 1721426 at noon in both calendars
        assert_eq!(*CalendarCycleConfiguration::julian_day(G).anchor_day_number(), IBig::from(1_721_426));
        assert_eq!(*CalendarCycleConfiguration::julian_day(RJ).anchor_day_number(), IBig::from(1_721_426));
        assert_eq!(*CalendarCycleConfiguration::fixed_day(G).anchor_day_number(), IBig::ONE);
        assert_eq!(*CalendarCycleConfiguration::fixed_day(RJ).anchor_day_number(), IBig::ONE);
    }

    #[test]
    fn test_year_start_offsets_around_anchor() {
        let g = CalendarCycleConfiguration::julian_day(G);
        assert_eq!(g.year_start_offset(1), IBig::ZERO);
        assert_eq!(g.year_start_offset(2), IBig::from(365));
        assert_eq!(g.year_start_offset(3), IBig::from(730));
        assert_eq!(g.year_start_offset(0), IBig::from(-366));
        assert_eq!(g.year_start_offset(-1), IBig::from(-731));

        let rj = CalendarCycleConfiguration::julian_day(RJ);
        assert_eq!(rj.year_start_offset(0), IBig::from(-365));
        assert_eq!(rj.year_start_offset(-1), IBig::from(-730));
    }

    #[test]
    fn test_consecutive_year_starts_differ_by_year_length() {
        for variant in CalendarVariant::ALL {
            let config = CalendarCycleConfiguration::julian_day(variant);
            for year in -2_000i64..=2_000 {
                let step = config.year_start_offset(year + 1) - config.year_start_offset(year);
                assert_eq!(step, IBig::from(variant.days_in_year(year)), "{} year {}", variant, year);
            }
        }
    }

    #[test]
    fn test_epoch_dates_land_on_first_day_number() {
        for variant in CalendarVariant::ALL {
            for config in [
                CalendarCycleConfiguration::julian_day(variant),
                CalendarCycleConfiguration::fixed_day(variant),
            ] {
                let epoch = config.epoch();
                let instant = epoch.instant(variant).unwrap();
                let day = config.date_day_number(epoch.year(), instant.ordinal());
                assert_eq!(day, IBig::from(epoch.first_day_number()));
            }
        }
    }

    #[test]
    fn test_custom_epoch_validation() {
        assert!(Epoch::new(RJ, 2800, 2, 29, DayBoundary::Midnight, 0).is_err());
        let epoch = Epoch::new(G, 1970, 1, 1, DayBoundary::Midnight, 0).unwrap();
        let unix = CalendarCycleConfiguration::new(G, epoch);
        assert_eq!(unix.date_day_number(1970, 1), IBig::ZERO);
        assert_eq!(unix.date_day_number(2000, 1), IBig::from(10_957));
    }

    #[test]
    fn test_boundary_offsets() {
        assert_eq!(DayBoundary::Noon.nanos_after_midnight(), 43_200_000_000_000);
        assert_eq!(DayBoundary::Midnight.nanos_after_midnight(), 0);
    }
}
