//! Cycle anchors and the year-span classification used to pick a counting path

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which way a count runs from its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// A January 1 from which whole years are counted with the cycle tables
///
/// `adjustment_years` and `adjustment_days` describe the part of the span
/// that is not a plain cycle run. Counting backward from year 1 crosses year
/// 0 first, so the backward anchor skips one year and adds its length as
/// days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleAnchor {
    pub year: i64,
    pub adjustment_years: i64,
    pub adjustment_days: u32,
}

impl CycleAnchor {
    pub const fn new(year: i64, adjustment_years: i64, adjustment_days: u32) -> Self {
        Self { year, adjustment_years, adjustment_days }
    }

    /// Last year covered by the adjustment rather than by the cycle run
    pub fn last_adjusted_year(&self) -> i64 {
        self.year + self.adjustment_years
    }
}

/// How far a target year lies from an anchor year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearSpan {
    /// Same year: nothing to count
    Equal,
    /// One year apart: a single year length
    Adjacent(Direction),
    /// Further apart: count with the cycle tables
    Distant(Direction),
}

impl YearSpan {
    pub fn classify(anchor_year: i64, target_year: i64) -> Self {
        let distance = (i128::from(target_year) - i128::from(anchor_year)).unsigned_abs();
        let direction = match target_year.cmp(&anchor_year) {
            Ordering::Equal => return YearSpan::Equal,
            Ordering::Greater => Direction::Forward,
            Ordering::Less => Direction::Backward,
        };
        if distance == 1 {
            YearSpan::Adjacent(direction)
        } else {
            YearSpan::Distant(direction)
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            YearSpan::Equal => None,
            YearSpan::Adjacent(direction) | YearSpan::Distant(direction) => Some(*direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(YearSpan::classify(1, 1), YearSpan::Equal);
        assert_eq!(YearSpan::classify(1, 2), YearSpan::Adjacent(Direction::Forward));
        assert_eq!(YearSpan::classify(1, 0), YearSpan::Adjacent(Direction::Backward));
        assert_eq!(YearSpan::classify(1, 2025), YearSpan::Distant(Direction::Forward));
        assert_eq!(YearSpan::classify(1, -4713), YearSpan::Distant(Direction::Backward));
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(YearSpan::classify(i64::MIN, i64::MAX), YearSpan::Distant(Direction::Forward));
        assert_eq!(YearSpan::classify(i64::MAX, i64::MIN).direction(), Some(Direction::Backward));
        assert_eq!(YearSpan::Equal.direction(), None);
    }

    #[test]
    fn test_last_adjusted_year() {
        assert_eq!(CycleAnchor::new(1, -1, 366).last_adjusted_year(), 0);
        assert_eq!(CycleAnchor::new(1, 0, 0).last_adjusted_year(), 1);
    }
}
