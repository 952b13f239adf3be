//! Richards' closed-form conversion of a Julian Day Number to a Gregorian date
//!
//! E. G. Richards' conversion with the Gregorian correction term. Divisions
//! are floor divisions, which keeps the formula valid for negative day
//! numbers and years.

const Y: i128 = 4716;
const J: i128 = 1401;
const M: i128 = 2;
const N: i128 = 12;
const R: i128 = 4;
const P: i128 = 1461;
const V: i128 = 3;
const U: i128 = 5;
const S: i128 = 153;
const W: i128 = 2;
const B: i128 = 274_277;
const C: i128 = -38;

/// Gregorian (year, month, day) whose noon carries `jdn`
pub fn civil_from_julian_day(jdn: i64) -> (i64, u8, u8) {
    let j = i128::from(jdn);
    let f = j + J + ((4 * j + B).div_euclid(146_097) * 3).div_euclid(4) + C;
    let e = R * f + V;
    let g = e.rem_euclid(P).div_euclid(R);
    let h = U * g + W;
    let day = h.rem_euclid(S).div_euclid(U) + 1;
    let month = (h.div_euclid(S) + M).rem_euclid(N) + 1;
    let year = e.div_euclid(P) - Y + (N + M - month).div_euclid(N);
    // |year| stays below |jdn| / 365 + 4716, so the narrowing is lossless
    (year as i64, month as u8, day as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_dates() {
        assert_eq!(civil_from_julian_day(2_451_545), (2000, 1, 1));
        assert_eq!(civil_from_julian_day(0), (-4713, 11, 24));
        assert_eq!(civil_from_julian_day(1_721_426), (1, 1, 1));
        assert_eq!(civil_from_julian_day(1_721_060), (0, 1, 1));
        assert_eq!(civil_from_julian_day(2_743_799), (2800, 3, 1));
    }

    #[test]
    fn test_negative_day_numbers() {
        assert_eq!(civil_from_julian_day(-1), (-4713, 11, 23));
        assert_eq!(civil_from_julian_day(-1_000_000), (-7451, 12, 28));
    }

    #[test]
    fn test_consecutive_days_advance_by_one() {
        let mut previous = civil_from_julian_day(-800_000);
        for jdn in -799_999i64..=-700_000 {
            let current = civil_from_julian_day(jdn);
            assert!(current > previous, "{} did not advance past {:?}", jdn, previous);
            previous = current;
        }
    }
}
