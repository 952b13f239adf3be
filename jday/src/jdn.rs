//! Julian Day Numbers and fixed day numbers
//!
//! A day number is stored as a sign, an integer day magnitude and a
//! non-negative fraction in [0, 1). The value is `sign * (integer_day + fraction)`.
//! For negative values the fraction counts toward zero, so -0.25 is
//! (Negative, 0, 0.25) and noon of day -1 is (Negative, 1, 0).

use dashu_int::{IBig, UBig};
use jday_core::{ConversionError, Number, NumberError, Precision, Signum, NANOS_PER_DAY};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A signed, arbitrary precision day number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "DayNumberRepr", try_from = "DayNumberRepr")]
pub struct JulianDayNumber {
    sign: Signum,
    integer_day: UBig,
    fraction: Number,
}

/// Fixed day numbers share the representation; only the epoch differs.
pub type FixedDayNumber = JulianDayNumber;

impl JulianDayNumber {
    /// Build from parts, normalizing a zero magnitude to `Signum::Zero`
    pub fn from_parts(sign: Signum, integer_day: UBig, fraction: Number) -> Result<Self, ConversionError> {
        if fraction.is_negative() || fraction.integer_part() != UBig::ZERO {
            return Err(NumberError::DomainError(format!("day fraction {} is outside [0, 1)", fraction)).into());
        }
        let magnitude_is_zero = integer_day == UBig::ZERO && fraction.is_zero();
        let sign = match (sign, magnitude_is_zero) {
            (_, true) => Signum::Zero,
            (Signum::Zero, false) => {
                return Err(NumberError::DomainError("zero sign with a non-zero magnitude".to_string()).into());
            }
            (sign, false) => sign,
        };
        Ok(Self { sign, integer_day, fraction })
    }

    /// A whole day number (fraction 0)
    pub fn from_integer(day: IBig) -> Self {
        let sign = Signum::of(&day);
        let (_, magnitude) = day.into_parts();
        Self { sign, integer_day: magnitude, fraction: Number::zero() }
    }

    /// Split a decimal day number
    pub fn from_number(value: &Number) -> Self {
        let split = value.split();
        Self { sign: split.sign, integer_day: split.integer, fraction: split.fraction }
    }

    /// Day number for `nanos` past the start of integer day `day`
    ///
    /// `nanos` must be below one day.
    pub(crate) fn from_day_and_nanos(day: IBig, nanos: u64, precision: Precision) -> Result<Self, ConversionError> {
        if nanos >= NANOS_PER_DAY {
            return Err(ConversionError::internal(format!("{} ns does not fit in one day", nanos)));
        }
        let day_sign = Signum::of(&day);
        let (_, magnitude) = day.into_parts();
        let per_day = IBig::from(NANOS_PER_DAY);

        if day_sign != Signum::Negative {
            let fraction = day_fraction(nanos, &per_day, precision)?;
            return Self::from_parts(Signum::Positive, magnitude, fraction);
        }
        if nanos == 0 {
            return Self::from_parts(Signum::Negative, magnitude, Number::zero());
        }
        // -m + t = -(m - 1 + (1 - t))
        let fraction = day_fraction(NANOS_PER_DAY - nanos, &per_day, precision)?;
        Self::from_parts(Signum::Negative, magnitude - UBig::ONE, fraction)
    }

    /// Floor day and nanoseconds past its start, rounding the fraction to the
    /// nearest nanosecond (ties away from zero)
    pub(crate) fn day_and_nanos(&self) -> Result<(IBig, u64), ConversionError> {
        let scaled = self
            .fraction
            .mul(&Number::from_i64(NANOS_PER_DAY as i64))
            .round_half_away_from_zero(0);
        let mut nanos = scaled
            .to_i64()
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(|| ConversionError::internal(format!("day fraction {} did not scale to nanoseconds", self.fraction)))?;

        let mut magnitude = self.integer_day.clone();
        if nanos >= NANOS_PER_DAY {
            // Fraction rounded up to a whole day
            magnitude += UBig::ONE;
            nanos -= NANOS_PER_DAY;
        }

        match self.sign {
            Signum::Negative if nanos == 0 => Ok((-IBig::from(magnitude), 0)),
            Signum::Negative => Ok((-IBig::from(magnitude) - IBig::ONE, NANOS_PER_DAY - nanos)),
            Signum::Zero | Signum::Positive => Ok((IBig::from(magnitude), nanos)),
        }
    }

    pub fn sign(&self) -> Signum {
        self.sign
    }

    pub fn integer_day(&self) -> &UBig {
        &self.integer_day
    }

    pub fn fraction(&self) -> &Number {
        &self.fraction
    }

    /// True when the value is a whole number of days
    pub fn is_whole_day(&self) -> bool {
        self.fraction.is_zero()
    }

    /// Signed integer part (truncated toward zero)
    pub fn truncated_day(&self) -> IBig {
        let magnitude = IBig::from(self.integer_day.clone());
        match self.sign {
            Signum::Negative => -magnitude,
            Signum::Zero | Signum::Positive => magnitude,
        }
    }

    /// The full signed value as one decimal
    pub fn to_number(&self) -> Number {
        let magnitude = Number::from_ubig(self.integer_day.clone()).add(&self.fraction);
        match self.sign {
            Signum::Negative => magnitude.neg(),
            Signum::Zero | Signum::Positive => magnitude,
        }
    }

    /// Decimal string rounded to `places`, ties away from zero
    pub fn as_decimal(&self, places: u32) -> String {
        self.to_number().as_decimal(places)
    }
}

fn day_fraction(nanos: u64, per_day: &IBig, precision: Precision) -> Result<Number, ConversionError> {
    if nanos == 0 {
        return Ok(Number::zero());
    }
    Ok(Number::from_ratio(&IBig::from(nanos), per_day, precision)?)
}

impl fmt::Display for JulianDayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_number())
    }
}

/// Serialized form: the magnitude travels as a decimal string
#[derive(Serialize, Deserialize)]
struct DayNumberRepr {
    sign: Signum,
    integer_day: String,
    fraction: Number,
}

impl From<JulianDayNumber> for DayNumberRepr {
    fn from(value: JulianDayNumber) -> Self {
        Self {
            sign: value.sign,
            integer_day: value.integer_day.to_string(),
            fraction: value.fraction,
        }
    }
}

impl TryFrom<DayNumberRepr> for JulianDayNumber {
    type Error = ConversionError;

    fn try_from(repr: DayNumberRepr) -> Result<Self, Self::Error> {
        let integer_day: UBig = repr
            .integer_day
            .parse()
            .map_err(|_| NumberError::ParseError(repr.integer_day.clone()))?;
        Self::from_parts(repr.sign, integer_day, repr.fraction)
    }
}
