//! Arbitrary precision numbers using dashu
//!
//! Uses dashu-float (DBig) for fractional day values and dashu-int for exact
//! day counts. The rounding primitives (floor, ceil, truncate, round, split)
//! work on the exact decimal representation `significand * 10^exponent`, so
//! their results never depend on the working precision of the value.

use dashu_base::Sign;
use dashu_float::ops::Abs;
use dashu_float::DBig;
use dashu_int::{IBig, UBig};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Overflow: result too large")]
    Overflow,
}

/// Default significand width for fractional days (bits)
pub const DEFAULT_PRECISION_BITS: u32 = 1024;

/// Narrowest significand that still resolves one nanosecond in a day
pub const MIN_PRECISION_BITS: u32 = 64;

// ============================================================================
// Precision
// ============================================================================

/// Working precision, expressed in bits and carried as decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Precision {
    bits: u32,
}

impl Precision {
    /// Precision with at least `bits` binary digits of significand
    pub fn from_bits(bits: u32) -> Result<Self, NumberError> {
        if bits < MIN_PRECISION_BITS {
            return Err(NumberError::DomainError(format!(
                "precision of {} bits is below the {} bit minimum",
                bits, MIN_PRECISION_BITS
            )));
        }
        Ok(Self { bits })
    }

    pub fn bits(self) -> u32 {
        self.bits
    }

    /// Decimal digits needed to hold `bits` binary digits: ceil(bits * log10(2))
    pub fn digits(self) -> usize {
        // log10(2) ~= 0.30103
        ((u64::from(self.bits) * 30_103).div_ceil(100_000)) as usize
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self { bits: DEFAULT_PRECISION_BITS }
    }
}

impl TryFrom<u32> for Precision {
    type Error = NumberError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

impl From<Precision> for u32 {
    fn from(precision: Precision) -> Self {
        precision.bits
    }
}

// ============================================================================
// Signum
// ============================================================================

/// Sign carried separately from a magnitude (+1 / 0 / -1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signum {
    Negative,
    Zero,
    Positive,
}

impl Signum {
    pub fn as_i8(self) -> i8 {
        match self {
            Signum::Negative => -1,
            Signum::Zero => 0,
            Signum::Positive => 1,
        }
    }

    /// Sign of an integer
    pub fn of(value: &IBig) -> Self {
        match value.cmp(&IBig::ZERO) {
            std::cmp::Ordering::Less => Signum::Negative,
            std::cmp::Ordering::Equal => Signum::Zero,
            std::cmp::Ordering::Greater => Signum::Positive,
        }
    }

    pub fn negate(self) -> Self {
        match self {
            Signum::Negative => Signum::Positive,
            Signum::Zero => Signum::Zero,
            Signum::Positive => Signum::Negative,
        }
    }

    fn to_sign(self) -> Sign {
        match self {
            Signum::Negative => Sign::Negative,
            Signum::Zero | Signum::Positive => Sign::Positive,
        }
    }
}

/// A value split into sign, integer magnitude and non-negative fraction.
///
/// `|value| = integer + fraction` with `0 <= fraction < 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitNumber {
    pub sign: Signum,
    pub integer: UBig,
    pub fraction: Number,
}

// ============================================================================
// Number
// ============================================================================

/// Arbitrary precision decimal number
///
/// Built on dashu-float's DBig (round half away from zero).
/// All operations return Results or new Numbers - never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

/// `|value| * 10^places`, cut at the decimal point:
/// `whole + remainder / 10^fraction_digits`
struct Scaled {
    sign: Signum,
    whole: UBig,
    remainder: UBig,
    fraction_digits: usize,
}

impl Scaled {
    fn is_exact(&self) -> bool {
        self.remainder == UBig::ZERO
    }

    /// At least one half unit in the last place
    fn rounds_up(&self) -> bool {
        if self.is_exact() {
            return false;
        }
        let doubled = &self.remainder + &self.remainder;
        doubled >= pow10(self.fraction_digits)
    }
}

fn pow10(exp: usize) -> UBig {
    UBig::from(10u8).pow(exp)
}

impl Number {
    // ========== Construction ==========

    /// Ensure a DBig carries at least the default working precision
    fn with_work_precision(val: DBig) -> DBig {
        let digits = Precision::default().digits().max(val.precision());
        val.with_precision(digits).value()
    }

    pub fn zero() -> Self {
        Self { inner: Self::with_work_precision(DBig::ZERO) }
    }

    /// Create from i64 (exact)
    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }

    /// Create from a signed big integer (exact)
    pub fn from_ibig(n: IBig) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }

    /// Create from an unsigned big integer (exact)
    pub fn from_ubig(n: UBig) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }

    /// Create `num / den` rounded to `precision`
    pub fn from_ratio(num: &IBig, den: &IBig, precision: Precision) -> Result<Self, NumberError> {
        if *den == IBig::ZERO {
            return Err(NumberError::DivisionByZero);
        }
        let digits = precision.digits();
        let n = DBig::from(num.clone()).with_precision(digits).value();
        let d = DBig::from(den.clone()).with_precision(digits).value();
        Ok(Self { inner: n / d })
    }

    /// Create from string representation
    /// Supports: "123", "-42", "3.14", "1.5e10", "1/3"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        // Handle rational format "a/b"
        if let Some((num_str, den_str)) = s.split_once('/') {
            let num: IBig = num_str.trim().parse()
                .map_err(|_| NumberError::ParseError(s.to_string()))?;
            let den: IBig = den_str.trim().parse()
                .map_err(|_| NumberError::ParseError(s.to_string()))?;
            return Self::from_ratio(&num, &den, Precision::default());
        }

        let inner: DBig = s.parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;
        Ok(Self { inner: Self::with_work_precision(inner) })
    }

    /// Same value carried with at least `precision` working digits
    pub fn with_precision(&self, precision: Precision) -> Self {
        let digits = precision.digits().max(self.inner.precision());
        Self { inner: self.inner.clone().with_precision(digits).value() }
    }

    /// Working precision in decimal digits (0 = unlimited)
    pub fn precision_digits(&self) -> usize {
        self.inner.precision()
    }

    // ========== Predicates ==========

    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    pub fn is_integer(&self) -> bool {
        self.scaled(0).is_exact()
    }

    pub fn signum(&self) -> Signum {
        self.scaled(0).sign
    }

    // ========== Basic Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        let digits = Precision::default().digits()
            .max(self.inner.precision())
            .max(other.inner.precision());
        let n = self.inner.clone().with_precision(digits).value();
        Ok(Self { inner: n / &other.inner })
    }

    pub fn neg(&self) -> Self {
        Self { inner: -self.inner.clone() }
    }

    pub fn abs(&self) -> Self {
        Self { inner: Abs::abs(self.inner.clone()) }
    }

    // ========== Rounding Primitives ==========

    /// Floor - largest integer <= x
    pub fn floor(&self) -> Self {
        let scaled = self.scaled(0);
        let bump = scaled.sign == Signum::Negative && !scaled.is_exact();
        self.rebuild(scaled.sign, bumped(scaled.whole, bump), 0)
    }

    /// Ceiling - smallest integer >= x
    pub fn ceil(&self) -> Self {
        let scaled = self.scaled(0);
        let bump = scaled.sign == Signum::Positive && !scaled.is_exact();
        self.rebuild(scaled.sign, bumped(scaled.whole, bump), 0)
    }

    /// Drop every digit past `places` decimal places (rounds toward zero)
    pub fn truncate(&self, places: u32) -> Self {
        let scaled = self.scaled(places);
        self.rebuild(scaled.sign, scaled.whole, places)
    }

    /// Round to `places` decimal places, ties away from zero
    pub fn round_half_away_from_zero(&self, places: u32) -> Self {
        let scaled = self.scaled(places);
        let bump = scaled.rounds_up();
        self.rebuild(scaled.sign, bumped(scaled.whole, bump), places)
    }

    /// Split into sign, integer magnitude and non-negative fractional part
    pub fn split(&self) -> SplitNumber {
        let scaled = self.scaled(0);
        let fraction = DBig::from_parts(
            IBig::from(scaled.remainder.clone()),
            -(scaled.fraction_digits as isize),
        );
        SplitNumber {
            sign: scaled.sign,
            integer: scaled.whole,
            fraction: Self { inner: self.keep_precision(fraction) },
        }
    }

    /// Integer magnitude (toward zero); the sign is reported by `signum`
    pub fn integer_part(&self) -> UBig {
        self.scaled(0).whole
    }

    /// Fractional magnitude, always in [0, 1)
    pub fn fractional_part(&self) -> Self {
        self.split().fraction
    }

    // ========== Conversion ==========

    /// Exact integer value, if the number is an integer
    pub fn to_ibig(&self) -> Option<IBig> {
        let scaled = self.scaled(0);
        if !scaled.is_exact() {
            return None;
        }
        Some(IBig::from_parts(scaled.sign.to_sign(), scaled.whole))
    }

    /// Try to convert to i64
    pub fn to_i64(&self) -> Option<i64> {
        self.to_ibig().and_then(|n| i64::try_from(n).ok())
    }

    // ========== Display ==========

    /// Render as decimal string rounded (half away from zero) to `places`
    pub fn as_decimal(&self, places: u32) -> String {
        let scaled = self.scaled(places);
        let bump = scaled.rounds_up();
        let magnitude = bumped(scaled.whole, bump);
        let negative = scaled.sign == Signum::Negative && magnitude != UBig::ZERO;

        let places = places as usize;
        let mut digits = magnitude.to_string();
        if digits.len() <= places {
            digits = format!("{:0>width$}", digits, width = places + 1);
        }
        if places > 0 {
            digits.insert(digits.len() - places, '.');
        }
        if negative {
            digits.insert(0, '-');
        }
        digits
    }

    // ========== Internals ==========

    fn scaled(&self, places: u32) -> Scaled {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let (sign, magnitude) = significand.into_parts();
        let sign = if magnitude == UBig::ZERO {
            Signum::Zero
        } else if sign == Sign::Negative {
            Signum::Negative
        } else {
            Signum::Positive
        };

        let shift = exponent + places as isize;
        if shift >= 0 {
            Scaled {
                sign,
                whole: magnitude * pow10(shift as usize),
                remainder: UBig::ZERO,
                fraction_digits: 0,
            }
        } else {
            let fraction_digits = shift.unsigned_abs();
            let denominator = pow10(fraction_digits);
            Scaled {
                sign,
                whole: &magnitude / &denominator,
                remainder: &magnitude % &denominator,
                fraction_digits,
            }
        }
    }

    /// `sign * magnitude * 10^-places`, keeping this number's working precision
    fn rebuild(&self, sign: Signum, magnitude: UBig, places: u32) -> Self {
        let significand = IBig::from_parts(sign.to_sign(), magnitude);
        let value = DBig::from_parts(significand, -(places as isize));
        Self { inner: self.keep_precision(value) }
    }

    fn keep_precision(&self, value: DBig) -> DBig {
        let digits = self.inner.precision();
        if digits == 0 || value.precision() >= digits {
            value
        } else {
            value.with_precision(digits).value()
        }
    }
}

fn bumped(whole: UBig, bump: bool) -> UBig {
    if bump {
        whole + UBig::ONE
    } else {
        whole
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // DBig implements PartialOrd, use it and treat None as Equal
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}
