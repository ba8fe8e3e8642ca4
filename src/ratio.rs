//! Linear and logarithmic interval arithmetic, and exact rational numbers.

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Add;
use std::ops::Div;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;
use std::str::FromStr;

use crate::math;

/// Number of cents per octave.
pub const CENTS_PER_OCTAVE: f64 = 1200.0;

/// Struct representing the relative distance between two frequencies.
///
/// The [`Ratio`] can be read as a linear factor (`float`) or as a logarithmic offset (`cents`).
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use temper::ratio::Ratio;
/// assert_approx_eq!(Ratio::from_float(1.5).as_cents(), 701.955);
/// assert_approx_eq!(Ratio::from_cents(1200.0).as_float(), 2.0);
/// assert_approx_eq!(Ratio::from_cents(-1200.0).as_float(), 0.5);
/// ```
///
/// # Panics
///
/// Panics if the *linear* value is not a finite positive number.
///
/// ```should_panic
/// # use temper::ratio::Ratio;
/// Ratio::from_float(0.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Ratio {
    float_value: f64,
}

impl Ratio {
    pub fn from_float(float_value: f64) -> Self {
        assert!(
            float_value.is_finite() && float_value > 0.0,
            "Ratio must be finite and positive but was {float_value}"
        );
        Self { float_value }
    }

    pub fn from_cents(cents_value: f64) -> Self {
        Self::from_float((cents_value / CENTS_PER_OCTAVE).exp2())
    }

    /// Creates the [`Ratio`] between `from_hz` and `to_hz`.
    ///
    /// ```
    /// # use assert_approx_eq::assert_approx_eq;
    /// # use temper::ratio::Ratio;
    /// assert_approx_eq!(Ratio::between_frequencies(440.0, 880.0).as_cents(), 1200.0);
    /// assert_approx_eq!(Ratio::between_frequencies(440.0, 220.0).as_cents(), -1200.0);
    /// ```
    pub fn between_frequencies(from_hz: f64, to_hz: f64) -> Self {
        Self::from_float(to_hz / from_hz)
    }

    pub fn octave() -> Self {
        Self::from_float(2.0)
    }

    pub fn as_float(self) -> f64 {
        self.float_value
    }

    pub fn as_cents(self) -> f64 {
        self.float_value.log2() * CENTS_PER_OCTAVE
    }
}

/// Shifts `reference_hz` by `cents`.
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use temper::ratio;
/// assert_approx_eq!(ratio::cents_to_frequency(1200.0, 440.0), 880.0);
/// assert_approx_eq!(ratio::cents_to_frequency(-100.0, 440.0), 415.304698);
/// ```
pub fn cents_to_frequency(cents: f64, reference_hz: f64) -> f64 {
    reference_hz * (cents / CENTS_PER_OCTAVE).exp2()
}

/// Inverse of [`cents_to_frequency`].
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use temper::ratio;
/// assert_approx_eq!(ratio::frequency_to_cents(466.16376, 440.0), 100.0, 1e-3);
/// ```
pub fn frequency_to_cents(frequency_hz: f64, reference_hz: f64) -> f64 {
    (frequency_hz / reference_hz).log2() * CENTS_PER_OCTAVE
}

/// Exact fraction, always stored in lowest terms with a positive denominator.
///
/// # Examples
///
/// ```
/// # use temper::ratio::RationalNumber;
/// let fifth = RationalNumber::new(6, 4);
/// assert_eq!((fifth.numer(), fifth.denom()), (3, 2));
///
/// let negative = RationalNumber::new(1, -4);
/// assert_eq!((negative.numer(), negative.denom()), (-1, 4));
///
/// assert_eq!(fifth * fifth, RationalNumber::new(9, 4));
/// assert_eq!(fifth - RationalNumber::one(), RationalNumber::new(1, 2));
/// assert_eq!(fifth.to_string(), "3/2");
/// ```
///
/// # Panics
///
/// Panics if the denominator is zero or if a term is `i64::MIN`.
/// Use [`RationalNumber::checked_new`] for untrusted input.
///
/// ```should_panic
/// # use temper::ratio::RationalNumber;
/// RationalNumber::new(1, 0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RationalNumber {
    numer: i64,
    denom: i64,
}

impl RationalNumber {
    pub fn new(numer: i64, denom: i64) -> Self {
        assert!(denom != 0, "Denominator must not be zero");
        assert!(
            numer != i64::MIN && denom != i64::MIN,
            "Terms must not be i64::MIN"
        );
        // The gcd is at most the larger magnitude, which is at most i64::MAX.
        let gcd = math::gcd_i64(numer, denom) as i64;
        let sign = denom.signum();
        Self {
            numer: sign * numer / gcd,
            denom: sign * denom / gcd,
        }
    }

    /// Like [`RationalNumber::new`] but returns `None` instead of panicking.
    ///
    /// ```
    /// # use temper::ratio::RationalNumber;
    /// assert_eq!(RationalNumber::checked_new(6, -4), Some(RationalNumber::new(-3, 2)));
    /// assert_eq!(RationalNumber::checked_new(1, 0), None);
    /// assert_eq!(RationalNumber::checked_new(1, i64::MIN), None);
    /// assert_eq!(RationalNumber::checked_new(i64::MIN, 1), None);
    /// ```
    pub fn checked_new(numer: i64, denom: i64) -> Option<Self> {
        // Both terms must be negatable. The gcd then fits into an i64 as well.
        numer.checked_neg()?;
        denom.checked_neg()?;
        (denom != 0).then(|| Self::new(numer, denom))
    }

    pub fn from_int(value: i64) -> Self {
        Self {
            numer: value,
            denom: 1,
        }
    }

    pub fn zero() -> Self {
        Self::from_int(0)
    }

    pub fn one() -> Self {
        Self::from_int(1)
    }

    pub fn numer(self) -> i64 {
        self.numer
    }

    pub fn denom(self) -> i64 {
        self.denom
    }

    pub fn is_zero(self) -> bool {
        self.numer == 0
    }

    pub fn as_float(self) -> f64 {
        self.numer as f64 / self.denom as f64
    }

    /// Interprets `self` as a frequency ratio, if it is positive.
    ///
    /// ```
    /// # use assert_approx_eq::assert_approx_eq;
    /// # use temper::ratio::RationalNumber;
    /// assert_approx_eq!(RationalNumber::new(2, 1).as_ratio().unwrap().as_cents(), 1200.0);
    /// assert!(RationalNumber::new(0, 1).as_ratio().is_none());
    /// assert!(RationalNumber::new(-3, 2).as_ratio().is_none());
    /// ```
    pub fn as_ratio(self) -> Option<Ratio> {
        (self.numer > 0).then(|| Ratio::from_float(self.as_float()))
    }

    /// Raises `self` to a non-negative integer power.
    ///
    /// ```
    /// # use temper::ratio::RationalNumber;
    /// assert_eq!(RationalNumber::new(3, 2).pow(4), RationalNumber::new(81, 16));
    /// assert_eq!(RationalNumber::new(3, 2).pow(0), RationalNumber::one());
    /// ```
    pub fn pow(self, exponent: u32) -> Self {
        Self::new(self.numer.pow(exponent), self.denom.pow(exponent))
    }
}

impl Default for RationalNumber {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for RationalNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.numer * rhs.denom + rhs.numer * self.denom,
            self.denom * rhs.denom,
        )
    }
}

impl Sub for RationalNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

impl Neg for RationalNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            numer: -self.numer,
            denom: self.denom,
        }
    }
}

impl Mul for RationalNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.numer * rhs.numer, self.denom * rhs.denom)
    }
}

impl Div for RationalNumber {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self::new(self.numer * rhs.denom, self.denom * rhs.numer)
    }
}

impl Mul<i64> for RationalNumber {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        self * Self::from_int(rhs)
    }
}

impl Div<i64> for RationalNumber {
    type Output = Self;

    fn div(self, rhs: i64) -> Self::Output {
        self / Self::from_int(rhs)
    }
}

impl PartialOrd for RationalNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RationalNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        (i128::from(self.numer) * i128::from(other.denom))
            .cmp(&(i128::from(other.numer) * i128::from(self.denom)))
    }
}

impl Display for RationalNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let formatted = format!("{}/{}", self.numer, self.denom);
        f.pad(&formatted)
    }
}

/// Parses `n/d` or a plain integer `n` (denominator 1).
///
/// ```
/// # use temper::ratio::RationalNumber;
/// assert_eq!("5/4".parse(), Ok(RationalNumber::new(5, 4)));
/// assert_eq!(" 2 ".parse(), Ok(RationalNumber::from_int(2)));
/// assert_eq!("196/186".parse(), Ok(RationalNumber::new(98, 93)));
/// assert!("5/0".parse::<RationalNumber>().is_err());
/// assert!("5/4/3".parse::<RationalNumber>().is_err());
/// assert!("1.5".parse::<RationalNumber>().is_err());
/// assert!("1/-9223372036854775808".parse::<RationalNumber>().is_err());
/// ```
impl FromStr for RationalNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (numer, denom) = match s.split_once('/') {
            Some((numer, denom)) => (parse_i64(numer, s)?, parse_i64(denom, s)?),
            None => (parse_i64(s, s)?, 1),
        };
        if denom == 0 {
            return Err(format!("Invalid fraction '{s}': Denominator is zero"));
        }
        Self::checked_new(numer, denom)
            .ok_or_else(|| format!("Invalid fraction '{s}': Term out of range"))
    }
}

fn parse_i64(item: &str, expression: &str) -> Result<i64, String> {
    item.trim()
        .parse()
        .map_err(|_| format!("Invalid fraction '{expression}': '{item}' is not an integer"))
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn reduces_and_normalizes_sign() {
        let test_cases = [
            ((4, 8), (1, 2)),
            ((-4, 8), (-1, 2)),
            ((4, -8), (-1, 2)),
            ((-4, -8), (1, 2)),
            ((0, -8), (0, 1)),
            ((531441, 524288), (531441, 524288)),
        ];

        for ((numer, denom), expected) in test_cases {
            let reduced = RationalNumber::new(numer, denom);
            assert_eq!(
                (reduced.numer(), reduced.denom()),
                expected,
                "{numer}/{denom} should reduce to {expected:?}"
            );
        }
    }

    #[test]
    fn arithmetic() {
        let third = RationalNumber::new(1, 3);
        let quarter = RationalNumber::new(1, 4);

        assert_eq!(third + quarter, RationalNumber::new(7, 12));
        assert_eq!(third - quarter, RationalNumber::new(1, 12));
        assert_eq!(quarter - third, RationalNumber::new(-1, 12));
        assert_eq!(third * quarter, RationalNumber::new(1, 12));
        assert_eq!(third / quarter, RationalNumber::new(4, 3));
        assert_eq!(-third, RationalNumber::new(-1, 3));
        assert_eq!(third * 3, RationalNumber::one());
        assert_eq!(RationalNumber::new(3, 2) / 2, RationalNumber::new(3, 4));
        assert!(third > quarter);
        assert!(-third < -quarter);
    }

    #[test]
    fn extreme_terms() {
        let max = RationalNumber::new(i64::MAX, -i64::MAX);
        assert_eq!((max.numer(), max.denom()), (-1, 1));

        assert_eq!(RationalNumber::checked_new(0, i64::MIN), None);
        assert_eq!(RationalNumber::checked_new(i64::MIN, -1), None);
        assert_eq!(
            RationalNumber::checked_new(-i64::MAX, 3),
            Some(RationalNumber::new(-i64::MAX, 3))
        );
    }

    #[test]
    fn parse_errors() {
        let test_cases = [
            ("x", "Invalid fraction 'x': 'x' is not an integer"),
            ("3/x", "Invalid fraction '3/x': 'x' is not an integer"),
            ("3/", "Invalid fraction '3/': '' is not an integer"),
            ("3/0", "Invalid fraction '3/0': Denominator is zero"),
            (
                "1/-9223372036854775808",
                "Invalid fraction '1/-9223372036854775808': Term out of range",
            ),
            (
                "0/-9223372036854775808",
                "Invalid fraction '0/-9223372036854775808': Term out of range",
            ),
            (
                "-9223372036854775808",
                "Invalid fraction '-9223372036854775808': Term out of range",
            ),
        ];

        for (input, expected) in test_cases {
            assert_eq!(input.parse::<RationalNumber>(), Err(expected.to_owned()));
        }
    }

    #[test]
    fn converts_to_cents() {
        assert_approx_eq!(
            RationalNumber::new(3, 2).as_ratio().unwrap().as_cents(),
            701.955
        );
        assert_approx_eq!(
            RationalNumber::new(5, 4).as_ratio().unwrap().as_cents(),
            386.313714
        );
        assert_approx_eq!(Ratio::octave().as_cents(), 1200.0);
    }
}
