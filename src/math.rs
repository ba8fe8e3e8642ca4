//! Integer helpers used by rational numbers and note indexing.

/// Greatest common divisor of two (possibly negative) integers.
///
/// The result is unsigned so that `gcd_i64(0, i64::MIN)` fits.
/// `gcd_i64(0, 0)` is defined to be 0.
///
/// # Examples
///
/// ```
/// # use temper::math;
/// assert_eq!(math::gcd_i64(12, 18), 6);
/// assert_eq!(math::gcd_i64(-12, 18), 6);
/// assert_eq!(math::gcd_i64(12, -18), 6);
/// assert_eq!(math::gcd_i64(7, 0), 7);
/// assert_eq!(math::gcd_i64(0, -7), 7);
/// assert_eq!(math::gcd_i64(0, 0), 0);
/// assert_eq!(math::gcd_i64(0, i64::MIN), 1 << 63);
/// ```
pub fn gcd_i64(numer: i64, denom: i64) -> u64 {
    let (mut a, mut b) = (numer.unsigned_abs(), denom.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Returns the floored division and the *positive* remainder of `numer` and `denom`.
///
/// The result satisfies `result.0 * denom + result.1 = numer` with `0 <= result.1 < denom`.
///
/// # Panics
///
/// Panics if `denom` is not positive.
///
/// # Examples
///
/// ```
/// # use temper::math;
/// // numer is positive
/// assert_eq!(math::div_mod_i32(1, 12), (0, 1));
/// assert_eq!(math::div_mod_i32(12, 12), (1, 0));
/// assert_eq!(math::div_mod_i32(25, 12), (2, 1));
///
/// // numer is negative
/// assert_eq!(math::div_mod_i32(-1, 12), (-1, 11));
/// assert_eq!(math::div_mod_i32(-12, 12), (-1, 0));
/// assert_eq!(math::div_mod_i32(-13, 12), (-2, 11));
///
/// // numer is zero
/// assert_eq!(math::div_mod_i32(0, 53), (0, 0));
/// ```
pub fn div_mod_i32(numer: i32, denom: i32) -> (i32, i32) {
    assert!(denom > 0, "Denominator must be positive but was {denom}");
    (numer.div_euclid(denom), numer.rem_euclid(denom))
}
