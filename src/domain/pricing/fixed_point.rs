//! Fixed-point arithmetic (scale 1e18) with U256 intermediates
//!
//! Every operation floors. Products are widened to 256 bits before the
//! scale-down so the only failure mode is a result that does not fit in
//! `u128`, reported as `Overflow`.

use uint::construct_uint;

use crate::shared::errors::PricingError;

construct_uint! {
    /// 256-bit integer for intermediate products.
    pub struct U256(4);
}

/// Unsigned fixed-point with 18 decimals
pub type Wad = u128;

/// One whole unit at the fixed scale
pub const WAD: Wad = 1_000_000_000_000_000_000;

#[inline]
fn u256_to_wad(v: U256) -> Result<Wad, PricingError> {
    if v > U256::from(u128::MAX) {
        Err(PricingError::Overflow)
    } else {
        Ok(v.as_u128())
    }
}

/// floor(a * b / WAD)
pub fn wad_mul(a: Wad, b: Wad) -> Result<Wad, PricingError> {
    let product = U256::from(a) * U256::from(b);
    u256_to_wad(product / U256::from(WAD))
}

/// floor(a * WAD / b); fails on b == 0
pub fn wad_div(a: Wad, b: Wad) -> Result<Wad, PricingError> {
    if b == 0 {
        return Err(PricingError::DivisionByZero);
    }
    let scaled = U256::from(a) * U256::from(WAD);
    u256_to_wad(scaled / U256::from(b))
}

/// Raise a WAD-scaled base to an integer power by squaring.
///
/// Floors at every intermediate multiplication, matching the floor-division
/// semantics of the rest of this module. `wad_pow(x, 0) == WAD` for any x.
pub fn wad_pow(base: Wad, exp: u32) -> Result<Wad, PricingError> {
    let mut result: Wad = WAD;
    let mut factor = base;
    let mut remaining = exp;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = wad_mul(result, factor)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            factor = wad_mul(factor, factor)?;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wad_mul_basic() {
        assert_eq!(wad_mul(2 * WAD, 3 * WAD).unwrap(), 6 * WAD);
        assert_eq!(wad_mul(WAD / 2, WAD / 2).unwrap(), WAD / 4);
        assert_eq!(wad_mul(0, WAD).unwrap(), 0);
    }

    #[test]
    fn test_wad_mul_floors() {
        // 1e-18 * 1e-18 scales below the representable grid
        assert_eq!(wad_mul(1, 1).unwrap(), 0);
        // 3 * (1/3-ish) floors rather than rounds
        let third = wad_div(WAD, 3 * WAD).unwrap();
        assert_eq!(wad_mul(3 * WAD, third).unwrap(), WAD - 1);
    }

    #[test]
    fn test_wad_mul_overflow() {
        assert_eq!(
            wad_mul(u128::MAX, u128::MAX).unwrap_err(),
            PricingError::Overflow
        );
    }

    #[test]
    fn test_wad_div_basic() {
        assert_eq!(wad_div(6 * WAD, 3 * WAD).unwrap(), 2 * WAD);
        assert_eq!(wad_div(WAD, 2 * WAD).unwrap(), WAD / 2);
    }

    #[test]
    fn test_wad_div_floors() {
        // 1000/999 = 1.001001001... truncated at 18 digits
        let q = wad_div(1000, 999).unwrap();
        assert_eq!(q, 1_001_001_001_001_001_001);
    }

    #[test]
    fn test_wad_div_by_zero() {
        assert_eq!(wad_div(WAD, 0).unwrap_err(), PricingError::DivisionByZero);
    }

    #[test]
    fn test_wad_pow_identities() {
        assert_eq!(wad_pow(7 * WAD, 0).unwrap(), WAD);
        assert_eq!(wad_pow(7 * WAD, 1).unwrap(), 7 * WAD);
        assert_eq!(wad_pow(WAD, 100).unwrap(), WAD);
    }

    #[test]
    fn test_wad_pow_squares() {
        assert_eq!(wad_pow(2 * WAD, 2).unwrap(), 4 * WAD);
        assert_eq!(wad_pow(2 * WAD, 10).unwrap(), 1024 * WAD);
        assert_eq!(wad_pow(WAD / 2, 2).unwrap(), WAD / 4);
    }

    #[test]
    fn test_wad_pow_matches_repeated_multiplication() {
        let base = 3 * WAD / 2;
        let mut expected = WAD;
        for _ in 0..7 {
            expected = wad_mul(expected, base).unwrap();
        }
        // squaring may floor at different points but must agree within the
        // accumulated truncation of the naive product
        let fast = wad_pow(base, 7).unwrap();
        let diff = expected.abs_diff(fast);
        assert!(diff <= 7, "fast={} naive={}", fast, expected);
    }

    #[test]
    fn test_wad_pow_overflow() {
        assert_eq!(
            wad_pow(u128::MAX / 2, 3).unwrap_err(),
            PricingError::Overflow
        );
    }
}
