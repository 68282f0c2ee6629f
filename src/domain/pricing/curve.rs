//! Bonding-curve price function
//!
//! `price = base_price * (total_fractions / available_fractions) ^ exponent`
//!
//! At full inventory the ratio is exactly one and the price equals
//! `base_price`. As inventory depletes the ratio grows past one and the
//! price rises super-linearly, with steepness set by the exponent.

use crate::domain::pool::LiquidityPool;
use crate::shared::errors::PricingError;

use super::fixed_point::{wad_div, wad_mul, wad_pow, Wad, WAD};

/// Current price per fraction for the pool's present inventory.
///
/// Precondition: `available_fractions > 0`. An empty pool has no defined
/// price; querying one is a caller contract bug surfaced as
/// `DivisionByZero`.
pub fn spot_price(pool: &LiquidityPool) -> Result<Wad, PricingError> {
    if pool.available_fractions == 0 {
        return Err(PricingError::DivisionByZero);
    }
    let ratio = wad_div(
        Wad::from(pool.total_fractions),
        Wad::from(pool.available_fractions),
    )?;
    let growth = wad_pow(ratio, pool.exponent)?;
    wad_mul(pool.base_price, growth)
}
