//! Pool domain - per-asset liquidity pool records

mod pool_registry;

pub use pool_registry::PoolRegistry;

use serde::{Deserialize, Serialize};

use crate::domain::pricing::Wad;

/// Per-asset liquidity pool state
///
/// `total_fractions`, `base_price` and `exponent` are fixed at creation;
/// only `available_fractions` mutates, and only through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPool {
    pub total_fractions: u64,
    pub available_fractions: u64,
    pub base_price: Wad,
    pub exponent: u32,
}

impl LiquidityPool {
    /// Fractions held outside the pool
    pub fn circulating_fractions(&self) -> u64 {
        self.total_fractions - self.available_fractions
    }
}
