//! Registry of liquidity pools keyed by asset identifier

use std::collections::HashMap;

use crate::domain::pricing::Wad;
use crate::shared::errors::PoolError;
use crate::shared::types::AssetId;

use super::LiquidityPool;

/// Owns every pool record. The single choke point for inventory mutation.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: HashMap<AssetId, LiquidityPool>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }

    pub fn get(&self, asset_id: AssetId) -> Option<&LiquidityPool> {
        self.pools.get(&asset_id)
    }

    pub fn contains(&self, asset_id: AssetId) -> bool {
        self.pools.contains_key(&asset_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetId, &LiquidityPool)> {
        self.pools.iter().map(|(id, pool)| (*id, pool))
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Record a new pool at full inventory.
    ///
    /// `creator_holding` is the creator's current fraction balance as
    /// reported by the ledger; the registry rejects creation the creator
    /// cannot back.
    pub fn create(
        &mut self,
        asset_id: AssetId,
        total_fractions: u64,
        base_price: Wad,
        exponent: u32,
        creator_holding: u64,
    ) -> Result<(), PoolError> {
        if total_fractions == 0 {
            return Err(PoolError::InvalidParameter("total_fractions"));
        }
        if base_price == 0 {
            return Err(PoolError::InvalidParameter("base_price"));
        }
        if exponent == 0 {
            return Err(PoolError::InvalidParameter("exponent"));
        }
        if self.pools.contains_key(&asset_id) {
            return Err(PoolError::AlreadyExists(asset_id));
        }
        if creator_holding < total_fractions {
            return Err(PoolError::InsufficientInventory {
                held: creator_holding,
                required: total_fractions,
            });
        }
        self.pools.insert(
            asset_id,
            LiquidityPool {
                total_fractions,
                available_fractions: total_fractions,
                base_price,
                exponent,
            },
        );
        Ok(())
    }

    /// Apply a signed inventory delta.
    ///
    /// Callers validate bounds before invoking this; a delta that would push
    /// `available_fractions` outside `0..=total_fractions` is a caller bug
    /// and aborts the process rather than corrupting the pool.
    pub fn mutate_available(&mut self, asset_id: AssetId, delta: i128) -> Result<(), PoolError> {
        let pool = self
            .pools
            .get_mut(&asset_id)
            .ok_or(PoolError::NotFound(asset_id))?;
        let next = i128::from(pool.available_fractions) + delta;
        if next < 0 || next > i128::from(pool.total_fractions) {
            panic!(
                "inventory invariant violated for asset {}: available={} total={} delta={}",
                asset_id, pool.available_fractions, pool.total_fractions, delta
            );
        }
        pool.available_fractions = next as u64;
        Ok(())
    }

    /// Compensating removal for a creation whose escrow leg failed.
    pub(crate) fn rollback_create(&mut self, asset_id: AssetId) {
        self.pools.remove(&asset_id);
    }
}
