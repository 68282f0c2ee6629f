//! In-memory per-asset fraction ledger

use std::collections::HashMap;

use crate::domain::ledger::FractionLedger;
use crate::shared::errors::LedgerError;
use crate::shared::types::{AccountId, AssetId};

/// Fraction balances keyed by (asset, holder)
#[derive(Debug, Default)]
pub struct MemoryFractionLedger {
    balances: HashMap<(AssetId, AccountId), u64>,
}

impl MemoryFractionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit freshly minted fractions of an asset to an account
    pub fn mint(&mut self, asset_id: AssetId, to: AccountId, fractions: u64) -> Result<(), LedgerError> {
        let balance = self.balances.entry((asset_id, to)).or_insert(0);
        *balance = balance
            .checked_add(fractions)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Total fractions of an asset across all holders
    pub fn supply_of(&self, asset_id: AssetId) -> u64 {
        self.balances
            .iter()
            .filter(|((asset, _), _)| *asset == asset_id)
            .map(|(_, fractions)| fractions)
            .sum()
    }
}

impl FractionLedger for MemoryFractionLedger {
    fn balance_of(&self, asset_id: AssetId, holder: AccountId) -> u64 {
        self.balances
            .get(&(asset_id, holder))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &mut self,
        asset_id: AssetId,
        from: AccountId,
        to: AccountId,
        fractions: u64,
    ) -> Result<(), LedgerError> {
        let from_balance = self.balance_of(asset_id, from);
        if from_balance < fractions {
            return Err(LedgerError::InsufficientFunds);
        }
        let to_balance = self.balance_of(asset_id, to);
        let credited = to_balance
            .checked_add(fractions)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert((asset_id, from), from_balance - fractions);
        self.balances.insert((asset_id, to), credited);
        Ok(())
    }
}
