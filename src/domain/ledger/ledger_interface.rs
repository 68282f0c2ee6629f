//! Ledger capability traits
//!
//! The engine never holds balances itself. Fraction inventory and settlement
//! funds live in external ledgers reached through these seams; transfers are
//! synchronous and either complete or leave both sides untouched.

use crate::domain::pricing::Wad;
use crate::shared::errors::LedgerError;
use crate::shared::types::{AccountId, AssetId};

/// Fungible settlement-token ledger
pub trait SettlementLedger {
    fn balance_of(&self, holder: AccountId) -> Wad;

    fn allowance(&self, owner: AccountId, spender: AccountId) -> Wad;

    fn transfer(&mut self, from: AccountId, to: AccountId, amount: Wad) -> Result<(), LedgerError>;

    /// Transfer on behalf of `from`, consuming `spender`'s allowance
    fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Wad,
    ) -> Result<(), LedgerError>;
}

/// Per-asset fraction ledger
pub trait FractionLedger {
    fn balance_of(&self, asset_id: AssetId, holder: AccountId) -> u64;

    fn transfer(
        &mut self,
        asset_id: AssetId,
        from: AccountId,
        to: AccountId,
        fractions: u64,
    ) -> Result<(), LedgerError>;
}

/// Authorization capability for administration operations
pub trait AccessControl {
    fn is_privileged(&self, caller: AccountId) -> bool;
}
