//! In-memory settlement-token ledger

use std::collections::HashMap;

use crate::domain::ledger::SettlementLedger;
use crate::domain::pricing::Wad;
use crate::shared::errors::LedgerError;
use crate::shared::types::AccountId;

/// Balances and allowances for the fungible settlement token
#[derive(Debug, Default)]
pub struct MemorySettlementLedger {
    balances: HashMap<AccountId, Wad>,
    allowances: HashMap<(AccountId, AccountId), Wad>,
}

impl MemorySettlementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit freshly issued tokens to an account
    pub fn mint(&mut self, to: AccountId, amount: Wad) -> Result<(), LedgerError> {
        let balance = self.balances.entry(to).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Authorize `spender` to move up to `amount` of `owner`'s tokens
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: Wad) {
        self.allowances.insert((owner, spender), amount);
    }

    pub fn total_supply(&self) -> Wad {
        self.balances.values().sum()
    }
}

impl SettlementLedger for MemorySettlementLedger {
    fn balance_of(&self, holder: AccountId) -> Wad {
        self.balances.get(&holder).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> Wad {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    fn transfer(&mut self, from: AccountId, to: AccountId, amount: Wad) -> Result<(), LedgerError> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientFunds);
        }
        let to_balance = self.balance_of(to);
        let credited = to_balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(from, from_balance - amount);
        self.balances.insert(to, credited);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Wad,
    ) -> Result<(), LedgerError> {
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance);
        }
        self.transfer(from, to, amount)?;
        self.allowances.insert((from, spender), approved - amount);
        Ok(())
    }
}
