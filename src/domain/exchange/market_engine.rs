//! Exchange operations over the pool registry
//!
//! Orchestrates buy/sell/create/withdraw: read pool state, price the trade,
//! validate funds and inventory, move balances through the ledger seams,
//! then mutate the registry and append a notification. Validation happens
//! before any transfer; the one transfer that can still fail mid-operation
//! is unwound with a compensating transfer, so a failed operation is never
//! observable.
//!
//! Entry points take `&mut self`, which rules out reentry within a call
//! stack; exclusion across tasks is the embedding runtime's responsibility.

use crate::domain::ledger::{AccessControl, FractionLedger, SettlementLedger};
use crate::domain::pool::{LiquidityPool, PoolRegistry};
use crate::domain::pricing::{spot_price, Wad};
use crate::shared::errors::{AdminError, TradeError};
use crate::shared::types::{AccountId, AssetId};

use super::events::{EventLog, EventRecord, MarketEvent};

/// Liquidity engine for fractional asset pools
pub struct MarketEngine<S, F, A>
where
    S: SettlementLedger,
    F: FractionLedger,
    A: AccessControl,
{
    registry: PoolRegistry,
    settlement: S,
    fractions: F,
    access: A,
    custodian: AccountId,
    events: EventLog,
}

impl<S, F, A> MarketEngine<S, F, A>
where
    S: SettlementLedger,
    F: FractionLedger,
    A: AccessControl,
{
    /// `custodian` is the holder of record for escrowed fractions and
    /// accumulated settlement proceeds. Buyers approve it as spender.
    pub fn new(settlement: S, fractions: F, access: A, custodian: AccountId) -> Self {
        Self {
            registry: PoolRegistry::new(),
            settlement,
            fractions,
            access,
            custodian,
            events: EventLog::new(),
        }
    }

    pub fn custodian(&self) -> AccountId {
        self.custodian
    }

    pub fn get_pool(&self, asset_id: AssetId) -> Option<LiquidityPool> {
        self.registry.get(asset_id).copied()
    }

    pub fn pools(&self) -> impl Iterator<Item = (AssetId, &LiquidityPool)> {
        self.registry.iter()
    }

    /// Price per fraction at the pool's current inventory
    pub fn current_price(&self, asset_id: AssetId) -> Result<Wad, TradeError> {
        let pool = self
            .registry
            .get(asset_id)
            .ok_or(TradeError::PoolNotFound(asset_id))?;
        Ok(spot_price(pool)?)
    }

    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }

    pub fn settlement(&self) -> &S {
        &self.settlement
    }

    pub fn fraction_ledger(&self) -> &F {
        &self.fractions
    }

    /// Purchase `fractions` from the pool at the current (pre-trade) price.
    ///
    /// Returns the total cost charged to the buyer.
    pub fn buy(
        &mut self,
        buyer: AccountId,
        asset_id: AssetId,
        fractions: u64,
    ) -> Result<Wad, TradeError> {
        let pool = *self
            .registry
            .get(asset_id)
            .ok_or(TradeError::PoolNotFound(asset_id))?;
        if fractions == 0 {
            return Err(TradeError::InvalidAmount);
        }
        if fractions > pool.available_fractions {
            return Err(TradeError::InsufficientInventory {
                requested: fractions,
                available: pool.available_fractions,
            });
        }

        // price before the inventory change, for both directions
        let unit_price = spot_price(&pool)?;
        let total_cost = Wad::from(fractions)
            .checked_mul(unit_price)
            .ok_or(TradeError::Overflow)?;

        if self.settlement.allowance(buyer, self.custodian) < total_cost {
            return Err(TradeError::InsufficientAllowance);
        }
        if self.settlement.balance_of(buyer) < total_cost {
            return Err(TradeError::InsufficientFunds);
        }

        self.settlement
            .transfer_from(self.custodian, buyer, self.custodian, total_cost)?;
        if let Err(err) = self
            .fractions
            .transfer(asset_id, self.custodian, buyer, fractions)
        {
            // unwind the settlement leg before surfacing the failure
            if self
                .settlement
                .transfer(self.custodian, buyer, total_cost)
                .is_err()
            {
                panic!(
                    "failed to unwind settlement leg of buy for asset {}",
                    asset_id
                );
            }
            return Err(err.into());
        }

        self.debit_inventory(asset_id, fractions);
        self.events.append(MarketEvent::Traded {
            asset_id,
            buyer,
            fractions,
            total_cost,
        });
        Ok(total_cost)
    }

    /// Return `fractions` to the pool at the current (pre-trade) price.
    ///
    /// Returns the total earnings paid to the seller. Pricing off the
    /// pre-operation ratio for both directions means an immediate
    /// equal-sized round trip never returns the original amount; the curve
    /// is the market-maker's spread.
    pub fn sell(
        &mut self,
        seller: AccountId,
        asset_id: AssetId,
        fractions: u64,
    ) -> Result<Wad, TradeError> {
        let pool = *self
            .registry
            .get(asset_id)
            .ok_or(TradeError::PoolNotFound(asset_id))?;
        if fractions == 0 {
            return Err(TradeError::InvalidAmount);
        }
        let restocked = pool
            .available_fractions
            .checked_add(fractions)
            .ok_or(TradeError::Overflow)?;
        if restocked > pool.total_fractions {
            return Err(TradeError::ExceedsPoolCapacity {
                returned: fractions,
                capacity: pool.total_fractions - pool.available_fractions,
            });
        }

        let unit_price = spot_price(&pool)?;
        let total_earnings = Wad::from(fractions)
            .checked_mul(unit_price)
            .ok_or(TradeError::Overflow)?;

        if self.fractions.balance_of(asset_id, seller) < fractions {
            return Err(TradeError::InsufficientFunds);
        }
        if self.settlement.balance_of(self.custodian) < total_earnings {
            return Err(TradeError::InsufficientPoolFunds);
        }

        self.fractions
            .transfer(asset_id, seller, self.custodian, fractions)?;
        if let Err(err) = self
            .settlement
            .transfer(self.custodian, seller, total_earnings)
        {
            if self
                .fractions
                .transfer(asset_id, self.custodian, seller, fractions)
                .is_err()
            {
                panic!(
                    "failed to unwind fraction leg of sell for asset {}",
                    asset_id
                );
            }
            return Err(err.into());
        }

        self.credit_inventory(asset_id, fractions);
        self.events.append(MarketEvent::Sold {
            asset_id,
            seller,
            fractions,
            total_earnings,
        });
        Ok(total_earnings)
    }

    /// Create a pool, escrowing the creator's fractions to the custodian.
    /// Privileged.
    pub fn create_pool(
        &mut self,
        caller: AccountId,
        asset_id: AssetId,
        total_fractions: u64,
        base_price: Wad,
        exponent: u32,
    ) -> Result<(), AdminError> {
        if !self.access.is_privileged(caller) {
            return Err(AdminError::Unauthorized);
        }
        let creator_holding = self.fractions.balance_of(asset_id, caller);
        self.registry.create(
            asset_id,
            total_fractions,
            base_price,
            exponent,
            creator_holding,
        )?;
        if let Err(err) = self
            .fractions
            .transfer(asset_id, caller, self.custodian, total_fractions)
        {
            self.registry.rollback_create(asset_id);
            return Err(err.into());
        }
        self.events.append(MarketEvent::PoolCreated {
            asset_id,
            fractions: total_fractions,
            base_price,
            exponent,
        });
        Ok(())
    }

    /// Drain accumulated trading proceeds from custody. Privileged.
    pub fn withdraw(&mut self, caller: AccountId, amount: Wad) -> Result<(), AdminError> {
        if !self.access.is_privileged(caller) {
            return Err(AdminError::Unauthorized);
        }
        if amount == 0 {
            return Err(AdminError::InvalidAmount);
        }
        if self.settlement.balance_of(self.custodian) < amount {
            return Err(AdminError::InsufficientFunds);
        }
        self.settlement.transfer(self.custodian, caller, amount)?;
        Ok(())
    }

    fn debit_inventory(&mut self, asset_id: AssetId, fractions: u64) {
        if self
            .registry
            .mutate_available(asset_id, -i128::from(fractions))
            .is_err()
        {
            panic!("pool {} vanished mid-operation", asset_id);
        }
    }

    fn credit_inventory(&mut self, asset_id: AssetId, fractions: u64) {
        if self
            .registry
            .mutate_available(asset_id, i128::from(fractions))
            .is_err()
        {
            panic!("pool {} vanished mid-operation", asset_id);
        }
    }
}
