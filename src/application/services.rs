//! Application services and use cases

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::exchange::{EventRecord, MarketEngine};
use crate::domain::ledger::{FractionLedger, SettlementLedger};
use crate::domain::pool::LiquidityPool;
use crate::domain::pricing::Wad;
use crate::infrastructure::memory::{
    MemoryFractionLedger, MemorySettlementLedger, StaticAccessControl,
};
use crate::shared::errors::AppError;
use crate::shared::types::{AccountId, AssetId};
use crate::shared::utils::format_wad;

/// Engine wired to the in-memory capability implementations
pub type MemoryMarketEngine =
    MarketEngine<MemorySettlementLedger, MemoryFractionLedger, StaticAccessControl>;

/// Serialized front door to the market engine.
///
/// The mutex is the mutual-exclusion marker around every state-mutating
/// entry point: operations from concurrent tasks are applied one at a time,
/// never interleaved.
pub struct MarketService {
    engine: Mutex<MemoryMarketEngine>,
}

impl MarketService {
    pub fn new(engine: MemoryMarketEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    pub async fn create_pool(
        &self,
        caller: AccountId,
        asset_id: AssetId,
        total_fractions: u64,
        base_price: Wad,
        exponent: u32,
    ) -> Result<(), AppError> {
        let mut engine = self.engine.lock().await;
        match engine.create_pool(caller, asset_id, total_fractions, base_price, exponent) {
            Ok(()) => {
                info!(
                    "Pool created: asset {} with {} fractions at base price {} (exponent {})",
                    asset_id,
                    total_fractions,
                    format_wad(base_price),
                    exponent
                );
                Ok(())
            }
            Err(e) => {
                warn!("Pool creation rejected for asset {}: {}", asset_id, e);
                Err(e.into())
            }
        }
    }

    pub async fn buy(
        &self,
        buyer: AccountId,
        asset_id: AssetId,
        fractions: u64,
    ) -> Result<Wad, AppError> {
        let mut engine = self.engine.lock().await;
        match engine.buy(buyer, asset_id, fractions) {
            Ok(cost) => {
                info!(
                    "{} bought {} fractions of asset {} for {}",
                    buyer,
                    fractions,
                    asset_id,
                    format_wad(cost)
                );
                Ok(cost)
            }
            Err(e) => {
                warn!("Buy rejected for {} on asset {}: {}", buyer, asset_id, e);
                Err(e.into())
            }
        }
    }

    pub async fn sell(
        &self,
        seller: AccountId,
        asset_id: AssetId,
        fractions: u64,
    ) -> Result<Wad, AppError> {
        let mut engine = self.engine.lock().await;
        match engine.sell(seller, asset_id, fractions) {
            Ok(earnings) => {
                info!(
                    "{} sold {} fractions of asset {} for {}",
                    seller,
                    fractions,
                    asset_id,
                    format_wad(earnings)
                );
                Ok(earnings)
            }
            Err(e) => {
                warn!("Sell rejected for {} on asset {}: {}", seller, asset_id, e);
                Err(e.into())
            }
        }
    }

    pub async fn withdraw(&self, caller: AccountId, amount: Wad) -> Result<(), AppError> {
        let mut engine = self.engine.lock().await;
        match engine.withdraw(caller, amount) {
            Ok(()) => {
                info!("{} withdrew {} from custody", caller, format_wad(amount));
                Ok(())
            }
            Err(e) => {
                warn!("Withdraw rejected for {}: {}", caller, e);
                Err(e.into())
            }
        }
    }

    pub async fn get_pool(&self, asset_id: AssetId) -> Option<LiquidityPool> {
        self.engine.lock().await.get_pool(asset_id)
    }

    pub async fn current_price(&self, asset_id: AssetId) -> Result<Wad, AppError> {
        Ok(self.engine.lock().await.current_price(asset_id)?)
    }

    pub async fn custodian_funds(&self) -> Wad {
        let engine = self.engine.lock().await;
        engine.settlement().balance_of(engine.custodian())
    }

    pub async fn custodian_fractions(&self, asset_id: AssetId) -> u64 {
        let engine = self.engine.lock().await;
        engine.fraction_ledger().balance_of(asset_id, engine.custodian())
    }

    pub async fn holder_fractions(&self, asset_id: AssetId, holder: AccountId) -> u64 {
        self.engine
            .lock()
            .await
            .fraction_ledger()
            .balance_of(asset_id, holder)
    }

    pub async fn events(&self) -> Vec<EventRecord> {
        self.engine.lock().await.events().to_vec()
    }
}
