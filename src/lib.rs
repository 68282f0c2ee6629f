//! Fracpools - fractional asset marketplace liquidity engine
//! Built with Domain-Driven Design principles

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use domain::exchange::{EventRecord, MarketEngine, MarketEvent};
pub use domain::ledger::{AccessControl, FractionLedger, SettlementLedger};
pub use domain::pool::{LiquidityPool, PoolRegistry};
pub use domain::pricing::{spot_price, Wad, WAD};
pub use infrastructure::memory::{
    MemoryFractionLedger, MemorySettlementLedger, StaticAccessControl,
};
