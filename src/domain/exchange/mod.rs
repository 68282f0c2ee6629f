//! Exchange domain - buy/sell orchestration and notifications

mod events;
mod market_engine;

pub use events::{EventLog, EventRecord, MarketEvent};
pub use market_engine::MarketEngine;
