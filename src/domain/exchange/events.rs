//! Trade notifications
//!
//! Append-only and never retracted. One record is produced per successful
//! state mutation; failed operations leave the log untouched.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::pricing::Wad;
use crate::shared::types::{AccountId, AssetId};

/// Externally observable market notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum MarketEvent {
    PoolCreated {
        asset_id: AssetId,
        fractions: u64,
        base_price: Wad,
        exponent: u32,
    },
    Traded {
        asset_id: AssetId,
        buyer: AccountId,
        fractions: u64,
        total_cost: Wad,
    },
    Sold {
        asset_id: AssetId,
        seller: AccountId,
        fractions: u64,
        total_earnings: Wad,
    },
}

/// A logged notification with its identity and wall-clock timestamp
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: MarketEvent,
}

/// Append-only notification log
#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn append(&mut self, event: MarketEvent) {
        self.records.push(EventRecord {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            event,
        });
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::WAD;

    #[test]
    fn test_append_preserves_order() {
        let mut log = EventLog::new();
        log.append(MarketEvent::PoolCreated {
            asset_id: 1,
            fractions: 100,
            base_price: WAD,
            exponent: 2,
        });
        log.append(MarketEvent::Traded {
            asset_id: 1,
            buyer: AccountId(7),
            fractions: 10,
            total_cost: 10 * WAD,
        });
        assert_eq!(log.len(), 2);
        assert!(matches!(
            log.records()[0].event,
            MarketEvent::PoolCreated { asset_id: 1, .. }
        ));
        assert!(matches!(
            log.records()[1].event,
            MarketEvent::Traded { fractions: 10, .. }
        ));
    }

    #[test]
    fn test_records_serialize_with_kind_tag() {
        let mut log = EventLog::new();
        log.append(MarketEvent::Sold {
            asset_id: 3,
            seller: AccountId(9),
            fractions: 4,
            total_earnings: 2 * WAD,
        });
        let json = serde_json::to_string(&log.records()[0]).unwrap();
        assert!(json.contains("\"kind\":\"Sold\""));
        assert!(json.contains("\"total_earnings\""));
    }
}
