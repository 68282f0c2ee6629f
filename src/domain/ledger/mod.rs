//! Ledger domain - external balance and authorization capabilities

mod ledger_interface;

pub use ledger_interface::{AccessControl, FractionLedger, SettlementLedger};
