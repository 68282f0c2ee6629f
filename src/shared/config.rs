//! Configuration loading for the CLI

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// Default pool parameters for the simulation
#[derive(Debug, Clone, Deserialize)]
pub struct PoolCfg {
    pub asset_id: u64,
    pub total_fractions: u64,
    /// Whole settlement tokens per fraction at full stock
    pub base_price: u64,
    pub exponent: u32,
}

/// Simulation session parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationCfg {
    pub traders: u32,
    pub rounds: u32,
    /// Whole settlement tokens minted to each trader
    pub initial_balance: u64,
    /// Upper bound on fractions per randomized trade
    pub max_trade_fractions: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    pub pool: PoolCfg,
    pub simulation: SimulationCfg,
}

impl MarketConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())?;
        let cfg: Self = toml::from_str(&s).context("parse market config")?;
        Ok(cfg)
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            pool: PoolCfg {
                asset_id: 1,
                total_fractions: 1_000,
                base_price: 1,
                exponent: 2,
            },
            simulation: SimulationCfg {
                traders: 4,
                rounds: 50,
                initial_balance: 10_000,
                max_trade_fractions: 25,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let raw = r#"
            [pool]
            asset_id = 7
            total_fractions = 500
            base_price = 2
            exponent = 3

            [simulation]
            traders = 2
            rounds = 10
            initial_balance = 1000
            max_trade_fractions = 5
        "#;
        let cfg: MarketConfig = toml::from_str(raw).unwrap();
        assert_eq!(cfg.pool.asset_id, 7);
        assert_eq!(cfg.pool.exponent, 3);
        assert_eq!(cfg.simulation.rounds, 10);
    }
}
