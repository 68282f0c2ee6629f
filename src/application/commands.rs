//! CLI commands and handlers

use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::domain::exchange::MarketEngine;
use crate::domain::pool::LiquidityPool;
use crate::domain::pricing::spot_price;
use crate::infrastructure::memory::{
    MemoryFractionLedger, MemorySettlementLedger, StaticAccessControl,
};
use crate::shared::config::MarketConfig;
use crate::shared::errors::AppError;
use crate::shared::types::AccountId;
use crate::shared::utils::{format_wad, whole_to_wad};

use super::services::MarketService;

#[derive(Parser)]
#[command(name = "fracpools")]
#[command(about = "Fractional asset marketplace liquidity engine")]
pub struct Cli {
    /// Path to a TOML config file (optional)
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Price a pool at an explicit inventory level
    Quote {
        /// Total fractions in the pool
        #[arg(short, long)]
        total: u64,

        /// Fractions currently available
        #[arg(short, long)]
        available: u64,

        /// Whole settlement tokens per fraction at full stock
        #[arg(short, long, default_value_t = 1)]
        base_price: u64,

        /// Curve steepness
        #[arg(short, long, default_value_t = 2)]
        exponent: u32,
    },

    /// Print the price ladder as a pool depletes
    Curve {
        /// Total fractions in the pool
        #[arg(short, long, default_value_t = 1000)]
        total: u64,

        /// Whole settlement tokens per fraction at full stock
        #[arg(short, long, default_value_t = 1)]
        base_price: u64,

        /// Curve steepness
        #[arg(short, long, default_value_t = 2)]
        exponent: u32,

        /// Number of depletion levels to show
        #[arg(short, long, default_value_t = 10)]
        steps: u64,

        /// Emit the ladder as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a randomized in-memory trading session
    Simulate {
        /// Seed for the trade sequence
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Override the configured number of rounds
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Dump the notification log as JSON when done
        #[arg(long)]
        json: bool,
    },
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(command: Commands, config: MarketConfig) -> Result<(), AppError> {
        match command {
            Commands::Quote {
                total,
                available,
                base_price,
                exponent,
            } => Self::execute_quote_command(total, available, base_price, exponent),
            Commands::Curve {
                total,
                base_price,
                exponent,
                steps,
                json,
            } => Self::execute_curve_command(total, base_price, exponent, steps, json),
            Commands::Simulate { seed, rounds, json } => {
                Self::execute_simulate_command(config, seed, rounds, json).await
            }
        }
    }

    fn execute_quote_command(
        total: u64,
        available: u64,
        base_price: u64,
        exponent: u32,
    ) -> Result<(), AppError> {
        if available == 0 || available > total {
            return Err(AppError::ConfigError(format!(
                "available must be in 1..={}, got {}",
                total, available
            )));
        }
        let pool = LiquidityPool {
            total_fractions: total,
            available_fractions: available,
            base_price: whole_to_wad(base_price),
            exponent,
        };
        let price = spot_price(&pool)?;
        println!(
            "{} of {} fractions available -> {} per fraction",
            available,
            total,
            format_wad(price)
        );
        Ok(())
    }

    fn execute_curve_command(
        total: u64,
        base_price: u64,
        exponent: u32,
        steps: u64,
        json: bool,
    ) -> Result<(), AppError> {
        if total == 0 || steps == 0 {
            return Err(AppError::ConfigError(
                "total and steps must be greater than zero".to_string(),
            ));
        }
        let stride = (total / steps).max(1);
        let mut ladder = Vec::new();
        let mut available = total;
        while available >= 1 {
            let pool = LiquidityPool {
                total_fractions: total,
                available_fractions: available,
                base_price: whole_to_wad(base_price),
                exponent,
            };
            ladder.push((available, spot_price(&pool)?));
            if available <= stride {
                break;
            }
            available -= stride;
        }

        if json {
            let rows: Vec<serde_json::Value> = ladder
                .iter()
                .map(|(available, price)| {
                    serde_json::json!({
                        "available": available,
                        "price_wad": price.to_string(),
                        "price": format_wad(*price),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&rows)
                    .map_err(|e| AppError::Unknown(e.to_string()))?
            );
        } else {
            println!("available | price per fraction");
            for (available, price) in &ladder {
                println!("{:>9} | {}", available, format_wad(*price));
            }
        }
        Ok(())
    }

    async fn execute_simulate_command(
        config: MarketConfig,
        seed: u64,
        rounds_override: Option<u32>,
        json: bool,
    ) -> Result<(), AppError> {
        let custodian = AccountId(0);
        let admin = AccountId(1);
        let pool_cfg = &config.pool;
        let sim_cfg = &config.simulation;
        let rounds = rounds_override.unwrap_or(sim_cfg.rounds);

        info!("🎲 Simulating {} rounds with seed {}", rounds, seed);

        let mut settlement = MemorySettlementLedger::new();
        let mut fractions = MemoryFractionLedger::new();
        fractions
            .mint(pool_cfg.asset_id, admin, pool_cfg.total_fractions)
            .map_err(|e| AppError::Unknown(e.to_string()))?;

        let traders: Vec<AccountId> = (0..sim_cfg.traders)
            .map(|i| AccountId(100 + u64::from(i)))
            .collect();
        for trader in &traders {
            let stake = whole_to_wad(sim_cfg.initial_balance);
            settlement
                .mint(*trader, stake)
                .map_err(|e| AppError::Unknown(e.to_string()))?;
            settlement.approve(*trader, custodian, stake);
        }

        let access = StaticAccessControl::with_privileged([admin]);
        let service = MarketService::new(MarketEngine::new(
            settlement, fractions, access, custodian,
        ));
        service
            .create_pool(
                admin,
                pool_cfg.asset_id,
                pool_cfg.total_fractions,
                whole_to_wad(pool_cfg.base_price),
                pool_cfg.exponent,
            )
            .await?;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut buys = 0u32;
        let mut sells = 0u32;
        let mut rejected = 0u32;

        for _ in 0..rounds {
            let trader = traders[rng.gen_range(0..traders.len())];
            let amount = rng.gen_range(1..=sim_cfg.max_trade_fractions);
            let outcome = if rng.gen_bool(0.5) {
                service.buy(trader, pool_cfg.asset_id, amount).await.map(|_| ())
            } else {
                service.sell(trader, pool_cfg.asset_id, amount).await.map(|_| ())
            };
            if outcome.is_err() {
                rejected += 1;
            }
        }
        for record in service.events().await {
            match record.event {
                crate::domain::exchange::MarketEvent::Traded { .. } => buys += 1,
                crate::domain::exchange::MarketEvent::Sold { .. } => sells += 1,
                crate::domain::exchange::MarketEvent::PoolCreated { .. } => {}
            }
        }

        let pool = service
            .get_pool(pool_cfg.asset_id)
            .await
            .ok_or_else(|| AppError::Unknown("pool vanished after simulation".to_string()))?;
        let custodian_fractions = service.custodian_fractions(pool_cfg.asset_id).await;
        let mut circulating = 0u64;
        for trader in &traders {
            circulating += service.holder_fractions(pool_cfg.asset_id, *trader).await;
        }

        info!("📊 Session summary:");
        info!("   Rounds: {}", rounds);
        info!("   Buys: {}  Sells: {}  Rejected: {}", buys, sells, rejected);
        info!(
            "   Pool inventory: {}/{}",
            pool.available_fractions, pool.total_fractions
        );
        info!(
            "   Custody: {} settlement tokens",
            format_wad(service.custodian_funds().await)
        );
        match service.current_price(pool_cfg.asset_id).await {
            Ok(price) => info!("   Current price: {} per fraction", format_wad(price)),
            Err(_) => info!("   Current price: undefined (pool empty)"),
        }

        // conservation must survive any sequence of trades
        if custodian_fractions + circulating != pool.total_fractions
            || custodian_fractions != pool.available_fractions
        {
            return Err(AppError::Unknown(format!(
                "conservation violated: custodian={} circulating={} total={}",
                custodian_fractions, circulating, pool.total_fractions
            )));
        }
        info!("✅ Conservation checks passed");

        if json {
            let events = service.events().await;
            println!(
                "{}",
                serde_json::to_string_pretty(&events)
                    .map_err(|e| AppError::Unknown(e.to_string()))?
            );
        }
        Ok(())
    }
}
