//! Error handling for the marketplace engine

use thiserror::Error;

use super::types::AssetId;

/// Ledger capability errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Insufficient allowance")]
    InsufficientAllowance,

    #[error("Balance overflow")]
    Overflow,
}

/// Pool registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Invalid pool parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("Pool already exists for asset {0}")]
    AlreadyExists(AssetId),

    #[error("Pool not found for asset {0}")]
    NotFound(AssetId),

    #[error("Creator holds {held} fractions, {required} required")]
    InsufficientInventory { held: u64, required: u64 },
}

/// Pricing errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    #[error("Division by zero in price computation")]
    DivisionByZero,

    #[error("Arithmetic overflow in price computation")]
    Overflow,
}

/// Exchange operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    #[error("Pool not found for asset {0}")]
    PoolNotFound(AssetId),

    #[error("Trade amount must be greater than zero")]
    InvalidAmount,

    #[error("Requested {requested} fractions, only {available} available")]
    InsufficientInventory { requested: u64, available: u64 },

    #[error("Returning {returned} fractions would exceed pool capacity of {capacity}")]
    ExceedsPoolCapacity { returned: u64, capacity: u64 },

    #[error("Insufficient settlement allowance")]
    InsufficientAllowance,

    #[error("Insufficient balance")]
    InsufficientFunds,

    #[error("Pool custodian cannot cover the payout")]
    InsufficientPoolFunds,

    #[error("Arithmetic overflow computing trade value")]
    Overflow,

    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),
}

impl From<LedgerError> for TradeError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds => TradeError::InsufficientFunds,
            LedgerError::InsufficientAllowance => TradeError::InsufficientAllowance,
            LedgerError::Overflow => TradeError::Overflow,
        }
    }
}

/// Administration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    #[error("Caller is not privileged")]
    Unauthorized,

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Insufficient funds in custody")]
    InsufficientFunds,

    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Trade rejected: {0}")]
    Trade(#[from] TradeError),

    #[error("Admin operation failed: {0}")]
    Admin(#[from] AdminError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<PoolError> for AppError {
    fn from(err: PoolError) -> Self {
        AppError::Admin(AdminError::Pool(err))
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        AppError::Trade(TradeError::Pricing(err))
    }
}
