//! Error types for auction valuation and evaluation.

use alloy::primitives::U256;
use thiserror::Error;

/// Failures of the pure valuation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("fixed-point overflow")]
    Overflow,

    /// Imbalance ratio at or below the hedge threshold: nothing to do.
    #[error("strategy is delta neutral (ratio {ratio} <= threshold {threshold})")]
    DeltaNeutral { ratio: U256, threshold: U256 },

    #[error("current time {now} is before auction trigger time {trigger}")]
    InvalidTimeRange { trigger: u64, now: u64 },

    #[error("invalid auction parameters: {0}")]
    InvalidParams(String),
}

impl AuctionError {
    /// True for the "no hedge warranted" signal, false for real failures.
    pub fn is_delta_neutral(&self) -> bool {
        matches!(self, Self::DeltaNeutral { .. })
    }
}

pub type AuctionResult<T> = Result<T, AuctionError>;

/// Failures of one evaluation cycle driven from chain reads.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("chain read failed: {0:#}")]
    Read(#[from] anyhow::Error),

    #[error(transparent)]
    Engine(#[from] AuctionError),
}
