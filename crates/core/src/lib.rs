//! Crab auction valuation core.
//!
//! This crate provides the off-chain valuation of Crab strategy hedge auctions:
//! - WAD fixed-point arithmetic matching the on-chain truncation
//! - Direction classification of the vault's delta imbalance
//! - Time-decayed auction price and price bounds
//! - Two-pass auction detail aggregation with direction flip detection
//! - An evaluator that pins every chain read to one block
//!
//! The valuation functions are pure; only [`AuctionEvaluator`] touches the chain.

mod clock;
pub mod config;
mod details;
mod direction;
mod error;
mod evaluator;
mod gate;
mod params;
mod price;
mod types;
pub mod wad_math;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    AuctionConfig, ContractsConfig, MonitorConfig, OracleConfig, ScannerTimingConfig,
};
pub use details::{auction_details, decayed_pass, spot_pass};
pub use direction::{classify, token_delta};
pub use error::{AuctionError, AuctionResult, EvaluationError};
pub use evaluator::{AuctionEvaluator, Evaluation};
pub use gate::{gate, SkipReason};
pub use params::{
    AuctionParams, TimeRangePolicy, AUCTION_DURATION_SECS, MAX_PRICE_MULTIPLIER_BPS,
    MIN_PRICE_MULTIPLIER_BPS,
};
pub use price::{auction_price, completion_ratio, price_bounds, price_multiplier};
pub use types::{
    AuctionDetails, AuctionDirection, AuctionInput, AuctionTrigger, HedgeTarget, HedgeThresholds,
    PriceBounds, StrategyState, VaultState,
};
pub use wad_math::{Wad, WAD};
