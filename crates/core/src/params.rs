//! Auction pricing parameters.

use serde::{Deserialize, Serialize};

use crate::error::{AuctionError, AuctionResult};
use crate::wad_math::{wad_from_bps, Wad, WAD};

/// Default auction length in seconds.
pub const AUCTION_DURATION_SECS: u64 = 3600;

/// Richest price multiplier: 1.05
pub const MAX_PRICE_MULTIPLIER_BPS: u16 = 10_500;

/// Cheapest price multiplier: 0.95
pub const MIN_PRICE_MULTIPLIER_BPS: u16 = 9_500;

/// What to do when the clock reads earlier than the auction trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRangePolicy {
    /// Fail with `InvalidTimeRange`
    #[default]
    Reject,
    /// Price as if the auction had just started
    Clamp,
}

/// Constants the time-decay interpolation runs with.
///
/// Pricing functions call [`AuctionParams::validate`] before use, so a
/// hand-built value with inverted multipliers fails with `InvalidParams`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionParams {
    pub duration_secs: u64,
    pub max_multiplier: Wad,
    pub min_multiplier: Wad,
    pub time_range_policy: TimeRangePolicy,
}

impl Default for AuctionParams {
    fn default() -> Self {
        Self {
            duration_secs: AUCTION_DURATION_SECS,
            max_multiplier: wad_from_bps(MAX_PRICE_MULTIPLIER_BPS),
            min_multiplier: wad_from_bps(MIN_PRICE_MULTIPLIER_BPS),
            time_range_policy: TimeRangePolicy::Reject,
        }
    }
}

impl AuctionParams {
    pub fn with_duration(mut self, duration_secs: u64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn with_time_range_policy(mut self, policy: TimeRangePolicy) -> Self {
        self.time_range_policy = policy;
        self
    }

    /// Build from multipliers in basis points.
    pub fn from_bps(duration_secs: u64, max_bps: u16, min_bps: u16) -> AuctionResult<Self> {
        let params = Self {
            duration_secs,
            max_multiplier: wad_from_bps(max_bps),
            min_multiplier: wad_from_bps(min_bps),
            time_range_policy: TimeRangePolicy::default(),
        };
        params.validate()?;
        Ok(params)
    }

    /// Requires a non-zero duration and `min < 1.0 < max`.
    pub fn validate(&self) -> AuctionResult<()> {
        if self.duration_secs == 0 {
            return Err(AuctionError::InvalidParams("auction duration must be non-zero".into()));
        }
        if !(self.min_multiplier < WAD && WAD < self.max_multiplier) {
            return Err(AuctionError::InvalidParams(format!(
                "multipliers must satisfy min < 1.0 < max (min {}, max {})",
                self.min_multiplier, self.max_multiplier
            )));
        }
        Ok(())
    }

    /// `max - min`, the full travel of the multiplier.
    pub fn multiplier_span(&self) -> Wad {
        self.max_multiplier.saturating_sub(self.min_multiplier)
    }
}
