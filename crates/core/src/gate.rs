//! Decides whether an evaluation should run at all this cycle.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::types::AuctionTrigger;

/// Why an evaluation was skipped. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Trigger time is zero
    NoAuction,
    /// Trigger time is later than the current time
    TriggerInFuture,
    /// Delta hedge threshold reads as zero (strategy state not loaded)
    ThresholdNotLoaded,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::NoAuction => "no auction triggered",
            Self::TriggerInFuture => "auction trigger time is in the future",
            Self::ThresholdNotLoaded => "delta hedge threshold not loaded",
        };
        f.write_str(reason)
    }
}

/// `None` when the auction is priceable right now.
pub fn gate(trigger: AuctionTrigger, now: u64, delta_hedge_threshold: U256) -> Option<SkipReason> {
    if !trigger.is_active() {
        return Some(SkipReason::NoAuction);
    }
    if trigger.auction_trigger_time > now {
        return Some(SkipReason::TriggerInFuture);
    }
    if delta_hedge_threshold.is_zero() {
        return Some(SkipReason::ThresholdNotLoaded);
    }
    None
}
