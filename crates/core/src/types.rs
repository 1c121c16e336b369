//! Data model of one auction evaluation.
//!
//! Every value here is an immutable snapshot: the engine never mutates its
//! inputs and owns no state between evaluations.

use alloy::primitives::U256;
use crab_auction_chain::{StrategyData, VaultData};
use serde::{Deserialize, Serialize};

use crate::wad_math::Wad;

/// Collateral and debt of the strategy vault at one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultState {
    /// Collateral in the base asset (WETH)
    pub collateral_amount: Wad,
    /// Outstanding debt in the tracked token (oSQTH)
    pub short_amount: Wad,
}

impl From<VaultData> for VaultState {
    fn from(vault: VaultData) -> Self {
        Self {
            collateral_amount: vault.collateral_amount,
            short_amount: vault.short_amount,
        }
    }
}

/// Which side of the auction is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionDirection {
    /// The vault offers the tracked token to the counterparty
    Selling,
    /// The vault needs to acquire the tracked token
    Buying,
}

impl AuctionDirection {
    pub fn is_selling(&self) -> bool {
        matches!(self, Self::Selling)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Selling => "selling",
            Self::Buying => "buying",
        }
    }
}

impl std::fmt::Display for AuctionDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moment the current auction started decaying. Zero means no auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuctionTrigger {
    pub auction_trigger_time: u64,
}

impl AuctionTrigger {
    pub fn new(auction_trigger_time: u64) -> Self {
        Self { auction_trigger_time }
    }

    pub fn is_active(&self) -> bool {
        self.auction_trigger_time != 0
    }
}

/// Hedge bookkeeping of the strategy.
///
/// Only `delta_hedge_threshold` enters the valuation math. The rest gates
/// whether an evaluation runs and is reported alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HedgeThresholds {
    /// Minimum imbalance, relative to collateral, worth hedging
    pub delta_hedge_threshold: Wad,
    /// Seconds between time-based hedges
    pub hedge_time_threshold: u64,
    /// Relative price move that allows a price-based hedge
    pub hedge_price_threshold: Wad,
    /// Timestamp of the last hedge
    pub time_at_last_hedge: u64,
    /// oSQTH price at the last hedge
    pub price_at_last_hedge: Wad,
}

/// Strategy contract state read once per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyState {
    pub vault_id: U256,
    pub thresholds: HedgeThresholds,
    pub trigger: AuctionTrigger,
    pub is_time_hedge_available: bool,
}

impl From<StrategyData> for StrategyState {
    fn from(data: StrategyData) -> Self {
        Self {
            vault_id: data.vault_id,
            thresholds: HedgeThresholds {
                delta_hedge_threshold: data.delta_hedge_threshold,
                hedge_time_threshold: data.hedge_time_threshold,
                hedge_price_threshold: data.hedge_price_threshold,
                time_at_last_hedge: data.time_at_last_hedge,
                price_at_last_hedge: data.price_at_last_hedge,
            },
            trigger: AuctionTrigger::new(data.auction_trigger_time),
            is_time_hedge_available: data.is_time_hedge_available,
        }
    }
}

/// Direction and size of the hedge the vault needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeTarget {
    pub direction: AuctionDirection,
    /// Imbalance expressed in tracked-token units
    pub target: Wad,
}

/// Everything one aggregator pass consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionInput {
    pub trigger: AuctionTrigger,
    /// Unix seconds
    pub now: u64,
    pub vault: VaultState,
    /// TWAP of the tracked token in the base asset
    pub oracle_price: Wad,
    pub delta_hedge_threshold: Wad,
}

/// Decision payload of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionDetails {
    pub is_selling: bool,
    pub o_sqth_amount: Wad,
    pub eth_proceeds: Wad,
    pub auction_price: Wad,
    /// Spot and decayed classification disagree; abstain this cycle
    pub is_direction_changed: bool,
}

impl AuctionDetails {
    pub fn direction(&self) -> AuctionDirection {
        if self.is_selling {
            AuctionDirection::Selling
        } else {
            AuctionDirection::Buying
        }
    }
}

/// Extreme clearing prices an auction can reach, for range display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBounds {
    /// Price at auction start
    pub min_price: Wad,
    /// Price once the auction duration has elapsed
    pub max_price: Wad,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wad_math::wad;
    use alloy::primitives::Address;

    #[test]
    fn test_vault_state_from_chain() {
        let data = VaultData {
            operator: Address::ZERO,
            nft_collateral_id: 0,
            collateral_amount: wad(10, 0),
            short_amount: wad(25, 0),
        };
        let vault = VaultState::from(data);
        assert_eq!(vault.collateral_amount, wad(10, 0));
        assert_eq!(vault.short_amount, wad(25, 0));
    }

    #[test]
    fn test_strategy_state_from_chain() {
        let data = StrategyData {
            vault_id: U256::from(70u64),
            time_at_last_hedge: 1_700_000_000,
            price_at_last_hedge: wad(0, 200_000_000_000_000_000),
            hedge_time_threshold: 86_400,
            hedge_price_threshold: wad(0, 200_000_000_000_000_000),
            is_time_hedge_available: true,
            auction_trigger_time: 1_700_086_400,
            delta_hedge_threshold: wad(0, 10_000_000_000_000_000),
        };
        let state = StrategyState::from(data);
        assert_eq!(state.vault_id, U256::from(70u64));
        assert!(state.trigger.is_active());
        assert_eq!(state.trigger.auction_trigger_time, 1_700_086_400);
        assert_eq!(state.thresholds.hedge_time_threshold, 86_400);
        assert!(state.is_time_hedge_available);
    }

    #[test]
    fn test_details_serialize_camel_case() {
        let details = AuctionDetails {
            is_selling: true,
            o_sqth_amount: wad(1, 0),
            eth_proceeds: wad(0, 190_000_000_000_000_000),
            auction_price: wad(0, 190_000_000_000_000_000),
            is_direction_changed: false,
        };
        let json = serde_json::to_string(&details).unwrap();
        assert!(json.contains("\"isSelling\":true"));
        assert!(json.contains("\"oSqthAmount\""));
        assert!(json.contains("\"isDirectionChanged\":false"));
        assert_eq!(details.direction(), AuctionDirection::Selling);
    }
}
