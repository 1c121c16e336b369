//! Crab strategy reader.

use alloy::eips::BlockId;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::bindings::ICrabStrategy;

/// Hedge bookkeeping and auction trigger of the strategy at one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyData {
    /// Controller vault owned by the strategy
    pub vault_id: U256,
    /// Unix seconds of the last hedge
    pub time_at_last_hedge: u64,
    /// oSQTH price at the last hedge (WAD)
    pub price_at_last_hedge: U256,
    /// Seconds between time hedges
    pub hedge_time_threshold: u64,
    /// Price move allowing a price hedge (WAD)
    pub hedge_price_threshold: U256,
    /// Whether a time hedge is currently allowed
    pub is_time_hedge_available: bool,
    /// Unix seconds the current auction started decaying
    pub auction_trigger_time: u64,
    /// Minimum imbalance ratio worth hedging (WAD)
    pub delta_hedge_threshold: U256,
}

/// Auction constants the strategy contract was deployed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionConstants {
    pub auction_time_secs: u64,
    pub min_price_multiplier: U256,
    pub max_price_multiplier: U256,
}

/// Source of strategy state.
#[async_trait]
pub trait StrategyReader: Send + Sync {
    /// Read the strategy state at `at`.
    async fn strategy_state(&self, at: BlockId) -> Result<StrategyData>;

    /// Read the auction constants.
    async fn auction_constants(&self, at: BlockId) -> Result<AuctionConstants>;
}

/// Reads a Crab strategy contract over RPC.
#[derive(Clone)]
pub struct CrabStrategyReader<P> {
    address: Address,
    provider: Arc<P>,
}

impl<P> std::fmt::Debug for CrabStrategyReader<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrabStrategyReader")
            .field("address", &self.address)
            .finish()
    }
}

impl<P: Provider + Clone + 'static> CrabStrategyReader<P> {
    pub fn new(address: Address, provider: Arc<P>) -> Self {
        Self { address, provider }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl<P: Provider + Clone + Send + Sync + 'static> StrategyReader for CrabStrategyReader<P> {
    async fn strategy_state(&self, at: BlockId) -> Result<StrategyData> {
        let contract = ICrabStrategy::new(self.address, &*self.provider);

        let vault_id = contract.vaultId().block(at);
        let time_at_last_hedge = contract.timeAtLastHedge().block(at);
        let price_at_last_hedge = contract.priceAtLastHedge().block(at);
        let hedge_time_threshold = contract.hedgeTimeThreshold().block(at);
        let hedge_price_threshold = contract.hedgePriceThreshold().block(at);
        let time_hedge = contract.checkTimeHedge().block(at);
        let delta_hedge_threshold = contract.deltaHedgeThreshold().block(at);

        let (vault_id, time, price, time_threshold, price_threshold, time_hedge, delta_threshold) =
            tokio::try_join!(
                vault_id.call(),
                time_at_last_hedge.call(),
                price_at_last_hedge.call(),
                hedge_time_threshold.call(),
                hedge_price_threshold.call(),
                time_hedge.call(),
                delta_hedge_threshold.call(),
            )
            .with_context(|| format!("Failed to read strategy state from {}", self.address))?;

        let data = StrategyData {
            vault_id: vault_id._0,
            time_at_last_hedge: time._0.saturating_to::<u64>(),
            price_at_last_hedge: price._0,
            hedge_time_threshold: time_threshold._0.saturating_to::<u64>(),
            hedge_price_threshold: price_threshold._0,
            is_time_hedge_available: time_hedge.isTimeHedgeAllowed,
            auction_trigger_time: time_hedge.auctionTriggerTime.saturating_to::<u64>(),
            delta_hedge_threshold: delta_threshold._0,
        };

        debug!(
            strategy = %self.address,
            vault_id = %data.vault_id,
            auction_trigger_time = data.auction_trigger_time,
            time_hedge = data.is_time_hedge_available,
            "Strategy state fetched"
        );

        Ok(data)
    }

    async fn auction_constants(&self, at: BlockId) -> Result<AuctionConstants> {
        let contract = ICrabStrategy::new(self.address, &*self.provider);

        let auction_time = contract.auctionTime().block(at);
        let min_multiplier = contract.minPriceMultiplier().block(at);
        let max_multiplier = contract.maxPriceMultiplier().block(at);

        let (auction_time, min_multiplier, max_multiplier) = tokio::try_join!(
            auction_time.call(),
            min_multiplier.call(),
            max_multiplier.call(),
        )
        .with_context(|| format!("Failed to read auction constants from {}", self.address))?;

        Ok(AuctionConstants {
            auction_time_secs: auction_time._0.saturating_to::<u64>(),
            min_price_multiplier: min_multiplier._0,
            max_price_multiplier: max_multiplier._0,
        })
    }
}
