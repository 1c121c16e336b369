//! Squeeth TWAP oracle reader.

use alloy::eips::BlockId;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::bindings::ISqueethOracle;

/// Which pool and window a TWAP is read over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwapQuery {
    /// Uniswap v3 pool
    pub pool: Address,
    /// Priced token (oSQTH)
    pub base: Address,
    /// Quote token (WETH)
    pub quote: Address,
    /// Averaging window in seconds
    pub period_secs: u32,
    /// Revert instead of shortening the window when the pool lacks history
    pub check_period: bool,
}

impl TwapQuery {
    pub fn new(pool: Address, base: Address, quote: Address) -> Self {
        Self {
            pool,
            base,
            quote,
            period_secs: 1,
            check_period: true,
        }
    }

    pub fn with_period(mut self, period_secs: u32) -> Self {
        self.period_secs = period_secs;
        self
    }

    pub fn with_check_period(mut self, check_period: bool) -> Self {
        self.check_period = check_period;
        self
    }
}

/// Source of time-weighted prices.
#[async_trait]
pub trait TwapOracle: Send + Sync {
    /// TWAP of `query.base` in `query.quote` (WAD) at `at`.
    async fn twap(&self, query: &TwapQuery, at: BlockId) -> Result<U256>;
}

/// Reads the Squeeth oracle contract over RPC.
#[derive(Clone)]
pub struct SqueethOracle<P> {
    address: Address,
    provider: Arc<P>,
}

impl<P> std::fmt::Debug for SqueethOracle<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqueethOracle")
            .field("address", &self.address)
            .finish()
    }
}

impl<P: Provider + Clone + 'static> SqueethOracle<P> {
    pub fn new(address: Address, provider: Arc<P>) -> Self {
        Self { address, provider }
    }
}

#[async_trait]
impl<P: Provider + Clone + Send + Sync + 'static> TwapOracle for SqueethOracle<P> {
    async fn twap(&self, query: &TwapQuery, at: BlockId) -> Result<U256> {
        let contract = ISqueethOracle::new(self.address, &*self.provider);
        let price = contract
            .getTwap(
                query.pool,
                query.base,
                query.quote,
                query.period_secs,
                query.check_period,
            )
            .block(at)
            .call()
            .await
            .with_context(|| format!("Failed to read TWAP from oracle {}", self.address))?
            ._0;

        debug!(
            pool = %query.pool,
            period = query.period_secs,
            price = %price,
            "TWAP fetched"
        );

        Ok(price)
    }
}
