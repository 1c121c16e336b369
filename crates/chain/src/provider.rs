//! Provider management for the HTTP RPC connection.
//! Uses Alloy providers for type-safe RPC interactions.

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Source of the block every read of one evaluation is pinned to.
#[async_trait]
pub trait BlockSource: Send + Sync {
    async fn latest_block(&self) -> Result<u64>;
}

/// Owns the RPC provider shared by all readers.
#[derive(Clone)]
pub struct ProviderManager {
    /// HTTP URL
    http_url: String,
    /// Connected provider
    provider: Arc<DynProvider>,
    /// Chain ID reported by the node
    chain_id: u64,
}

impl std::fmt::Debug for ProviderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderManager")
            .field("http_url", &self.http_url)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

impl ProviderManager {
    /// Connect to `http_url` and verify the node answers.
    pub async fn new(http_url: &str) -> Result<Self> {
        info!(http = http_url, "Initializing provider manager with Alloy provider");

        let provider = ProviderBuilder::new()
            .on_http(
                http_url
                    .parse()
                    .with_context(|| format!("Invalid RPC URL: {http_url}"))?,
            )
            .erased();

        let chain_id = provider
            .get_chain_id()
            .await
            .context("Failed to fetch chain id")?;
        let block = provider
            .get_block_number()
            .await
            .context("Failed to fetch block number")?;
        info!(chain_id, block, "Provider connection verified");

        Ok(Self {
            http_url: http_url.to_string(),
            provider: Arc::new(provider),
            chain_id,
        })
    }

    /// Get the HTTP URL.
    pub fn http_url(&self) -> &str {
        &self.http_url
    }

    /// Chain ID observed at connect time.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Shared provider handle for contract readers.
    pub fn provider(&self) -> Arc<DynProvider> {
        Arc::clone(&self.provider)
    }

    /// Check if provider is healthy.
    pub async fn health_check(&self) -> Result<bool> {
        let block = self.latest_block().await?;
        debug!(block = block, "Provider health check passed");
        Ok(block > 0)
    }
}

#[async_trait]
impl BlockSource for ProviderManager {
    async fn latest_block(&self) -> Result<u64> {
        self.provider
            .get_block_number()
            .await
            .context("Failed to fetch block number")
    }
}
