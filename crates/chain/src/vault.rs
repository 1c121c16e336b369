//! Controller vault reader.

use alloy::eips::BlockId;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::bindings::IController;

/// A controller vault as stored on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultData {
    pub operator: Address,
    pub nft_collateral_id: u32,
    /// WETH collateral (WAD)
    pub collateral_amount: U256,
    /// oSQTH debt (WAD)
    pub short_amount: U256,
}

/// Source of vault state.
#[async_trait]
pub trait VaultReader: Send + Sync {
    /// Read vault `vault_id` at `at`.
    async fn vault(&self, vault_id: U256, at: BlockId) -> Result<VaultData>;
}

/// Reads vaults from the Squeeth controller over RPC.
#[derive(Clone)]
pub struct ControllerVaultReader<P> {
    controller: Address,
    provider: Arc<P>,
}

impl<P> std::fmt::Debug for ControllerVaultReader<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerVaultReader")
            .field("controller", &self.controller)
            .finish()
    }
}

impl<P: Provider + Clone + 'static> ControllerVaultReader<P> {
    pub fn new(controller: Address, provider: Arc<P>) -> Self {
        Self { controller, provider }
    }
}

#[async_trait]
impl<P: Provider + Clone + Send + Sync + 'static> VaultReader for ControllerVaultReader<P> {
    async fn vault(&self, vault_id: U256, at: BlockId) -> Result<VaultData> {
        let contract = IController::new(self.controller, &*self.provider);
        let vault = contract
            .vaults(vault_id)
            .block(at)
            .call()
            .await
            .with_context(|| format!("Failed to read vault {vault_id} from {}", self.controller))?;

        let data = VaultData {
            operator: vault.operator,
            nft_collateral_id: vault.NftCollateralId,
            collateral_amount: U256::from(vault.collateralAmount),
            short_amount: U256::from(vault.shortAmount),
        };

        debug!(
            vault_id = %vault_id,
            collateral = %data.collateral_amount,
            short = %data.short_amount,
            "Vault fetched"
        );

        Ok(data)
    }
}
