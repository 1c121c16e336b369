//! Crab auction chain interaction layer.
//!
//! This crate provides:
//! - Provider management for the HTTP RPC connection
//! - Contract bindings for the Crab strategy, Squeeth controller and oracle
//! - Readers for strategy state, vault state and TWAP prices, each pinned
//!   to an explicit block so one evaluation sees a single snapshot

mod bindings;
mod provider;
mod strategy;
mod twap;
mod vault;

pub use bindings::{IController, ICrabStrategy, ISqueethOracle};
pub use provider::{BlockSource, ProviderManager};
pub use strategy::{AuctionConstants, CrabStrategyReader, StrategyData, StrategyReader};
pub use twap::{SqueethOracle, TwapOracle, TwapQuery};
pub use vault::{ControllerVaultReader, VaultData, VaultReader};
