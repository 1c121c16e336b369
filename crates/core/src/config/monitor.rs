//! Monitor configuration with profile support.
//!
//! Provides the runtime configuration of the auction monitor with support
//! for named profiles (mainnet, testing) and TOML files.

use anyhow::{Context, Result};
use crab_auction_chain::TwapQuery;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ContractsConfig;
use crate::error::AuctionResult;
use crate::params::{
    AuctionParams, TimeRangePolicy, AUCTION_DURATION_SECS, MAX_PRICE_MULTIPLIER_BPS,
    MIN_PRICE_MULTIPLIER_BPS,
};

/// Environment variable naming a TOML config file.
pub const CONFIG_PATH_ENV: &str = "MONITOR_CONFIG";

/// Environment variable selecting a built-in profile.
pub const PROFILE_ENV: &str = "MONITOR_PROFILE";

/// Main configuration structure containing all monitor parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Profile name (for logging/identification)
    #[serde(default = "default_profile_name")]
    pub profile: String,

    /// RPC endpoint; `${VAR}` is read from the environment
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Auction pricing parameters
    #[serde(default)]
    pub auction: AuctionConfig,

    /// TWAP read parameters
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Evaluation cadence
    #[serde(default)]
    pub scanner: ScannerTimingConfig,

    /// Contract addresses
    #[serde(default)]
    pub contracts: ContractsConfig,
}

fn default_profile_name() -> String {
    "default".to_string()
}
fn default_rpc_url() -> String {
    "${RPC_URL}".to_string()
}

/// Auction pricing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionConfig {
    /// Seconds for the multiplier to travel from one bound to the other
    #[serde(default = "default_duration")]
    pub duration_secs: u64,

    /// Richest multiplier in basis points (10500 = 1.05)
    #[serde(default = "default_max_bps")]
    pub max_multiplier_bps: u16,

    /// Cheapest multiplier in basis points (9500 = 0.95)
    #[serde(default = "default_min_bps")]
    pub min_multiplier_bps: u16,

    /// Behaviour when the clock reads earlier than the trigger
    #[serde(default)]
    pub time_range_policy: TimeRangePolicy,

    /// Compare these values with the strategy contract at startup
    #[serde(default = "default_verify_onchain")]
    pub verify_onchain: bool,
}

fn default_duration() -> u64 {
    AUCTION_DURATION_SECS
}
fn default_max_bps() -> u16 {
    MAX_PRICE_MULTIPLIER_BPS
}
fn default_min_bps() -> u16 {
    MIN_PRICE_MULTIPLIER_BPS
}
fn default_verify_onchain() -> bool {
    true
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration(),
            max_multiplier_bps: default_max_bps(),
            min_multiplier_bps: default_min_bps(),
            time_range_policy: TimeRangePolicy::default(),
            verify_onchain: default_verify_onchain(),
        }
    }
}

/// TWAP read parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Averaging window in seconds
    #[serde(default = "default_twap_period")]
    pub twap_period_secs: u32,

    /// Fail instead of shortening the window on thin pool history
    #[serde(default = "default_check_period")]
    pub check_period: bool,
}

fn default_twap_period() -> u32 {
    1
}
fn default_check_period() -> bool {
    true
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            twap_period_secs: default_twap_period(),
            check_period: default_check_period(),
        }
    }
}

/// Scanner timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerTimingConfig {
    /// Seconds between evaluations
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Seconds before an in-flight evaluation is dropped
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

fn default_poll_interval() -> u64 {
    12
}
fn default_read_timeout() -> u64 {
    10
}

impl Default for ScannerTimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            read_timeout_secs: default_read_timeout(),
        }
    }
}

impl ScannerTimingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs.max(1))
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            profile: default_profile_name(),
            rpc_url: default_rpc_url(),
            auction: AuctionConfig::default(),
            oracle: OracleConfig::default(),
            scanner: ScannerTimingConfig::default(),
            contracts: ContractsConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("Failed to parse config file {path}"))?;
        Ok(config)
    }

    /// Mainnet profile: strategy defaults, 12s cadence.
    pub fn mainnet() -> Self {
        Self {
            profile: "mainnet".to_string(),
            ..Self::default()
        }
    }

    /// Testing profile for forks with warped clocks.
    pub fn testing() -> Self {
        Self {
            profile: "testing".to_string(),
            auction: AuctionConfig {
                time_range_policy: TimeRangePolicy::Clamp,
                verify_onchain: false,
                ..AuctionConfig::default()
            },
            scanner: ScannerTimingConfig {
                poll_interval_secs: 2,
                read_timeout_secs: 5,
            },
            ..Self::default()
        }
    }

    /// Load from `MONITOR_CONFIG` if set, else the `MONITOR_PROFILE` profile.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::from_file(&path);
        }
        Ok(Self::from_profile(
            &std::env::var(PROFILE_ENV).unwrap_or_else(|_| "default".to_string()),
        ))
    }

    /// Supported values: mainnet, testing; anything else is the default.
    pub fn from_profile(profile: &str) -> Self {
        match profile.to_lowercase().as_str() {
            "mainnet" | "prod" | "production" => Self::mainnet(),
            "testing" | "test" | "fork" => Self::testing(),
            _ => Self::default(),
        }
    }

    /// RPC URL with `${VAR}` expanded from the environment.
    pub fn resolved_rpc_url(&self) -> Result<String> {
        expand_env(&self.rpc_url)
    }

    /// Validated pricing parameters.
    pub fn to_params(&self) -> AuctionResult<AuctionParams> {
        Ok(AuctionParams::from_bps(
            self.auction.duration_secs,
            self.auction.max_multiplier_bps,
            self.auction.min_multiplier_bps,
        )?
        .with_time_range_policy(self.auction.time_range_policy))
    }

    /// TWAP query over the configured pool.
    pub fn twap_query(&self) -> TwapQuery {
        TwapQuery::new(
            self.contracts.squeeth_pool,
            self.contracts.osqth,
            self.contracts.weth,
        )
        .with_period(self.oracle.twap_period_secs)
        .with_check_period(self.oracle.check_period)
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        tracing::info!(profile = %self.profile, "Monitor configuration loaded");
        tracing::info!(
            duration_secs = self.auction.duration_secs,
            max_multiplier_bps = self.auction.max_multiplier_bps,
            min_multiplier_bps = self.auction.min_multiplier_bps,
            time_range_policy = ?self.auction.time_range_policy,
            "Auction parameters"
        );
        tracing::info!(
            twap_period_secs = self.oracle.twap_period_secs,
            check_period = self.oracle.check_period,
            "Oracle parameters"
        );
        tracing::info!(
            poll_interval_secs = self.scanner.poll_interval_secs,
            read_timeout_secs = self.scanner.read_timeout_secs,
            "Scanner timing"
        );
        tracing::info!(
            crab_strategy = %self.contracts.crab_strategy,
            controller = %self.contracts.controller,
            oracle = %self.contracts.oracle,
            "Contracts"
        );
    }
}

/// Expand a whole-string `${VAR}` reference; other strings pass through.
fn expand_env(value: &str) -> Result<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).with_context(|| format!("Missing env var: {var_name}"))
    } else {
        Ok(value.to_string())
    }
}
