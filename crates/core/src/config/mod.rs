//! Configuration for the auction monitor.
//!
//! This module provides:
//! - Monitor runtime configuration (profiles, auction parameters, timing)
//! - Contract address configuration

mod contracts;
mod monitor;

pub use contracts::ContractsConfig;
pub use monitor::{
    AuctionConfig, MonitorConfig, OracleConfig, ScannerTimingConfig, CONFIG_PATH_ENV, PROFILE_ENV,
};
