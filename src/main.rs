//! Crab Auction Monitor
//!
//! Periodically prices the Crab strategy's hedge auction from on-chain state.
//! Features:
//! - Every read of one evaluation pinned to a single block
//! - Direction flip detection between spot and decayed price
//! - Startup check of auction constants against the strategy contract

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crab_auction_chain::{
    BlockSource, ControllerVaultReader, CrabStrategyReader, ProviderManager, SqueethOracle,
};
use crab_auction_core::{AuctionEvaluator, MonitorConfig, SystemClock};

#[tokio::main]
async fn main() -> Result<()> {
    print_banner();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,crab_auction_core=debug,crab_auction_chain=debug")
            }),
        )
        .init();

    // MONITOR_PROFILE selects a built-in profile; MONITOR_CONFIG points at a TOML file
    let config = MonitorConfig::from_env()?;
    config.log_config();

    let evaluator = initialize_evaluator(&config).await?;

    if config.auction.verify_onchain {
        match evaluator.verify_constants().await {
            Ok(true) => info!("Auction constants match strategy contract"),
            Ok(false) => warn!("Configured auction constants differ from strategy contract"),
            Err(err) => warn!(error = %err, "Could not verify auction constants"),
        }
    }

    info!("Starting evaluation loop...");
    run(&evaluator, &config).await;

    info!("Shutting down");
    Ok(())
}

async fn initialize_evaluator(config: &MonitorConfig) -> Result<AuctionEvaluator> {
    info!("Initializing components...");

    let params = config
        .to_params()
        .context("Invalid auction parameters")?;

    let manager = Arc::new(ProviderManager::new(&config.resolved_rpc_url()?).await?);
    let provider = manager.provider();

    let contracts = &config.contracts;
    let strategy = Arc::new(CrabStrategyReader::new(contracts.crab_strategy, provider.clone()));
    let vaults = Arc::new(ControllerVaultReader::new(contracts.controller, provider.clone()));
    let oracle = Arc::new(SqueethOracle::new(contracts.oracle, provider));

    info!(
        chain_id = manager.chain_id(),
        strategy = %contracts.crab_strategy,
        controller = %contracts.controller,
        oracle = %contracts.oracle,
        "Chain readers initialized"
    );

    let blocks: Arc<dyn BlockSource> = manager;
    Ok(AuctionEvaluator::new(
        blocks,
        strategy,
        vaults,
        oracle,
        Arc::new(SystemClock),
        params,
        config.twap_query(),
    ))
}

async fn run(evaluator: &AuctionEvaluator, config: &MonitorConfig) {
    let mut ticker = interval(config.scanner.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let read_timeout = config.scanner.read_timeout();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match timeout(read_timeout, evaluator.evaluate()).await {
                    Ok(Ok(evaluation)) => match serde_json::to_string(&evaluation) {
                        Ok(payload) => info!(%payload, "Evaluation complete"),
                        Err(err) => error!(error = %err, "Failed to encode evaluation"),
                    },
                    Ok(Err(err)) => warn!(error = %err, "Evaluation failed"),
                    Err(_) => warn!(timeout_secs = read_timeout.as_secs(), "Evaluation timed out"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
        }
    }
}

/// Print startup banner.
fn print_banner() {
    println!(
        r#"
    ╔═╗┬─┐┌─┐┌┐   ╔═╗┬ ┬┌─┐┌┬┐┬┌─┐┌┐┌
    ║  ├┬┘├─┤├┴┐  ╠═╣│ ││   │ ││ ││││
    ╚═╝┴└─┴ ┴└─┘  ╩ ╩└─┘└─┘ ┴ ┴└─┘┘└┘
    Auction Monitor v0.1.0
    "#
    );
}
