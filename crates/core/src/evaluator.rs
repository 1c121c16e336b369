//! On-demand auction evaluation against chain readers.
//!
//! One call reads everything at a single block, applies the gate, and runs
//! the valuation engine. The evaluator holds no state between calls and has
//! no cadence of its own.

use alloy::eips::BlockId;
use crab_auction_chain::{BlockSource, StrategyReader, TwapOracle, TwapQuery, VaultReader};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::clock::Clock;
use crate::details::auction_details;
use crate::error::{AuctionError, EvaluationError};
use crate::gate::{gate, SkipReason};
use crate::params::AuctionParams;
use crate::price::price_bounds;
use crate::types::{AuctionDetails, AuctionInput, PriceBounds, StrategyState, VaultState};
use crate::wad_math::{wad_to_f64, Wad};

/// Result of one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Evaluation {
    /// Auction priced
    Ready {
        block: u64,
        details: AuctionDetails,
        bounds: PriceBounds,
    },
    /// Imbalance too small to hedge
    DeltaNeutral { block: u64, ratio: Wad, threshold: Wad },
    /// Gate closed, nothing read beyond strategy state
    Skipped { block: u64, reason: SkipReason },
}

/// Drives the valuation engine from chain readers.
pub struct AuctionEvaluator {
    blocks: Arc<dyn BlockSource>,
    strategy: Arc<dyn StrategyReader>,
    vaults: Arc<dyn VaultReader>,
    oracle: Arc<dyn TwapOracle>,
    clock: Arc<dyn Clock>,
    params: AuctionParams,
    twap_query: TwapQuery,
}

impl AuctionEvaluator {
    pub fn new(
        blocks: Arc<dyn BlockSource>,
        strategy: Arc<dyn StrategyReader>,
        vaults: Arc<dyn VaultReader>,
        oracle: Arc<dyn TwapOracle>,
        clock: Arc<dyn Clock>,
        params: AuctionParams,
        twap_query: TwapQuery,
    ) -> Self {
        Self {
            blocks,
            strategy,
            vaults,
            oracle,
            clock,
            params,
            twap_query,
        }
    }

    pub fn params(&self) -> &AuctionParams {
        &self.params
    }

    /// Compare the configured parameters with the strategy contract's.
    ///
    /// Returns `false` and logs each differing value on mismatch.
    pub async fn verify_constants(&self) -> Result<bool, EvaluationError> {
        let block = self.blocks.latest_block().await?;
        let onchain = self.strategy.auction_constants(BlockId::number(block)).await?;

        let mut matches = true;
        if onchain.auction_time_secs != self.params.duration_secs {
            warn!(
                configured = self.params.duration_secs,
                onchain = onchain.auction_time_secs,
                "Auction duration differs from strategy"
            );
            matches = false;
        }
        if onchain.min_price_multiplier != self.params.min_multiplier {
            warn!(
                configured = %self.params.min_multiplier,
                onchain = %onchain.min_price_multiplier,
                "Min price multiplier differs from strategy"
            );
            matches = false;
        }
        if onchain.max_price_multiplier != self.params.max_multiplier {
            warn!(
                configured = %self.params.max_multiplier,
                onchain = %onchain.max_price_multiplier,
                "Max price multiplier differs from strategy"
            );
            matches = false;
        }
        Ok(matches)
    }

    /// Run one evaluation at the latest block.
    #[instrument(skip(self), level = "debug")]
    pub async fn evaluate(&self) -> Result<Evaluation, EvaluationError> {
        let block = self.blocks.latest_block().await?;
        self.evaluate_at(block).await
    }

    /// Run one evaluation with every read pinned to `block`.
    ///
    /// Prices with the current clock, so `block` must be the latest block.
    async fn evaluate_at(&self, block: u64) -> Result<Evaluation, EvaluationError> {
        let at = BlockId::number(block);
        let strategy = StrategyState::from(self.strategy.strategy_state(at).await?);
        let now = self.clock.now();

        if let Some(reason) = gate(strategy.trigger, now, strategy.thresholds.delta_hedge_threshold) {
            debug!(block, %reason, "Auction evaluation skipped");
            return Ok(Evaluation::Skipped { block, reason });
        }

        let (vault, oracle_price) = futures::future::try_join(
            self.vaults.vault(strategy.vault_id, at),
            self.oracle.twap(&self.twap_query, at),
        )
        .await?;

        let input = AuctionInput {
            trigger: strategy.trigger,
            now,
            vault: VaultState::from(vault),
            oracle_price,
            delta_hedge_threshold: strategy.thresholds.delta_hedge_threshold,
        };

        match auction_details(&self.params, &input) {
            Ok(details) => {
                let bounds = price_bounds(&self.params, oracle_price, details.direction())?;
                info!(
                    block,
                    direction = %details.direction(),
                    o_sqth_amount = wad_to_f64(details.o_sqth_amount),
                    eth_proceeds = wad_to_f64(details.eth_proceeds),
                    auction_price = wad_to_f64(details.auction_price),
                    direction_changed = details.is_direction_changed,
                    "Auction evaluated"
                );
                Ok(Evaluation::Ready {
                    block,
                    details,
                    bounds,
                })
            }
            Err(AuctionError::DeltaNeutral { ratio, threshold }) => {
                info!(
                    block,
                    ratio = wad_to_f64(ratio),
                    threshold = wad_to_f64(threshold),
                    "Strategy is delta neutral"
                );
                Ok(Evaluation::DeltaNeutral {
                    block,
                    ratio,
                    threshold,
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::wad_math::wad;
    use alloy::primitives::{Address, U256};
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use crab_auction_chain::{AuctionConstants, StrategyData, VaultData};
    use std::sync::Mutex;

    const T0: u64 = 1_700_000_000;
    const BLOCK: u64 = 19_000_000;

    struct FakeBlocks;

    #[async_trait]
    impl BlockSource for FakeBlocks {
        async fn latest_block(&self) -> Result<u64> {
            Ok(BLOCK)
        }
    }

    struct FakeStrategy {
        data: StrategyData,
        seen: Mutex<Vec<BlockId>>,
    }

    #[async_trait]
    impl StrategyReader for FakeStrategy {
        async fn strategy_state(&self, at: BlockId) -> Result<StrategyData> {
            self.seen.lock().unwrap().push(at);
            Ok(self.data)
        }

        async fn auction_constants(&self, _at: BlockId) -> Result<AuctionConstants> {
            Ok(AuctionConstants {
                auction_time_secs: 3600,
                min_price_multiplier: wad(0, 950_000_000_000_000_000),
                max_price_multiplier: wad(1, 50_000_000_000_000_000),
            })
        }
    }

    struct FakeVaults {
        vault: Option<VaultData>,
        seen: Mutex<Vec<(U256, BlockId)>>,
    }

    #[async_trait]
    impl VaultReader for FakeVaults {
        async fn vault(&self, vault_id: U256, at: BlockId) -> Result<VaultData> {
            self.seen.lock().unwrap().push((vault_id, at));
            self.vault.ok_or_else(|| anyhow!("execution reverted"))
        }
    }

    struct FakeOracle {
        price: Wad,
        seen: Mutex<Vec<BlockId>>,
    }

    #[async_trait]
    impl TwapOracle for FakeOracle {
        async fn twap(&self, _query: &TwapQuery, at: BlockId) -> Result<U256> {
            self.seen.lock().unwrap().push(at);
            Ok(self.price)
        }
    }

    fn strategy_data(trigger: u64, threshold: Wad) -> StrategyData {
        StrategyData {
            vault_id: U256::from(70u64),
            time_at_last_hedge: T0 - 86_400,
            price_at_last_hedge: wad(0, 200_000_000_000_000_000),
            hedge_time_threshold: 86_400,
            hedge_price_threshold: wad(0, 200_000_000_000_000_000),
            is_time_hedge_available: true,
            auction_trigger_time: trigger,
            delta_hedge_threshold: threshold,
        }
    }

    fn vault(debt: Wad) -> VaultData {
        VaultData {
            operator: Address::repeat_byte(0xc0),
            nft_collateral_id: 0,
            collateral_amount: wad(10, 0),
            short_amount: debt,
        }
    }

    struct Harness {
        strategy: Arc<FakeStrategy>,
        vaults: Arc<FakeVaults>,
        oracle: Arc<FakeOracle>,
        evaluator: AuctionEvaluator,
    }

    fn harness(data: StrategyData, vault: Option<VaultData>, now: u64) -> Harness {
        let strategy = Arc::new(FakeStrategy {
            data,
            seen: Mutex::new(Vec::new()),
        });
        let vaults = Arc::new(FakeVaults {
            vault,
            seen: Mutex::new(Vec::new()),
        });
        let oracle = Arc::new(FakeOracle {
            price: wad(0, 200_000_000_000_000_000),
            seen: Mutex::new(Vec::new()),
        });
        let query = TwapQuery::new(
            Address::repeat_byte(0x01),
            Address::repeat_byte(0x02),
            Address::repeat_byte(0x03),
        );
        let evaluator = AuctionEvaluator::new(
            Arc::new(FakeBlocks),
            strategy.clone(),
            vaults.clone(),
            oracle.clone(),
            Arc::new(FixedClock(now)),
            AuctionParams::default(),
            query,
        );
        Harness {
            strategy,
            vaults,
            oracle,
            evaluator,
        }
    }

    fn one_percent() -> Wad {
        wad(0, 10_000_000_000_000_000)
    }

    #[tokio::test]
    async fn test_ready_reads_single_block() {
        let h = harness(strategy_data(T0, one_percent()), Some(vault(wad(20, 0))), T0 + 1800);

        let evaluation = h.evaluator.evaluate().await.unwrap();
        let Evaluation::Ready {
            block,
            details,
            bounds,
        } = evaluation
        else {
            panic!("expected a priced auction, got {evaluation:?}");
        };

        assert_eq!(block, BLOCK);
        assert!(details.is_selling);
        assert_eq!(details.o_sqth_amount, wad(10, 0));
        assert_eq!(details.auction_price, wad(0, 200_000_000_000_000_000));
        assert_eq!(bounds.min_price, wad(0, 210_000_000_000_000_000));
        assert_eq!(bounds.max_price, wad(0, 190_000_000_000_000_000));

        let at = BlockId::number(BLOCK);
        assert_eq!(*h.strategy.seen.lock().unwrap(), vec![at]);
        assert_eq!(*h.vaults.seen.lock().unwrap(), vec![(U256::from(70u64), at)]);
        assert_eq!(*h.oracle.seen.lock().unwrap(), vec![at]);
    }

    #[tokio::test]
    async fn test_direction_flip_is_reported() {
        let h = harness(
            strategy_data(T0, one_percent()),
            Some(vault(wad(25, 500_000_000_000_000_000))),
            T0,
        );

        match h.evaluator.evaluate().await.unwrap() {
            Evaluation::Ready { details, bounds, .. } => {
                assert!(!details.is_selling);
                assert!(details.is_direction_changed);
                // bounds follow the reported (spot) direction
                assert_eq!(bounds.min_price, wad(0, 190_000_000_000_000_000));
                assert_eq!(bounds.max_price, wad(0, 210_000_000_000_000_000));
            }
            other => panic!("expected a priced auction, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_gate_skips_without_vault_reads() {
        let h = harness(strategy_data(0, one_percent()), Some(vault(wad(20, 0))), T0);
        assert_eq!(
            h.evaluator.evaluate().await.unwrap(),
            Evaluation::Skipped {
                block: BLOCK,
                reason: SkipReason::NoAuction
            }
        );
        assert!(h.vaults.seen.lock().unwrap().is_empty());
        assert!(h.oracle.seen.lock().unwrap().is_empty());

        let h = harness(strategy_data(T0 + 60, one_percent()), Some(vault(wad(20, 0))), T0);
        assert!(matches!(
            h.evaluator.evaluate_at(BLOCK).await.unwrap(),
            Evaluation::Skipped {
                reason: SkipReason::TriggerInFuture,
                ..
            }
        ));

        let h = harness(strategy_data(T0, U256::ZERO), Some(vault(wad(20, 0))), T0);
        assert!(matches!(
            h.evaluator.evaluate_at(BLOCK).await.unwrap(),
            Evaluation::Skipped {
                reason: SkipReason::ThresholdNotLoaded,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_delta_neutral_is_not_an_error() {
        let h = harness(strategy_data(T0, one_percent()), Some(vault(wad(25, 0))), T0);
        match h.evaluator.evaluate().await.unwrap() {
            Evaluation::DeltaNeutral { ratio, threshold, .. } => {
                assert_eq!(ratio, U256::ZERO);
                assert_eq!(threshold, one_percent());
            }
            other => panic!("expected delta neutral, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_failure_propagates() {
        let h = harness(strategy_data(T0, one_percent()), None, T0);
        let err = h.evaluator.evaluate().await.unwrap_err();
        assert!(matches!(err, EvaluationError::Read(_)));
        assert!(err.to_string().contains("execution reverted"));
    }

    #[tokio::test]
    async fn test_verify_constants() {
        let h = harness(strategy_data(T0, one_percent()), None, T0);
        assert!(h.evaluator.verify_constants().await.unwrap());

        let mut mismatched = harness(strategy_data(T0, one_percent()), None, T0);
        mismatched.evaluator.params = AuctionParams::default().with_duration(1200);
        assert!(!mismatched.evaluator.verify_constants().await.unwrap());
    }

    #[tokio::test]
    async fn test_engine_failure_propagates() {
        let mut empty = vault(wad(20, 0));
        empty.collateral_amount = U256::ZERO;
        let h = harness(strategy_data(T0, one_percent()), Some(empty), T0);
        let err = h.evaluator.evaluate().await.unwrap_err();
        assert!(matches!(err, EvaluationError::Engine(AuctionError::DivisionByZero)));
    }
}
