//! Auction detail aggregator.
//!
//! Direction and clearing price depend on each other: the direction picks
//! which way the price decays, and the decayed price can move the vault's
//! exposure across the collateral line. The contract resolves this with
//! exactly two classifier passes, and so does this module.

use tracing::{debug, warn};

use crate::direction::classify;
use crate::error::AuctionResult;
use crate::params::AuctionParams;
use crate::price::auction_price;
use crate::types::{AuctionDetails, AuctionInput, HedgeTarget};
use crate::wad_math::{wad_to_f64, wmul, Wad};

/// First pass: classify at the oracle price.
pub fn spot_pass(input: &AuctionInput) -> AuctionResult<HedgeTarget> {
    classify(
        input.vault.short_amount,
        input.vault.collateral_amount,
        input.oracle_price,
        input.delta_hedge_threshold,
    )
}

/// Second pass: classify again at the decayed clearing price.
pub fn decayed_pass(input: &AuctionInput, auction_price: Wad) -> AuctionResult<HedgeTarget> {
    classify(
        input.vault.short_amount,
        input.vault.collateral_amount,
        auction_price,
        input.delta_hedge_threshold,
    )
}

/// Full decision payload for one evaluation.
///
/// Either pass failing with `DeltaNeutral` fails the whole evaluation.
pub fn auction_details(params: &AuctionParams, input: &AuctionInput) -> AuctionResult<AuctionDetails> {
    let spot = spot_pass(input)?;

    let price = auction_price(
        params,
        input.trigger.auction_trigger_time,
        input.now,
        input.oracle_price,
        spot.direction,
    )?;

    let decayed = decayed_pass(input, price)?;

    let is_direction_changed = spot.direction != decayed.direction;
    let eth_proceeds = wmul(decayed.target, price)?;

    debug!(
        spot_direction = %spot.direction,
        decayed_direction = %decayed.direction,
        oracle_price = wad_to_f64(input.oracle_price),
        auction_price = wad_to_f64(price),
        o_sqth_amount = wad_to_f64(decayed.target),
        eth_proceeds = wad_to_f64(eth_proceeds),
        "Auction details computed"
    );

    if is_direction_changed {
        warn!(
            from = %spot.direction,
            to = %decayed.direction,
            "Auction direction changed at decayed price"
        );
    }

    Ok(AuctionDetails {
        is_selling: spot.direction.is_selling(),
        o_sqth_amount: decayed.target,
        eth_proceeds,
        auction_price: price,
        is_direction_changed,
    })
}
