//! Time-decayed auction price and its bounds.
//!
//! A selling auction opens rich (`max_multiplier`) and decays toward cheap
//! (`min_multiplier`); a buying auction does the opposite. The multiplier
//! moves linearly over `duration_secs` and holds once the duration elapses.

use alloy::primitives::U256;

use crate::error::{AuctionError, AuctionResult};
use crate::params::{AuctionParams, TimeRangePolicy};
use crate::types::{AuctionDirection, PriceBounds};
use crate::wad_math::{wdiv, wmul, Wad, WAD};

/// Fraction of the auction that has elapsed, as a WAD in `[0, 1]`.
pub fn completion_ratio(params: &AuctionParams, trigger_time: u64, now: u64) -> AuctionResult<Wad> {
    let elapsed = match now.checked_sub(trigger_time) {
        Some(elapsed) => elapsed,
        None => match params.time_range_policy {
            TimeRangePolicy::Reject => {
                return Err(AuctionError::InvalidTimeRange {
                    trigger: trigger_time,
                    now,
                })
            }
            TimeRangePolicy::Clamp => 0,
        },
    };

    if elapsed >= params.duration_secs {
        return Ok(WAD);
    }
    wdiv(U256::from(elapsed), U256::from(params.duration_secs))
}

/// Price multiplier after `completion_ratio` of the auction.
///
/// Fails with `InvalidParams` unless `params` validates.
pub fn price_multiplier(
    params: &AuctionParams,
    direction: AuctionDirection,
    completion_ratio: Wad,
) -> AuctionResult<Wad> {
    params.validate()?;
    let travelled = wmul(completion_ratio, params.multiplier_span())?;
    match direction {
        AuctionDirection::Selling => Ok(params.max_multiplier - travelled),
        AuctionDirection::Buying => Ok(params.min_multiplier + travelled),
    }
}

/// Clearing price of the auction at `now`.
pub fn auction_price(
    params: &AuctionParams,
    trigger_time: u64,
    now: u64,
    reference_price: Wad,
    direction: AuctionDirection,
) -> AuctionResult<Wad> {
    let ratio = completion_ratio(params, trigger_time, now)?;
    let multiplier = price_multiplier(params, direction, ratio)?;
    wmul(reference_price, multiplier)
}

/// Opening and saturation prices of an auction in `direction`.
///
/// Independent of elapsed time; used for range display only.
pub fn price_bounds(
    params: &AuctionParams,
    reference_price: Wad,
    direction: AuctionDirection,
) -> AuctionResult<PriceBounds> {
    let opening = price_multiplier(params, direction, U256::ZERO)?;
    let saturated = price_multiplier(params, direction, WAD)?;
    Ok(PriceBounds {
        min_price: wmul(opening, reference_price)?,
        max_price: wmul(saturated, reference_price)?,
    })
}
