//! Delta classifier: which side the auction is on and how much it trades.
//!
//! The vault's short exposure is `2 * debt * price` (the payoff is quadratic
//! in price, so its first-order delta doubles). Whichever of that exposure and
//! the collateral is larger decides the direction, and the gap converted back
//! into tracked-token units is the hedge target.

use alloy::primitives::U256;
use tracing::trace;

use crate::error::{AuctionError, AuctionResult};
use crate::types::{AuctionDirection, HedgeTarget};
use crate::wad_math::{wdiv, wmul, Wad, WAD};

/// Short exposure of the vault in base-asset terms: `wmul(wmul(debt, 2), price)`.
#[inline]
pub fn token_delta(debt: Wad, price: Wad) -> AuctionResult<Wad> {
    wmul(wmul(debt, WAD * U256::from(2u64))?, price)
}

/// Classify the auction direction at `price`.
///
/// Fails with `DeltaNeutral` when `target * price / eth_delta` is at or
/// below `delta_hedge_threshold`; callers must not price an auction then.
pub fn classify(
    debt: Wad,
    eth_delta: Wad,
    price: Wad,
    delta_hedge_threshold: Wad,
) -> AuctionResult<HedgeTarget> {
    let o_sqth_delta = token_delta(debt, price)?;

    let (direction, target) = if o_sqth_delta > eth_delta {
        (AuctionDirection::Buying, wdiv(o_sqth_delta - eth_delta, price)?)
    } else {
        (AuctionDirection::Selling, wdiv(eth_delta - o_sqth_delta, price)?)
    };

    let ratio = wdiv(wmul(target, price)?, eth_delta)?;
    trace!(
        %direction,
        %target,
        %ratio,
        threshold = %delta_hedge_threshold,
        "Classified hedge direction"
    );

    if ratio <= delta_hedge_threshold {
        return Err(AuctionError::DeltaNeutral {
            ratio,
            threshold: delta_hedge_threshold,
        });
    }

    Ok(HedgeTarget { direction, target })
}
