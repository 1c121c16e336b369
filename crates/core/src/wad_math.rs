//! WAD fixed-point arithmetic over U256.
//!
//! Mirrors the on-chain helpers the strategy contract prices with: every
//! operation truncates toward zero and results must match the contract
//! bit-for-bit.

use alloy::primitives::{U256, U512};

use crate::error::{AuctionError, AuctionResult};

/// 18-decimal fixed-point value.
pub type Wad = U256;

/// WAD constant: 1e18 for 18-decimal fixed-point arithmetic
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000u64, 0, 0, 0]);

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: U256 = U256::from_limbs([10000u64, 0, 0, 0]);

/// Multiply two WAD values: (a * b) / WAD
///
/// The product is taken at 512 bits; only a quotient wider than 256 bits
/// fails with `Overflow`.
#[inline(always)]
pub fn wmul(a: Wad, b: Wad) -> AuctionResult<Wad> {
    narrow(U512::from(a) * U512::from(b) / U512::from(WAD))
}

/// Divide two WAD values: (a * WAD) / b
///
/// Also used to turn a plain integer ratio (seconds over seconds) into a WAD.
#[inline(always)]
pub fn wdiv(a: Wad, b: Wad) -> AuctionResult<Wad> {
    if b.is_zero() {
        return Err(AuctionError::DivisionByZero);
    }
    narrow(U512::from(a) * U512::from(WAD) / U512::from(b))
}

#[inline(always)]
fn narrow(wide: U512) -> AuctionResult<Wad> {
    U256::checked_from_uint(wide).ok_or(AuctionError::Overflow)
}

/// Convert basis points to a WAD ratio: 10_500 bps = 1.05 WAD.
#[inline(always)]
pub fn wad_from_bps(bps: u16) -> Wad {
    (WAD * U256::from(bps)) / BPS_DENOMINATOR
}

/// Convert WAD (18 decimals) to f64.
/// Use only for display/logging, not for computation.
#[inline(always)]
pub fn wad_to_f64(wad: U256) -> f64 {
    if wad <= U256::from(u128::MAX) {
        let value: u128 = wad.to();
        value as f64 / 1e18
    } else {
        let limbs = wad.as_limbs();
        let high = limbs[1] as f64 * (u64::MAX as f64 + 1.0);
        let low = limbs[0] as f64;
        (high + low) / 1e18
    }
}

/// Build a WAD from a whole number and a fraction expressed in 1e-18 units.
///
/// `wad(2, 500_000_000_000_000_000)` is 2.5.
#[inline(always)]
pub fn wad(units: u64, fraction: u64) -> Wad {
    U256::from(units) * WAD + U256::from(fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wmul_truncates() {
        // 0.000000000000000003 * 0.5 = 1.5e-18 -> 1
        let a = U256::from(3u64);
        let half = WAD / U256::from(2u64);
        assert_eq!(wmul(a, half).unwrap(), U256::from(1u64));

        assert_eq!(wmul(wad(2, 0), wad(3, 0)).unwrap(), wad(6, 0));
    }

    #[test]
    fn test_wmul_overflow() {
        assert!(matches!(wmul(U256::MAX, wad(2, 0)), Err(AuctionError::Overflow)));
        assert!(matches!(wdiv(U256::MAX, wad(0, 500_000_000_000_000_000)), Err(AuctionError::Overflow)));
    }

    #[test]
    fn test_wide_intermediate_products() {
        // a * b and a * WAD exceed 2^256, the quotients do not
        let big = U256::from(1u64) << 200usize;
        assert_eq!(wmul(big, wad(2, 0)).unwrap(), U256::from(1u64) << 201usize);
        assert_eq!(wdiv(big, wad(2, 0)).unwrap(), U256::from(1u64) << 199usize);
        assert_eq!(wmul(U256::MAX, WAD).unwrap(), U256::MAX);
    }

    #[test]
    fn test_wdiv() {
        assert_eq!(wdiv(wad(1, 0), wad(4, 0)).unwrap(), wad(0, 250_000_000_000_000_000));
        // 1 / 3 truncates
        assert_eq!(
            wdiv(wad(1, 0), wad(3, 0)).unwrap(),
            U256::from(333_333_333_333_333_333u64)
        );
        // plain integers become a WAD ratio
        assert_eq!(
            wdiv(U256::from(1800u64), U256::from(3600u64)).unwrap(),
            WAD / U256::from(2u64)
        );
    }

    #[test]
    fn test_wdiv_by_zero() {
        assert!(matches!(wdiv(wad(1, 0), U256::ZERO), Err(AuctionError::DivisionByZero)));
    }

    #[test]
    fn test_wad_from_bps() {
        assert_eq!(wad_from_bps(10_500), U256::from(1_050_000_000_000_000_000u64));
        assert_eq!(wad_from_bps(9_500), U256::from(950_000_000_000_000_000u64));
        assert_eq!(wad_from_bps(10_000), WAD);
    }

    #[test]
    fn test_wad_to_f64() {
        let value = U256::from(1000u64) * WAD;
        assert!((wad_to_f64(value) - 1000.0).abs() < 0.001);
    }
}
