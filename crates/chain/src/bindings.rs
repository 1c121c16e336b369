//! Contract interfaces for the Crab strategy, the Squeeth controller and the
//! Squeeth TWAP oracle (read-only subsets).

use alloy::sol;

sol! {
    /// Crab strategy: hedge bookkeeping and auction trigger
    #[sol(rpc)]
    interface ICrabStrategy {
        function vaultId() external view returns (uint256);
        function timeAtLastHedge() external view returns (uint256);
        function priceAtLastHedge() external view returns (uint256);
        function hedgeTimeThreshold() external view returns (uint256);
        function hedgePriceThreshold() external view returns (uint256);
        function deltaHedgeThreshold() external view returns (uint256);
        function auctionTime() external view returns (uint256);
        function minPriceMultiplier() external view returns (uint256);
        function maxPriceMultiplier() external view returns (uint256);
        function checkTimeHedge() external view returns (bool isTimeHedgeAllowed, uint256 auctionTriggerTime);
    }

    /// Squeeth controller: vault storage getter
    #[sol(rpc)]
    interface IController {
        function vaults(uint256 vaultId) external view returns (
            address operator,
            uint32 NftCollateralId,
            uint96 collateralAmount,
            uint128 shortAmount
        );
    }

    /// Squeeth oracle: Uniswap v3 TWAP reader
    #[sol(rpc)]
    interface ISqueethOracle {
        function getTwap(
            address pool,
            address base,
            address quote,
            uint32 period,
            bool checkPeriod
        ) external view returns (uint256);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use alloy::sol_types::SolCall;

    #[test]
    fn test_selectors_are_distinct() {
        let selectors = [
            ICrabStrategy::vaultIdCall::SELECTOR,
            ICrabStrategy::checkTimeHedgeCall::SELECTOR,
            ICrabStrategy::deltaHedgeThresholdCall::SELECTOR,
            IController::vaultsCall::SELECTOR,
            ISqueethOracle::getTwapCall::SELECTOR,
        ];
        for (i, a) in selectors.iter().enumerate() {
            for b in &selectors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_get_twap_encoding() {
        let call = ISqueethOracle::getTwapCall {
            pool: Address::ZERO,
            base: Address::ZERO,
            quote: Address::ZERO,
            period: 420,
            checkPeriod: true,
        };
        let encoded = call.abi_encode();
        // selector + five static words
        assert_eq!(encoded.len(), 4 + 5 * 32);

        let vaults = IController::vaultsCall {
            vaultId: U256::from(70u64),
        };
        assert_eq!(vaults.abi_encode().len(), 4 + 32);
    }
}
