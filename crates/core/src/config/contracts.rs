//! Contract address configuration.

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Addresses the monitor reads from. Defaults are Ethereum mainnet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractsConfig {
    /// Crab strategy
    #[serde(default = "default_crab_strategy")]
    pub crab_strategy: Address,

    /// Squeeth controller (vault storage)
    #[serde(default = "default_controller")]
    pub controller: Address,

    /// Squeeth TWAP oracle
    #[serde(default = "default_oracle")]
    pub oracle: Address,

    /// oSQTH/WETH Uniswap v3 pool
    #[serde(default = "default_squeeth_pool")]
    pub squeeth_pool: Address,

    /// oSQTH token
    #[serde(default = "default_osqth")]
    pub osqth: Address,

    /// WETH token
    #[serde(default = "default_weth")]
    pub weth: Address,
}

fn default_crab_strategy() -> Address {
    address!("f205ad80bb86ac92247638914265887a8baa437d")
}
fn default_controller() -> Address {
    address!("64187ae08781b09368e6253f9e94951243a493d5")
}
fn default_oracle() -> Address {
    address!("65d66c76447ccb45daf1e8044e918fa786a483a1")
}
fn default_squeeth_pool() -> Address {
    address!("82c427adfdf2d245ec51d8046b41c4ee87f0d29c")
}
fn default_osqth() -> Address {
    address!("f1b99e3e573a1a9c5e6b2ce818b617f0e664e86b")
}
fn default_weth() -> Address {
    address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            crab_strategy: default_crab_strategy(),
            controller: default_controller(),
            oracle: default_oracle(),
            squeeth_pool: default_squeeth_pool(),
            osqth: default_osqth(),
            weth: default_weth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_distinct() {
        let c = ContractsConfig::default();
        let all = [c.crab_strategy, c.controller, c.oracle, c.squeeth_pool, c.osqth, c.weth];
        for (i, a) in all.iter().enumerate() {
            assert_ne!(*a, Address::ZERO);
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_override_single_address() {
        let parsed: ContractsConfig =
            toml::from_str("controller = \"0x0000000000000000000000000000000000000001\"").unwrap();
        assert_eq!(parsed.controller, Address::with_last_byte(1));
        assert_eq!(parsed.weth, default_weth());
    }
}
