use crate::utils::config_trait::{ConfigTrait, read_env};
use alloy::primitives::{Address, B256};
use anyhow::Error;
use std::fmt;

pub const GOLDEN_TOUCH_PRIVATE_KEY: B256 = B256::new([
    0x92, 0x95, 0x43, 0x68, 0xaf, 0xd3, 0xca, 0xa1, 0xf3, 0xce, 0x3e, 0xad, 0x00, 0x69, 0xc1, 0xaf,
    0x41, 0x40, 0x54, 0xae, 0xfe, 0x1e, 0xf9, 0xae, 0xac, 0xc1, 0xbf, 0x42, 0x62, 0x22, 0xce, 0x38,
]);

pub const GOLDEN_TOUCH_ADDRESS: Address = Address::new([
    0x00, 0x00, 0x77, 0x77, 0x35, 0x36, 0x7b, 0x36, 0xbc, 0x9b, 0x61, 0xc5, 0x00, 0x22, 0xd9, 0xd0,
    0x70, 0x0d, 0xb4, 0xec,
]);

/// L2 chain parameters the anchor transaction is checked against.
#[derive(Clone, Debug)]
pub struct L2Config {
    pub chain_id: u64,
    pub anchor_tx_gas_limit: u64,
}

impl ConfigTrait for L2Config {
    fn read_env_variables() -> Result<Self, Error> {
        Ok(Self {
            chain_id: read_env("L2_CHAIN_ID", "167")?,
            anchor_tx_gas_limit: read_env("ANCHOR_TX_GAS_LIMIT", "250000")?,
        })
    }
}

impl fmt::Display for L2Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "L2 chain id: {}", self.chain_id)?;
        writeln!(f, "anchor tx gas limit: {}", self.anchor_tx_gas_limit)?;
        Ok(())
    }
}
