use super::Fork;
use crate::utils::config_trait::{ConfigTrait, read_env, read_optional_env};
use anyhow::Error;

#[derive(Clone, Debug)]
pub struct ForkInfoConfig {
    pub initial_fork: Fork,
    /// First block id proven under the fork following `initial_fork`.
    pub fork_switch_block_id: Option<u64>,
}

impl ConfigTrait for ForkInfoConfig {
    fn read_env_variables() -> Result<Self, Error> {
        Ok(Self {
            initial_fork: read_env("FORK", "anchored")?,
            fork_switch_block_id: read_optional_env("FORK_SWITCH_BLOCK_ID")?,
        })
    }
}
