mod config;
mod fork;
use anyhow::Error;
pub use config::ForkInfoConfig;
pub use fork::Fork;

#[derive(Clone, Debug)]
pub struct ForkInfo {
    pub config: ForkInfoConfig,
}

impl ForkInfo {
    pub fn from_config(config: ForkInfoConfig) -> Result<Self, Error> {
        if config.fork_switch_block_id.is_some() && config.initial_fork.next().is_none() {
            return Err(anyhow::anyhow!(
                "Fork switch block id is set but {} has no next fork",
                config.initial_fork
            ));
        }
        Ok(Self { config })
    }

    /// Single-fork setup, no switch.
    pub fn fixed(fork: Fork) -> Self {
        Self {
            config: ForkInfoConfig {
                initial_fork: fork,
                fork_switch_block_id: None,
            },
        }
    }

    pub fn fork_for_block(&self, block_id: u64) -> Fork {
        match (
            self.config.fork_switch_block_id,
            self.config.initial_fork.next(),
        ) {
            (Some(switch_id), Some(next)) if block_id >= switch_id => next,
            _ => self.config.initial_fork,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fork_for_block_switches_at_block_id() {
        let fork_info = ForkInfo::from_config(ForkInfoConfig {
            initial_fork: Fork::Anchored,
            fork_switch_block_id: Some(100),
        })
        .unwrap();

        assert_eq!(fork_info.fork_for_block(1), Fork::Anchored);
        assert_eq!(fork_info.fork_for_block(99), Fork::Anchored);
        assert_eq!(fork_info.fork_for_block(100), Fork::TxListProof);
        assert_eq!(fork_info.fork_for_block(u64::MAX), Fork::TxListProof);
    }

    #[test]
    fn test_fixed_fork_never_switches() {
        let fork_info = ForkInfo::fixed(Fork::TxListProof);
        assert_eq!(fork_info.fork_for_block(0), Fork::TxListProof);
        assert_eq!(fork_info.fork_for_block(1_000_000), Fork::TxListProof);
    }

    #[test]
    fn test_switch_without_next_fork_is_rejected() {
        let result = ForkInfo::from_config(ForkInfoConfig {
            initial_fork: Fork::TxListProof,
            fork_switch_block_id: Some(10),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_fork_from_str() {
        assert_eq!("Anchored".parse::<Fork>().unwrap(), Fork::Anchored);
        assert_eq!("tx_list_proof".parse::<Fork>().unwrap(), Fork::TxListProof);
        assert!("pacaya".parse::<Fork>().is_err());
    }
}
