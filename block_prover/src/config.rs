use alloy::primitives::Address;
use anyhow::Error;
use common::{
    fork_info::{Fork, ForkInfoConfig},
    l2::config::L2Config,
    utils::config_trait::{ConfigTrait, read_env, read_optional_env},
};
use std::fmt;

#[derive(Clone, Debug)]
pub struct ProtocolConfig {
    pub l2: L2Config,
    pub fork_info: ForkInfoConfig,
    /// Number of zk proofs each block is proven with before the TxListProof fork.
    pub zk_proofs_per_block: usize,
    pub skip_metadata_check: bool,
    pub skip_evidence_validation: bool,
    /// The oracle prover must be registered and makes every first claim. After the
    /// TxListProof fork a registered oracle makes every first claim regardless.
    pub oracle_prover_required: bool,
    /// Circuit of the transaction list proofs checked by invalidity claims.
    pub tx_list_circuit_id: u16,
    /// Selects `plonk_verifier_<circuit>_v<version>` instead of `plonk_verifier_<circuit>`.
    pub verifier_version: Option<u16>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            l2: L2Config {
                chain_id: 167,
                anchor_tx_gas_limit: 250_000,
            },
            fork_info: ForkInfoConfig {
                initial_fork: Fork::Anchored,
                fork_switch_block_id: None,
            },
            zk_proofs_per_block: 1,
            skip_metadata_check: false,
            skip_evidence_validation: false,
            oracle_prover_required: false,
            tx_list_circuit_id: 0,
            verifier_version: None,
        }
    }
}

impl ConfigTrait for ProtocolConfig {
    fn read_env_variables() -> Result<Self, Error> {
        let zk_proofs_per_block: usize = read_env("ZK_PROOFS_PER_BLOCK", "1")?;
        if zk_proofs_per_block == 0 {
            return Err(anyhow::anyhow!("ZK_PROOFS_PER_BLOCK must be at least 1"));
        }

        Ok(Self {
            l2: L2Config::read_env_variables()?,
            fork_info: ForkInfoConfig::read_env_variables()?,
            zk_proofs_per_block,
            skip_metadata_check: read_env("SKIP_METADATA_CHECK", "false")?,
            skip_evidence_validation: read_env("SKIP_EVIDENCE_VALIDATION", "false")?,
            oracle_prover_required: read_env("ORACLE_PROVER_REQUIRED", "false")?,
            tx_list_circuit_id: read_env("TX_LIST_CIRCUIT_ID", "0")?,
            verifier_version: read_optional_env("VERIFIER_VERSION")?,
        })
    }
}

impl fmt::Display for ProtocolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.l2)?;
        writeln!(f, "initial fork: {}", self.fork_info.initial_fork)?;
        match self.fork_info.fork_switch_block_id {
            Some(id) => writeln!(f, "fork switch block id: {id}")?,
            None => writeln!(f, "fork switch block id: none")?,
        }
        writeln!(f, "zk proofs per block: {}", self.zk_proofs_per_block)?;
        writeln!(f, "skip metadata check: {}", self.skip_metadata_check)?;
        writeln!(
            f,
            "skip evidence validation: {}",
            self.skip_evidence_validation
        )?;
        writeln!(f, "oracle prover required: {}", self.oracle_prover_required)?;
        writeln!(f, "tx list circuit id: {}", self.tx_list_circuit_id)?;
        match self.verifier_version {
            Some(version) => writeln!(f, "verifier version: {version}")?,
            None => writeln!(f, "verifier version: none")?,
        }
        Ok(())
    }
}

/// Addresses seeding a [`crate::resolver::StaticResolver`].
#[derive(Clone, Debug)]
pub struct ContractAddresses {
    pub protocol: Address,
    pub oracle_prover: Option<Address>,
}

impl ConfigTrait for ContractAddresses {
    fn read_env_variables() -> Result<Self, Error> {
        let protocol: Address = read_env("PROTOCOL_ADDRESS", &Address::ZERO.to_string())?;
        if protocol.is_zero() {
            return Err(anyhow::anyhow!("PROTOCOL_ADDRESS must be set"));
        }
        Ok(Self {
            protocol,
            oracle_prover: read_optional_env("ORACLE_PROVER_ADDRESS")?,
        })
    }
}

impl fmt::Display for ContractAddresses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "protocol: {}", self.protocol)?;
        match self.oracle_prover {
            Some(address) => writeln!(f, "oracle prover: {address}")?,
            None => writeln!(f, "oracle prover: none")?,
        }
        Ok(())
    }
}
