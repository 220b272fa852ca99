use crate::{
    config::{ContractAddresses, ProtocolConfig},
    prover::BlockProver,
    resolver::StaticResolver,
    trie::MerkleTrie,
    verifier::{PlonkVerifier, VerifierId},
};
use anyhow::Error;
use common::utils::{
    clock::SystemClock,
    config_trait::{ConfigTrait, load_dotenv},
    logging::init_logging,
};
use std::sync::Arc;
use tracing::info;

pub mod anchor;
pub mod bindings;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod fork_choice;
pub mod metadata;
pub mod prover;
pub mod resolver;
pub mod state;
#[cfg(test)]
mod test_utils;
pub mod trie;
pub mod verifier;

/// Builds a prover from the environment, registering `verifiers` with the resolver.
/// Installs the global log subscriber unless the host already did.
pub fn create_block_prover(
    verifiers: impl IntoIterator<Item = (VerifierId, Arc<dyn PlonkVerifier>)>,
) -> Result<BlockProver<StaticResolver, MerkleTrie, SystemClock>, Error> {
    init_logging();
    load_dotenv();
    let config = ProtocolConfig::read_env_variables()?;
    let addresses = ContractAddresses::read_env_variables()?;
    info!("Protocol config:\n{config}Contract addresses:\n{addresses}");

    let resolver = verifiers
        .into_iter()
        .fold(StaticResolver::from_config(&addresses), |resolver, (id, verifier)| {
            info!("Registering verifier {id}");
            resolver.with_verifier(id, verifier)
        });

    BlockProver::new(config, Arc::new(resolver), MerkleTrie, Arc::new(SystemClock))
}
