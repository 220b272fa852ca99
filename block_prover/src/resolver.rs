use crate::{
    config::ContractAddresses,
    error::ProveBlockError,
    verifier::{PlonkVerifier, VerifierId},
};
use alloy::primitives::Address;
use std::{collections::HashMap, fmt, sync::Arc};

/// Contracts the prover needs to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractName {
    /// L2 protocol contract: anchor transaction target and `BlockInvalidated` emitter.
    Protocol,
    OracleProver,
}

impl ContractName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractName::Protocol => "taiko",
            ContractName::OracleProver => "oracle_prover",
        }
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Resolver {
    /// Best-effort lookup, `None` when the name is not registered.
    fn resolve_address(&self, name: ContractName) -> Option<Address>;
    fn resolve_verifier(&self, id: &VerifierId) -> Option<Arc<dyn PlonkVerifier>>;

    /// Lookup of a name the call cannot proceed without.
    fn require_address(&self, name: ContractName) -> Result<Address, ProveBlockError> {
        self.resolve_address(name)
            .filter(|address| !address.is_zero())
            .ok_or(ProveBlockError::NameNotResolved(name.as_str()))
    }
}

/// Fixed name table.
#[derive(Default, Clone)]
pub struct StaticResolver {
    addresses: HashMap<ContractName, Address>,
    verifiers: HashMap<VerifierId, Arc<dyn PlonkVerifier>>,
}

impl StaticResolver {
    pub fn from_config(addresses: &ContractAddresses) -> Self {
        let mut resolver = Self::default().with_address(ContractName::Protocol, addresses.protocol);
        if let Some(oracle_prover) = addresses.oracle_prover {
            resolver = resolver.with_address(ContractName::OracleProver, oracle_prover);
        }
        resolver
    }

    pub fn with_address(mut self, name: ContractName, address: Address) -> Self {
        self.addresses.insert(name, address);
        self
    }

    pub fn with_verifier(mut self, id: VerifierId, verifier: Arc<dyn PlonkVerifier>) -> Self {
        self.verifiers.insert(id, verifier);
        self
    }
}

impl fmt::Debug for StaticResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut verifiers: Vec<String> = self.verifiers.keys().map(VerifierId::name).collect();
        verifiers.sort();
        f.debug_struct("StaticResolver")
            .field("addresses", &self.addresses)
            .field("verifiers", &verifiers)
            .finish()
    }
}

impl Resolver for StaticResolver {
    fn resolve_address(&self, name: ContractName) -> Option<Address> {
        self.addresses.get(&name).copied()
    }

    fn resolve_verifier(&self, id: &VerifierId) -> Option<Arc<dyn PlonkVerifier>> {
        self.verifiers.get(id).cloned()
    }
}
