use crate::resolver::Resolver;
use alloy::primitives::B256;
use std::fmt;
use tracing::{debug, warn};

/// A deployed plonk verifier. `input` is the padded instance followed by the proof.
pub trait PlonkVerifier: Send + Sync {
    fn verify(&self, input: &[u8]) -> bool;
}

impl<F> PlonkVerifier for F
where
    F: Fn(&[u8]) -> bool + Send + Sync,
{
    fn verify(&self, input: &[u8]) -> bool {
        self(input)
    }
}

/// Name a verifier is registered under, `plonk_verifier_<circuit>` or
/// `plonk_verifier_<circuit>_v<version>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerifierId {
    pub circuit_id: u16,
    pub version: Option<u16>,
}

impl VerifierId {
    pub fn plonk(circuit_id: u16) -> Self {
        Self {
            circuit_id,
            version: None,
        }
    }

    pub fn versioned(circuit_id: u16, version: u16) -> Self {
        Self {
            circuit_id,
            version: Some(version),
        }
    }

    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VerifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(version) => write!(f, "plonk_verifier_{}_v{}", self.circuit_id, version),
            None => write!(f, "plonk_verifier_{}", self.circuit_id),
        }
    }
}

/// Verifier calldata: each half of the instance left padded to a 32 byte word, then the proof.
pub fn verifier_input(instance: B256, proof: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(64 + proof.len());
    input.extend_from_slice(&[0u8; 16]);
    input.extend_from_slice(&instance[..16]);
    input.extend_from_slice(&[0u8; 16]);
    input.extend_from_slice(&instance[16..]);
    input.extend_from_slice(proof);
    input
}

/// Runs the verifier registered as `id`. An unknown verifier counts as a failed verification.
pub fn verify_zkp<R: Resolver + ?Sized>(
    resolver: &R,
    id: &VerifierId,
    instance: B256,
    proof: &[u8],
) -> bool {
    let Some(verifier) = resolver.resolve_verifier(id) else {
        warn!("No verifier registered as {id}, rejecting proof");
        return false;
    };
    let verified = verifier.verify(&verifier_input(instance, proof));
    debug!("{id} returned {verified} for instance {instance}");
    verified
}
