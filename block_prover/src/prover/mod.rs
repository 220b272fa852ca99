
use crate::{
    anchor::{AnchorEvidence, validate_anchor_tx, validate_invalidation_receipt},
    bindings::{BlockProven, Evidence},
    config::ProtocolConfig,
    decoder::{decode_evidence, decode_metadata},
    encoder,
    error::ProveBlockError,
    fork_choice::{Claim, ForkChoiceArbiter},
    metadata::{check_metadata, validate_header_for_metadata},
    resolver::{ContractName, Resolver},
    state::{BLOCK_DEADEND_HASH, ForkChoiceKey, ProverState},
    trie::InclusionVerifier,
    verifier::{VerifierId, verify_zkp},
};
use alloy::primitives::{Address, Bytes, U256};
use anyhow::Error;
use common::{
    fork_info::{Fork, ForkInfo},
    utils::clock::Clock,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Entry points for proving blocks valid or invalid.
///
/// Every call either records one fork choice and returns the [`BlockProven`] event, or fails
/// and leaves the state as it was.
pub struct BlockProver<R: Resolver, T: InclusionVerifier, C: Clock> {
    config: ProtocolConfig,
    fork_info: ForkInfo,
    resolver: Arc<R>,
    trie: T,
    clock: Arc<C>,
}

impl<R: Resolver, T: InclusionVerifier, C: Clock> BlockProver<R, T, C> {
    pub fn new(
        config: ProtocolConfig,
        resolver: Arc<R>,
        trie: T,
        clock: Arc<C>,
    ) -> Result<Self, Error> {
        if config.zk_proofs_per_block == 0 {
            return Err(anyhow::anyhow!("zk_proofs_per_block must be at least 1"));
        }
        let fork_info = ForkInfo::from_config(config.fork_info.clone())?;
        Ok(Self {
            config,
            fork_info,
            resolver,
            trie,
            clock,
        })
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Proves that the block described by `inputs` is block `block_id`.
    ///
    /// Inputs before the TxListProof fork: evidence, anchor transaction, anchor receipt.
    /// After it: evidence only.
    pub fn prove_block<S: ProverState + ?Sized>(
        &self,
        state: &mut S,
        caller: Address,
        block_id: u64,
        inputs: &[Bytes],
    ) -> Result<BlockProven, ProveBlockError> {
        let fork = self.fork_info.fork_for_block(block_id);
        debug!(
            "proveBlock: block {block_id}, caller {caller}, fork {fork}, {} inputs",
            inputs.len()
        );
        let result = match fork {
            Fork::Anchored => self.prove_anchored_block(state, caller, block_id, inputs),
            Fork::TxListProof => self.prove_tx_list_proof_block(state, caller, block_id, inputs),
        };
        if let Err(e) = &result {
            warn!("proveBlock for block {block_id} rejected: {} ({e})", e.code());
        }
        result
    }

    /// Proves that block `block_id` is invalid, recording the dead-end hash for it.
    ///
    /// Inputs before the TxListProof fork: evidence of the throw-away block, target metadata,
    /// invalidation receipt. After it: evidence only.
    pub fn prove_block_invalid<S: ProverState + ?Sized>(
        &self,
        state: &mut S,
        caller: Address,
        block_id: u64,
        inputs: &[Bytes],
    ) -> Result<BlockProven, ProveBlockError> {
        let fork = self.fork_info.fork_for_block(block_id);
        debug!(
            "proveBlockInvalid: block {block_id}, caller {caller}, fork {fork}, {} inputs",
            inputs.len()
        );
        let result = match fork {
            Fork::Anchored => self.prove_anchored_block_invalid(state, caller, block_id, inputs),
            Fork::TxListProof => {
                self.prove_tx_list_proof_block_invalid(state, caller, block_id, inputs)
            }
        };
        if let Err(e) = &result {
            warn!("proveBlockInvalid for block {block_id} rejected: {} ({e})", e.code());
        }
        result
    }

    fn prove_anchored_block<S: ProverState + ?Sized>(
        &self,
        state: &mut S,
        caller: Address,
        block_id: u64,
        inputs: &[Bytes],
    ) -> Result<BlockProven, ProveBlockError> {
        let [evidence, anchor_tx, anchor_receipt] = expect_inputs::<3>(inputs)?;
        let zk_proofs = self.config.zk_proofs_per_block;
        let evidence = self.decode_claim(evidence, block_id, zk_proofs + 2)?;

        check_metadata(state, &self.config, &evidence.meta, block_id)?;
        validate_header_for_metadata(&self.config, &evidence.header, &evidence.meta)?;
        validate_anchor_tx(
            &self.config,
            self.resolver.as_ref(),
            &self.trie,
            &evidence.header,
            &evidence.meta,
            &AnchorEvidence {
                tx: anchor_tx,
                receipt: anchor_receipt,
                tx_proof: &evidence.proofs[zk_proofs],
                receipt_proof: &evidence.proofs[zk_proofs + 1],
            },
        )?;

        let claim = Claim {
            key: ForkChoiceKey::new(block_id, evidence.header.parentHash),
            block_hash: encoder::block_hash(&evidence.header),
            prover: evidence.prover,
            caller,
        };
        self.settle(state, Fork::Anchored, &claim, || {
            self.verify_zk_proofs(&evidence, Fork::Anchored)
        })
    }

    fn prove_anchored_block_invalid<S: ProverState + ?Sized>(
        &self,
        state: &mut S,
        caller: Address,
        block_id: u64,
        inputs: &[Bytes],
    ) -> Result<BlockProven, ProveBlockError> {
        let [evidence, target, receipt] = expect_inputs::<3>(inputs)?;
        let zk_proofs = self.config.zk_proofs_per_block;
        let evidence = self.decode_claim(evidence, block_id, zk_proofs + 1)?;
        let target = decode_metadata(target)?;

        check_metadata(state, &self.config, &target, block_id)?;
        validate_header_for_metadata(&self.config, &evidence.header, &evidence.meta)?;
        validate_invalidation_receipt(
            self.resolver.as_ref(),
            &self.trie,
            &evidence.header,
            &target,
            receipt,
            &evidence.proofs[zk_proofs],
        )?;

        let claim = Claim {
            key: ForkChoiceKey::new(block_id, evidence.header.parentHash),
            block_hash: BLOCK_DEADEND_HASH,
            prover: evidence.prover,
            caller,
        };
        self.settle(state, Fork::Anchored, &claim, || {
            self.verify_zk_proofs(&evidence, Fork::Anchored)
        })
    }

    fn prove_tx_list_proof_block<S: ProverState + ?Sized>(
        &self,
        state: &mut S,
        caller: Address,
        block_id: u64,
        inputs: &[Bytes],
    ) -> Result<BlockProven, ProveBlockError> {
        let [evidence] = expect_inputs::<1>(inputs)?;
        let evidence = self.decode_claim(evidence, block_id, 1)?;

        check_metadata(state, &self.config, &evidence.meta, block_id)?;
        validate_header_for_metadata(&self.config, &evidence.header, &evidence.meta)?;

        let claim = Claim {
            key: ForkChoiceKey::new(block_id, evidence.header.parentHash),
            block_hash: encoder::block_hash(&evidence.header),
            prover: evidence.prover,
            caller,
        };
        self.settle(state, Fork::TxListProof, &claim, || {
            self.verify_zk_proofs(&evidence, Fork::TxListProof)
        })
    }

    fn prove_tx_list_proof_block_invalid<S: ProverState + ?Sized>(
        &self,
        state: &mut S,
        caller: Address,
        block_id: u64,
        inputs: &[Bytes],
    ) -> Result<BlockProven, ProveBlockError> {
        let [evidence] = expect_inputs::<1>(inputs)?;
        let evidence = self.decode_claim(evidence, block_id, 2)?;

        check_metadata(state, &self.config, &evidence.meta, block_id)?;
        validate_header_for_metadata(&self.config, &evidence.header, &evidence.meta)?;

        let claim = Claim {
            key: ForkChoiceKey::new(block_id, evidence.header.parentHash),
            block_hash: BLOCK_DEADEND_HASH,
            prover: evidence.prover,
            caller,
        };
        self.settle(state, Fork::TxListProof, &claim, || {
            // the tx list must fail its proof for the block to be invalid
            let tx_list_verifier = self.verifier_id(self.config.tx_list_circuit_id);
            if verify_zkp(
                self.resolver.as_ref(),
                &tx_list_verifier,
                evidence.meta.txListHash,
                &evidence.proofs[1],
            ) {
                return Err(ProveBlockError::TxListProofVerified);
            }
            self.verify_zk_proofs(&evidence, Fork::TxListProof)
        })
    }

    /// Decodes the evidence and checks its shape against the claimed block.
    fn decode_claim(
        &self,
        input: &[u8],
        block_id: u64,
        expected_proofs: usize,
    ) -> Result<Evidence, ProveBlockError> {
        let evidence = decode_evidence(input)?;
        if evidence.meta.id != block_id {
            return Err(ProveBlockError::Id {
                expected: block_id,
                actual: evidence.meta.id,
            });
        }
        if evidence.prover.is_zero() {
            return Err(ProveBlockError::InvalidProver);
        }
        if evidence.proofs.len() != expected_proofs {
            return Err(ProveBlockError::ProofLength {
                expected: expected_proofs,
                actual: evidence.proofs.len(),
            });
        }
        Ok(evidence)
    }

    fn arbiter(&self, fork: Fork) -> Result<ForkChoiceArbiter, ProveBlockError> {
        let oracle_prover = if self.config.oracle_prover_required {
            Some(self.resolver.require_address(ContractName::OracleProver)?)
        } else {
            self.resolver.resolve_address(ContractName::OracleProver)
        };
        Ok(ForkChoiceArbiter::new(
            fork,
            oracle_prover,
            self.config.oracle_prover_required,
        ))
    }

    /// Stages the claim, runs `verify` unless the oracle prover seeds the slot, then commits.
    fn settle<S, F>(
        &self,
        state: &mut S,
        fork: Fork,
        claim: &Claim,
        verify: F,
    ) -> Result<BlockProven, ProveBlockError>
    where
        S: ProverState + ?Sized,
        F: FnOnce() -> Result<(), ProveBlockError>,
    {
        let arbiter = self.arbiter(fork)?;
        let staged = arbiter.stage(state, claim, self.clock.unix_timestamp())?;
        if staged.is_oracle_proving() {
            debug!(
                "Oracle prover claim for block {}, skipping proof verification",
                claim.key.block_id
            );
        } else {
            verify()?;
        }
        let record = arbiter.commit(state, staged)?;

        let event = BlockProven {
            id: U256::from(claim.key.block_id),
            parentHash: claim.key.parent_hash,
            blockHash: record.block_hash,
            provenAt: record.proven_at,
            prover: record.prover,
        };
        info!(
            "BlockProven: id {} parent {} hash {} provenAt {} prover {}",
            event.id, event.parentHash, event.blockHash, event.provenAt, event.prover
        );
        Ok(event)
    }

    fn verifier_id(&self, circuit_id: u16) -> VerifierId {
        match self.config.verifier_version {
            Some(version) => VerifierId::versioned(circuit_id, version),
            None => VerifierId::plonk(circuit_id),
        }
    }

    fn verify_zk_proofs(&self, evidence: &Evidence, fork: Fork) -> Result<(), ProveBlockError> {
        let instance = encoder::instance(evidence, fork);
        let count = match fork {
            Fork::Anchored => self.config.zk_proofs_per_block,
            Fork::TxListProof => 1,
        };

        for (index, proof) in evidence.proofs.iter().take(count).enumerate() {
            let circuit_id = u16::try_from(index)
                .ok()
                .and_then(|index| evidence.circuitId.checked_add(index))
                .ok_or(ProveBlockError::Zkp)?;
            if !verify_zkp(
                self.resolver.as_ref(),
                &self.verifier_id(circuit_id),
                instance,
                proof,
            ) {
                return Err(ProveBlockError::Zkp);
            }
        }
        Ok(())
    }
}

fn expect_inputs<const N: usize>(inputs: &[Bytes]) -> Result<[&[u8]; N], ProveBlockError> {
    let inputs: &[Bytes; N] = inputs
        .try_into()
        .map_err(|_| ProveBlockError::InputSize {
            expected: N,
            actual: inputs.len(),
        })?;
    Ok(inputs.each_ref().map(|input| &input[..]))
}
