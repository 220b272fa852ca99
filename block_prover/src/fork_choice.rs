//! Arbitration of competing claims on a `(block id, parent hash)` slot.
//!
//! Claims are handled in two phases. [`ForkChoiceArbiter::stage`] reads the slot, applies
//! the transition rules and returns the record to write without touching the state. Proof
//! verification runs in between, and [`ForkChoiceArbiter::commit`] writes the record only
//! if the slot still holds what was read when staging.

use crate::{
    error::ProveBlockError,
    state::{ForkChoice, ForkChoiceKey, ForkChoiceStatus, ProverState},
};
use alloy::primitives::{Address, B256};
use common::fork_info::Fork;
use tracing::{debug, info, warn};

/// A claim that block `key.block_id` on top of `key.parent_hash` hashes to `block_hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub key: ForkChoiceKey,
    pub block_hash: B256,
    /// Address credited when the claim closes the slot.
    pub prover: Address,
    pub caller: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedForkChoice {
    pub key: ForkChoiceKey,
    snapshot: ForkChoice,
    record: ForkChoice,
    oracle_proving: bool,
}

impl StagedForkChoice {
    /// Seeded by the oracle prover, no proof needs to be verified.
    pub fn is_oracle_proving(&self) -> bool {
        self.oracle_proving
    }

    pub fn record(&self) -> &ForkChoice {
        &self.record
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ForkChoiceArbiter {
    fork: Fork,
    oracle_prover: Option<Address>,
    oracle_required: bool,
}

impl ForkChoiceArbiter {
    pub fn new(fork: Fork, oracle_prover: Option<Address>, oracle_required: bool) -> Self {
        Self {
            fork,
            oracle_prover: oracle_prover.filter(|address| !address.is_zero()),
            oracle_required,
        }
    }

    fn is_oracle(&self, caller: Address) -> bool {
        self.oracle_prover == Some(caller)
    }

    /// Error for a first claim that must come from the oracle prover, if any.
    /// After the TxListProof fork a registered oracle always has the first claim.
    fn first_claim_error(&self) -> Option<ProveBlockError> {
        match self.fork {
            Fork::Anchored if self.oracle_required => Some(ProveBlockError::CannotBeFirstProver),
            Fork::Anchored => None,
            Fork::TxListProof if self.oracle_required || self.oracle_prover.is_some() => {
                Some(ProveBlockError::NotOracleProver)
            }
            Fork::TxListProof => None,
        }
    }

    pub fn stage<S: ProverState + ?Sized>(
        &self,
        state: &S,
        claim: &Claim,
        now: u64,
    ) -> Result<StagedForkChoice, ProveBlockError> {
        let snapshot = state.fork_choice(&claim.key);

        let (record, oracle_proving) = match snapshot.status() {
            ForkChoiceStatus::Unset if self.is_oracle(claim.caller) => {
                debug!(
                    "Oracle prover seeds block {} parent {}",
                    claim.key.block_id, claim.key.parent_hash
                );
                (
                    ForkChoice {
                        block_hash: claim.block_hash,
                        ..Default::default()
                    },
                    true,
                )
            }
            ForkChoiceStatus::Unset => {
                if let Some(error) = self.first_claim_error() {
                    warn!(
                        "Rejecting first claim on block {} from {}, oracle prover required",
                        claim.key.block_id, claim.caller
                    );
                    return Err(error);
                }
                (self.credited(claim, now), false)
            }
            ForkChoiceStatus::Pending | ForkChoiceStatus::Closed => {
                if snapshot.block_hash != claim.block_hash {
                    warn!(
                        "Conflicting claim on block {} parent {}: recorded {}, claimed {}",
                        claim.key.block_id,
                        claim.key.parent_hash,
                        snapshot.block_hash,
                        claim.block_hash
                    );
                    return Err(ProveBlockError::ConflictingProof);
                }
                if snapshot.status() == ForkChoiceStatus::Closed {
                    return Err(ProveBlockError::AlreadyProven);
                }
                (self.credited(claim, now), false)
            }
        };

        Ok(StagedForkChoice {
            key: claim.key,
            snapshot,
            record,
            oracle_proving,
        })
    }

    fn credited(&self, claim: &Claim, now: u64) -> ForkChoice {
        ForkChoice {
            block_hash: claim.block_hash,
            prover: claim.prover,
            proven_at: now,
        }
    }

    /// Writes a staged record. Fails without writing when the slot changed since staging.
    pub fn commit<S: ProverState + ?Sized>(
        &self,
        state: &mut S,
        staged: StagedForkChoice,
    ) -> Result<ForkChoice, ProveBlockError> {
        let current = state.fork_choice(&staged.key);
        if current != staged.snapshot {
            warn!(
                "Fork choice of block {} parent {} changed while the claim was verified",
                staged.key.block_id, staged.key.parent_hash
            );
            if current.block_hash != staged.record.block_hash {
                return Err(ProveBlockError::ConflictingProof);
            }
            return Err(ProveBlockError::AlreadyProven);
        }

        state.set_fork_choice(staged.key, staged.record);
        info!(
            "Fork choice recorded: block {} parent {} hash {} prover {}",
            staged.key.block_id,
            staged.key.parent_hash,
            staged.record.block_hash,
            staged.record.prover
        );
        Ok(staged.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BLOCK_DEADEND_HASH, State};

    use alloy::primitives::address;

    const ORACLE: Address = address!("0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a");
    const ALICE: Address = address!("0x0101010101010101010101010101010101010101");
    const BOB: Address = address!("0x0202020202020202020202020202020202020202");

    fn key() -> ForkChoiceKey {
        ForkChoiceKey::new(5, B256::repeat_byte(0x50))
    }

    fn claim(block_hash: B256, caller: Address) -> Claim {
        Claim {
            key: key(),
            block_hash,
            prover: caller,
            caller,
        }
    }

    fn stage_and_commit(
        arbiter: &ForkChoiceArbiter,
        state: &mut State,
        claim: &Claim,
        now: u64,
    ) -> Result<ForkChoice, ProveBlockError> {
        let staged = arbiter.stage(state, claim, now)?;
        arbiter.commit(state, staged)
    }

    #[test]
    fn test_first_claim_closes_slot() {
        let arbiter = ForkChoiceArbiter::new(Fork::Anchored, None, false);
        let mut state = State::new();
        let hash = B256::repeat_byte(0x11);

        let staged = arbiter.stage(&state, &claim(hash, ALICE), 100).unwrap();
        assert!(!staged.is_oracle_proving());
        // nothing is written while staging
        assert_eq!(state.fork_choice_count(), 0);

        let record = arbiter.commit(&mut state, staged).unwrap();
        assert_eq!(
            record,
            ForkChoice {
                block_hash: hash,
                prover: ALICE,
                proven_at: 100
            }
        );
        assert_eq!(state.fork_choice(&key()), record);
    }

    #[test]
    fn test_second_claims_on_closed_slot() {
        let arbiter = ForkChoiceArbiter::new(Fork::Anchored, None, false);
        let mut state = State::new();
        let hash = B256::repeat_byte(0x11);
        stage_and_commit(&arbiter, &mut state, &claim(hash, ALICE), 100).unwrap();
        let before = state.fork_choice(&key());

        assert_eq!(
            arbiter.stage(&state, &claim(hash, BOB), 101),
            Err(ProveBlockError::AlreadyProven)
        );
        assert_eq!(
            arbiter.stage(&state, &claim(B256::repeat_byte(0x12), BOB), 101),
            Err(ProveBlockError::ConflictingProof)
        );
        // rejecting again yields the same error
        assert_eq!(
            arbiter.stage(&state, &claim(hash, BOB), 102),
            Err(ProveBlockError::AlreadyProven)
        );
        assert_eq!(state.fork_choice(&key()), before);
    }

    #[test]
    fn test_oracle_seeds_then_prover_confirms() {
        let arbiter = ForkChoiceArbiter::new(Fork::Anchored, Some(ORACLE), true);
        let mut state = State::new();
        let hash = B256::repeat_byte(0x11);

        let staged = arbiter.stage(&state, &claim(hash, ORACLE), 100).unwrap();
        assert!(staged.is_oracle_proving());
        arbiter.commit(&mut state, staged).unwrap();
        assert_eq!(state.fork_choice(&key()).status(), ForkChoiceStatus::Pending);
        assert_eq!(state.fork_choice(&key()).prover, Address::ZERO);

        let record = stage_and_commit(&arbiter, &mut state, &claim(hash, ALICE), 200).unwrap();
        assert_eq!(record.prover, ALICE);
        assert_eq!(record.proven_at, 200);
        assert_eq!(state.fork_choice(&key()).status(), ForkChoiceStatus::Closed);
    }

    #[test]
    fn test_pending_slot_rejects_conflicting_hash() {
        let arbiter = ForkChoiceArbiter::new(Fork::Anchored, Some(ORACLE), false);
        let mut state = State::new();
        stage_and_commit(&arbiter, &mut state, &claim(B256::repeat_byte(0x11), ORACLE), 1).unwrap();

        assert_eq!(
            arbiter.stage(&state, &claim(B256::repeat_byte(0x12), ALICE), 2),
            Err(ProveBlockError::ConflictingProof)
        );
    }

    #[test]
    fn test_oracle_claim_on_set_slot_follows_ordinary_rules() {
        let arbiter = ForkChoiceArbiter::new(Fork::Anchored, Some(ORACLE), false);
        let mut state = State::new();
        let hash = B256::repeat_byte(0x11);
        stage_and_commit(&arbiter, &mut state, &claim(hash, ALICE), 1).unwrap();

        assert_eq!(
            arbiter.stage(&state, &claim(hash, ORACLE), 2),
            Err(ProveBlockError::AlreadyProven)
        );
        assert_eq!(
            arbiter.stage(&state, &claim(BLOCK_DEADEND_HASH, ORACLE), 2),
            Err(ProveBlockError::ConflictingProof)
        );
    }

    #[test]
    fn test_oracle_required_rejects_other_first_claimers() {
        let hash = B256::repeat_byte(0x11);
        let state = State::new();

        let anchored = ForkChoiceArbiter::new(Fork::Anchored, Some(ORACLE), true);
        assert_eq!(
            anchored.stage(&state, &claim(hash, ALICE), 1),
            Err(ProveBlockError::CannotBeFirstProver)
        );

        let tx_list_proof = ForkChoiceArbiter::new(Fork::TxListProof, Some(ORACLE), true);
        assert_eq!(
            tx_list_proof.stage(&state, &claim(hash, ALICE), 1),
            Err(ProveBlockError::NotOracleProver)
        );

        // without the requirement anyone may claim first before the TxListProof fork
        let open = ForkChoiceArbiter::new(Fork::Anchored, Some(ORACLE), false);
        assert!(open.stage(&state, &claim(hash, ALICE), 1).is_ok());
    }

    #[test]
    fn test_registered_oracle_has_first_claim_after_tx_list_proof_fork() {
        let hash = B256::repeat_byte(0x11);
        let state = State::new();

        let arbiter = ForkChoiceArbiter::new(Fork::TxListProof, Some(ORACLE), false);
        assert_eq!(
            arbiter.stage(&state, &claim(hash, ALICE), 1),
            Err(ProveBlockError::NotOracleProver)
        );
        assert!(arbiter.stage(&state, &claim(hash, ORACLE), 1).is_ok());

        let no_oracle = ForkChoiceArbiter::new(Fork::TxListProof, None, false);
        assert!(no_oracle.stage(&state, &claim(hash, ALICE), 1).is_ok());
    }

    #[test]
    fn test_zero_oracle_address_is_ignored() {
        let arbiter = ForkChoiceArbiter::new(Fork::Anchored, Some(Address::ZERO), false);
        let state = State::new();
        let staged = arbiter
            .stage(&state, &claim(B256::repeat_byte(0x11), Address::ZERO), 1)
            .unwrap();
        assert!(!staged.is_oracle_proving());
    }

    #[test]
    fn test_commit_detects_concurrent_write() {
        let arbiter = ForkChoiceArbiter::new(Fork::Anchored, None, false);
        let mut state = State::new();
        let hash = B256::repeat_byte(0x11);

        let alice = arbiter.stage(&state, &claim(hash, ALICE), 1).unwrap();
        let bob = arbiter.stage(&state, &claim(hash, BOB), 1).unwrap();
        let carol = arbiter
            .stage(&state, &claim(B256::repeat_byte(0x12), BOB), 1)
            .unwrap();

        arbiter.commit(&mut state, alice).unwrap();
        assert_eq!(
            arbiter.commit(&mut state, bob),
            Err(ProveBlockError::AlreadyProven)
        );
        assert_eq!(
            arbiter.commit(&mut state, carol),
            Err(ProveBlockError::ConflictingProof)
        );
        assert_eq!(state.fork_choice(&key()).prover, ALICE);
    }
}
