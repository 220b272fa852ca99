use alloy::primitives::{Address, B256, b256};
use anyhow::Error;
use std::collections::HashMap;

/// Block hash recorded for a block proven invalid.
pub const BLOCK_DEADEND_HASH: B256 =
    b256!("0000000000000000000000000000000000000000000000000000000000000001");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForkChoiceKey {
    pub block_id: u64,
    pub parent_hash: B256,
}

impl ForkChoiceKey {
    pub fn new(block_id: u64, parent_hash: B256) -> Self {
        Self {
            block_id,
            parent_hash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkChoiceStatus {
    Unset,
    /// Seeded by the oracle prover, waiting for a prover to be credited.
    Pending,
    Closed,
}

/// Resulting block hash claimed for a `(block id, parent hash)` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForkChoice {
    pub block_hash: B256,
    pub prover: Address,
    pub proven_at: u64,
}

impl ForkChoice {
    pub fn status(&self) -> ForkChoiceStatus {
        if self.block_hash.is_zero() {
            ForkChoiceStatus::Unset
        } else if self.prover.is_zero() {
            ForkChoiceStatus::Pending
        } else {
            ForkChoiceStatus::Closed
        }
    }

    pub fn is_dead_end(&self) -> bool {
        self.block_hash == BLOCK_DEADEND_HASH
    }
}

/// Storage the prover reads and writes. Records are never deleted here, pruning belongs to
/// finalization.
pub trait ProverState {
    fn latest_verified_id(&self) -> u64;
    fn next_block_id(&self) -> u64;
    /// Commitment stored when block `id` was proposed.
    fn meta_hash(&self, id: u64) -> Option<B256>;
    /// Returns the default (unset) record when nothing was stored for `key`.
    fn fork_choice(&self, key: &ForkChoiceKey) -> ForkChoice;
    fn set_fork_choice(&mut self, key: ForkChoiceKey, fork_choice: ForkChoice);
}

/// In-memory [`ProverState`].
#[derive(Debug, Default, Clone)]
pub struct State {
    latest_verified_id: u64,
    next_block_id: u64,
    proposed_blocks: HashMap<u64, B256>,
    fork_choices: HashMap<ForkChoiceKey, ForkChoice>,
}

impl State {
    /// Starts right after genesis: block 0 is verified, block 1 is the next to be proposed.
    pub fn new() -> Self {
        Self {
            latest_verified_id: 0,
            next_block_id: 1,
            ..Default::default()
        }
    }

    /// Records the metadata commitment of the next proposed block.
    pub fn record_proposal(&mut self, id: u64, meta_hash: B256) -> Result<(), Error> {
        if id != self.next_block_id {
            return Err(anyhow::anyhow!(
                "record_proposal: expected block {}, got {}",
                self.next_block_id,
                id
            ));
        }
        self.proposed_blocks.insert(id, meta_hash);
        self.next_block_id += 1;
        Ok(())
    }

    /// Moves the verified head forward.
    pub fn mark_verified(&mut self, id: u64) -> Result<(), Error> {
        if id <= self.latest_verified_id || id >= self.next_block_id {
            return Err(anyhow::anyhow!(
                "mark_verified: block {} is outside ({}, {})",
                id,
                self.latest_verified_id,
                self.next_block_id
            ));
        }
        self.latest_verified_id = id;
        Ok(())
    }

    pub fn fork_choice_count(&self) -> usize {
        self.fork_choices.len()
    }
}

impl ProverState for State {
    fn latest_verified_id(&self) -> u64 {
        self.latest_verified_id
    }

    fn next_block_id(&self) -> u64 {
        self.next_block_id
    }

    fn meta_hash(&self, id: u64) -> Option<B256> {
        self.proposed_blocks.get(&id).copied()
    }

    fn fork_choice(&self, key: &ForkChoiceKey) -> ForkChoice {
        self.fork_choices.get(key).copied().unwrap_or_default()
    }

    fn set_fork_choice(&mut self, key: ForkChoiceKey, fork_choice: ForkChoice) {
        self.fork_choices.insert(key, fork_choice);
    }
}
