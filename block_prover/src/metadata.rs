use crate::{
    bindings::{BlockHeader, BlockMetadata},
    config::ProtocolConfig,
    error::ProveBlockError,
    state::ProverState,
};
use alloy::{
    primitives::{B256, keccak256},
    sol_types::SolValue,
};
use tracing::{debug, warn};

/// Commitment stored for a block at proposal time, `keccak256(abi.encode(meta))`.
pub fn metadata_hash(meta: &BlockMetadata) -> B256 {
    keccak256(meta.abi_encode())
}

/// Checks that `meta` describes the provable block `block_id` and matches its proposal.
pub fn check_metadata<S: ProverState + ?Sized>(
    state: &S,
    config: &ProtocolConfig,
    meta: &BlockMetadata,
    block_id: u64,
) -> Result<(), ProveBlockError> {
    let latest_verified_id = state.latest_verified_id();
    let next_block_id = state.next_block_id();
    if meta.id != block_id || meta.id <= latest_verified_id || meta.id >= next_block_id {
        return Err(ProveBlockError::IdOutOfRange {
            id: meta.id,
            latest_verified_id,
            next_block_id,
        });
    }

    if config.skip_metadata_check {
        debug!("Metadata commitment check skipped for block {}", meta.id);
        return Ok(());
    }

    if state.meta_hash(meta.id) != Some(metadata_hash(meta)) {
        warn!("Metadata of block {} does not match its commitment", meta.id);
        return Err(ProveBlockError::MetadataMismatch);
    }
    Ok(())
}

pub fn validate_header_for_metadata(
    config: &ProtocolConfig,
    header: &BlockHeader,
    meta: &BlockMetadata,
) -> Result<(), ProveBlockError> {
    if config.skip_evidence_validation {
        return Ok(());
    }

    let mismatch = if header.parentHash.is_zero() {
        Some("parentHash")
    } else if header.beneficiary != meta.beneficiary {
        Some("beneficiary")
    } else if !header.difficulty.is_zero() {
        Some("difficulty")
    } else if Some(header.gasLimit) != meta.gasLimit.checked_add(config.l2.anchor_tx_gas_limit) {
        Some("gasLimit")
    } else if header.gasUsed == 0 {
        Some("gasUsed")
    } else if header.timestamp != meta.timestamp {
        Some("timestamp")
    } else if header.extraData != meta.extraData {
        Some("extraData")
    } else if header.mixHash != meta.mixHash {
        Some("mixHash")
    } else {
        None
    };

    match mismatch {
        Some(field) => {
            warn!("Header of block {} disagrees with metadata: {field}", meta.id);
            Err(ProveBlockError::MetadataMismatch)
        }
        None => Ok(()),
    }
}
