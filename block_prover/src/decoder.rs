//! Typed views over the opaque blobs handed to the prover.

use crate::{
    bindings::{BlockMetadata, Evidence},
    error::ProveBlockError,
};
use alloy::{
    consensus::{ReceiptEnvelope, Transaction, TxEnvelope},
    eips::eip2718::Decodable2718,
    sol_types::SolValue,
};

pub fn decode_evidence(input: &[u8]) -> Result<Evidence, ProveBlockError> {
    Evidence::abi_decode(input)
        .map_err(|e| ProveBlockError::InvalidEvidence(format!("evidence: {e}")))
}

pub fn decode_metadata(input: &[u8]) -> Result<BlockMetadata, ProveBlockError> {
    BlockMetadata::abi_decode(input)
        .map_err(|e| ProveBlockError::InvalidEvidence(format!("metadata: {e}")))
}

/// Decodes an EIP-2718 encoded transaction signed for `chain_id`.
pub fn decode_tx(chain_id: u64, input: &[u8]) -> Result<TxEnvelope, ProveBlockError> {
    let mut buf = input;
    let tx = TxEnvelope::decode_2718(&mut buf)
        .map_err(|e| ProveBlockError::InvalidEvidence(format!("transaction: {e}")))?;
    if !buf.is_empty() {
        return Err(ProveBlockError::InvalidEvidence(format!(
            "transaction: {} trailing bytes",
            buf.len()
        )));
    }
    if tx.chain_id() != Some(chain_id) {
        return Err(ProveBlockError::InvalidEvidence(format!(
            "transaction: chain id {:?}, expected {chain_id}",
            tx.chain_id()
        )));
    }
    Ok(tx)
}

pub fn decode_receipt(input: &[u8]) -> Result<ReceiptEnvelope, ProveBlockError> {
    let mut buf = input;
    let receipt = ReceiptEnvelope::decode_2718(&mut buf)
        .map_err(|e| ProveBlockError::InvalidEvidence(format!("receipt: {e}")))?;
    if !buf.is_empty() {
        return Err(ProveBlockError::InvalidEvidence(format!(
            "receipt: {} trailing bytes",
            buf.len()
        )));
    }
    Ok(receipt)
}
