//! Checks on the transaction and receipt at index 0 of a block.
//!
//! A valid block starts with the anchor transaction: a legacy call from the golden touch
//! account to the protocol contract, carrying the L1 block the L2 block is anchored to and
//! signed with a fixed nonce. A block proven invalid instead carries a throw-away block whose
//! first receipt holds the `BlockInvalidated` event of the rejected transaction list.

use crate::{
    bindings::{BlockHeader, BlockInvalidated, BlockMetadata, anchorCall},
    config::ProtocolConfig,
    decoder::{decode_receipt, decode_tx},
    error::ProveBlockError,
    resolver::{ContractName, Resolver},
    trie::{FIRST_INDEX_KEY, InclusionVerifier},
};
use alloy::{
    consensus::{SignableTransaction, TxEnvelope, TxReceipt, Typed2718},
    primitives::{B256, U256},
    sol_types::{SolCall, SolEvent},
};
use common::{
    crypto::fixed_k_signer::{GX, GX2, sign_hash_with_k},
    l2::config::GOLDEN_TOUCH_PRIVATE_KEY,
};
use tracing::debug;

/// Raw anchor transaction and receipt with their inclusion proofs.
#[derive(Debug, Clone, Copy)]
pub struct AnchorEvidence<'a> {
    pub tx: &'a [u8],
    pub receipt: &'a [u8],
    pub tx_proof: &'a [u8],
    pub receipt_proof: &'a [u8],
}

pub fn validate_anchor_tx<R, T>(
    config: &ProtocolConfig,
    resolver: &R,
    trie: &T,
    header: &BlockHeader,
    meta: &BlockMetadata,
    anchor: &AnchorEvidence<'_>,
) -> Result<(), ProveBlockError>
where
    R: Resolver + ?Sized,
    T: InclusionVerifier + ?Sized,
{
    let tx = decode_tx(config.l2.chain_id, anchor.tx)?;
    let TxEnvelope::Legacy(signed) = &tx else {
        return Err(ProveBlockError::AnchorType(tx.ty()));
    };
    let anchor_tx = signed.tx();

    let protocol = resolver.require_address(ContractName::Protocol)?;
    if anchor_tx.to.to() != Some(&protocol) {
        return Err(ProveBlockError::AnchorDest);
    }

    if anchor_tx.gas_limit != config.l2.anchor_tx_gas_limit {
        return Err(ProveBlockError::AnchorGasLimit {
            expected: config.l2.anchor_tx_gas_limit,
            actual: anchor_tx.gas_limit,
        });
    }

    let expected_input = anchorCall {
        l1Height: U256::from(meta.l1Height),
        l1Hash: meta.l1Hash,
    }
    .abi_encode();
    if anchor_tx.input.as_ref() != expected_input.as_slice() {
        return Err(ProveBlockError::AnchorCalldata);
    }

    let r = B256::from(signed.signature().r().to_be_bytes::<32>());
    if r == GX2 {
        // k = 2 is only allowed when k = 1 yields s = 0
        let k1_signature =
            sign_hash_with_k(GOLDEN_TOUCH_PRIVATE_KEY, anchor_tx.signature_hash(), 1);
        if !matches!(k1_signature, Ok(signature) if signature.s().is_zero()) {
            return Err(ProveBlockError::AnchorSigS);
        }
    } else if r != GX {
        return Err(ProveBlockError::AnchorSigR);
    }

    if !trie.verify_inclusion(
        &FIRST_INDEX_KEY,
        anchor.tx,
        anchor.tx_proof,
        header.transactionsRoot,
    ) {
        return Err(ProveBlockError::AnchorTxProof);
    }

    let receipt = decode_receipt(anchor.receipt)?;
    if !receipt.status() {
        return Err(ProveBlockError::AnchorReceiptStatus);
    }
    if !trie.verify_inclusion(
        &FIRST_INDEX_KEY,
        anchor.receipt,
        anchor.receipt_proof,
        header.receiptsRoot,
    ) {
        return Err(ProveBlockError::AnchorReceiptProof);
    }

    debug!("Anchor tx {} of block {} is valid", signed.hash(), meta.id);
    Ok(())
}

/// Checks that `receipt` is the first receipt of the block committed to by `header` and
/// that it holds exactly the `BlockInvalidated` event for `target`.
pub fn validate_invalidation_receipt<R, T>(
    resolver: &R,
    trie: &T,
    header: &BlockHeader,
    target: &BlockMetadata,
    receipt: &[u8],
    receipt_proof: &[u8],
) -> Result<(), ProveBlockError>
where
    R: Resolver + ?Sized,
    T: InclusionVerifier + ?Sized,
{
    let decoded = decode_receipt(receipt)?;
    if !decoded.status() {
        return Err(ProveBlockError::AnchorReceiptStatus);
    }
    if !trie.verify_inclusion(&FIRST_INDEX_KEY, receipt, receipt_proof, header.receiptsRoot) {
        return Err(ProveBlockError::AnchorReceiptProof);
    }

    let logs = decoded.logs();
    let [log] = logs else {
        return Err(ProveBlockError::AnchorReceiptLogs(logs.len()));
    };

    let protocol = resolver.require_address(ContractName::Protocol)?;
    if log.address != protocol {
        return Err(ProveBlockError::AnchorReceiptAddr);
    }
    if !log.data.data.is_empty() {
        return Err(ProveBlockError::AnchorReceiptData);
    }
    if log.data.topics() != [BlockInvalidated::SIGNATURE_HASH, target.txListHash] {
        return Err(ProveBlockError::AnchorReceiptTopics);
    }

    debug!("Invalidation receipt for block {} is valid", target.id);
    Ok(())
}
