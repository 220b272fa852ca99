//! Canonical encoding of block headers and of the zk proof instance.
//!
//! The instance is a public input of the validity circuits. Field order and widths must
//! stay identical to what the proof generation pipeline hashes, any drift makes every
//! genuine proof fail verification.

use crate::bindings::{BlockHeader, Evidence};
use alloy::primitives::{B256, Bytes, keccak256};
use alloy_rlp::{Encodable, Header};
use common::fork_info::Fork;

/// RLP items of `header`, in Ethereum header order. `baseFeePerGas` is only present
/// when non-zero.
pub fn header_rlp_items(header: &BlockHeader) -> Vec<Bytes> {
    let mut logs_bloom = Vec::with_capacity(256);
    for word in &header.logsBloom {
        logs_bloom.extend_from_slice(word.as_slice());
    }

    let mut items = vec![
        rlp_item(&header.parentHash),
        rlp_item(&header.ommersHash),
        rlp_item(&header.beneficiary),
        rlp_item(&header.stateRoot),
        rlp_item(&header.transactionsRoot),
        rlp_item(&header.receiptsRoot),
        rlp_item(logs_bloom.as_slice()),
        rlp_item(&header.difficulty),
        rlp_item(&header.height),
        rlp_item(&header.gasLimit),
        rlp_item(&header.gasUsed),
        rlp_item(&header.timestamp),
        rlp_item(&header.extraData),
        rlp_item(&header.mixHash),
        rlp_item(&header.nonce.to_be_bytes()),
    ];
    if !header.baseFeePerGas.is_zero() {
        items.push(rlp_item(&header.baseFeePerGas));
    }
    items
}

pub fn block_hash(header: &BlockHeader) -> B256 {
    keccak256(encode_list(&header_rlp_items(header)))
}

/// Public input the validity proofs of `evidence` are bound to.
pub fn instance(evidence: &Evidence, fork: Fork) -> B256 {
    let mut items = header_rlp_items(&evidence.header);
    items.push(rlp_item(&evidence.prover));
    items.push(rlp_item(&evidence.meta.txListHash));
    if fork == Fork::TxListProof {
        items.push(rlp_item(&evidence.meta.txListProofHash));
        items.push(rlp_item(&evidence.meta.l1Height));
        items.push(rlp_item(&evidence.meta.l1Hash));
    }
    keccak256(encode_list(&items))
}

fn rlp_item<T: Encodable + ?Sized>(value: &T) -> Bytes {
    let mut out = Vec::with_capacity(value.length());
    value.encode(&mut out);
    out.into()
}

fn encode_list(items: &[Bytes]) -> Vec<u8> {
    let payload_length = items.iter().map(|item| item.len()).sum();
    let mut out = Vec::with_capacity(payload_length + 9);
    Header {
        list: true,
        payload_length,
    }
    .encode(&mut out);
    for item in items {
        out.extend_from_slice(item);
    }
    out
}
