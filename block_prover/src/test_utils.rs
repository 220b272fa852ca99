//! Fixtures shared by the unit and scenario tests.

use crate::{
    anchor::AnchorEvidence,
    bindings::{BlockHeader, BlockInvalidated, BlockMetadata, anchorCall},
    config::ProtocolConfig,
    trie::test_utils::indexed_trie_with_proof,
};
use alloy::{
    consensus::{
        Receipt, ReceiptEnvelope, ReceiptWithBloom, SignableTransaction, TxEnvelope, TxLegacy,
    },
    eips::eip2718::Encodable2718,
    primitives::{Address, B256, Bytes, Log, Signature, TxKind, U256, address},
    sol_types::{SolCall, SolEvent},
};
use common::{
    crypto::fixed_k_signer::sign_hash_deterministic, l2::config::GOLDEN_TOUCH_PRIVATE_KEY,
};

pub const PROTOCOL: Address = address!("0x1670000000000000000000000000000000010001");
pub const ORACLE: Address = address!("0x1670000000000000000000000000000000010002");
pub const PROVER: Address = address!("0x00000000000000000000000000000000000b0b01");
pub const OTHER_PROVER: Address = address!("0x00000000000000000000000000000000000b0b02");

pub fn metadata(id: u64) -> BlockMetadata {
    BlockMetadata {
        id,
        l1Height: 1_000 + id,
        l1Hash: B256::with_last_byte(0x11),
        beneficiary: Address::repeat_byte(0x22),
        txListHash: B256::with_last_byte(0x33),
        txListProofHash: B256::with_last_byte(0x44),
        mixHash: B256::with_last_byte(0x55),
        extraData: Bytes::from_static(b"block"),
        gasLimit: 6_000_000,
        timestamp: 1_700_000_000 + id * 12,
        commitHeight: 1_000 + id,
        commitSlot: 10 + id,
    }
}

/// Header consistent with `meta` under `config`, with empty tries.
pub fn header_for(config: &ProtocolConfig, meta: &BlockMetadata) -> BlockHeader {
    BlockHeader {
        parentHash: B256::repeat_byte(0xaa),
        beneficiary: meta.beneficiary,
        stateRoot: B256::repeat_byte(0xbb),
        gasLimit: meta.gasLimit + config.l2.anchor_tx_gas_limit,
        gasUsed: 90_000,
        timestamp: meta.timestamp,
        extraData: meta.extraData.clone(),
        mixHash: meta.mixHash,
        height: u128::from(meta.id),
        baseFeePerGas: U256::from(10_000_000u64),
        ..Default::default()
    }
}

pub fn anchor_tx(config: &ProtocolConfig, to: Address, meta: &BlockMetadata) -> TxLegacy {
    TxLegacy {
        chain_id: Some(config.l2.chain_id),
        nonce: meta.id,
        gas_price: 0,
        gas_limit: config.l2.anchor_tx_gas_limit,
        to: TxKind::Call(to),
        value: U256::ZERO,
        input: anchorCall {
            l1Height: U256::from(meta.l1Height),
            l1Hash: meta.l1Hash,
        }
        .abi_encode()
        .into(),
    }
}

/// Encodes `tx` signed by the golden touch key with the fixed nonce.
pub fn sign_anchor(tx: TxLegacy) -> Vec<u8> {
    let signature =
        sign_hash_deterministic(GOLDEN_TOUCH_PRIVATE_KEY, tx.signature_hash()).unwrap();
    sign_anchor_with(tx, signature)
}

pub fn sign_anchor_with(tx: TxLegacy, signature: Signature) -> Vec<u8> {
    TxEnvelope::from(tx.into_signed(signature)).encoded_2718()
}

fn receipt(success: bool, logs: Vec<Log>) -> Vec<u8> {
    ReceiptEnvelope::Legacy(ReceiptWithBloom::from(Receipt {
        status: success.into(),
        cumulative_gas_used: 90_000,
        logs,
    }))
    .encoded_2718()
}

pub fn success_receipt(logs: Vec<Log>) -> Vec<u8> {
    receipt(true, logs)
}

pub fn failed_receipt() -> Vec<u8> {
    receipt(false, vec![])
}

pub fn invalidation_receipt(emitter: Address, tx_list_hash: B256) -> Vec<u8> {
    success_receipt(vec![Log::new_unchecked(
        emitter,
        vec![BlockInvalidated::SIGNATURE_HASH, tx_list_hash],
        Bytes::new(),
    )])
}

/// Block whose first transaction and receipt are committed to by its header.
#[derive(Debug, Clone)]
pub struct AnchoredBlock {
    pub meta: BlockMetadata,
    pub header: BlockHeader,
    pub tx: Vec<u8>,
    pub receipt: Vec<u8>,
    pub tx_proof: Bytes,
    pub receipt_proof: Bytes,
}

impl AnchoredBlock {
    pub fn new(
        config: &ProtocolConfig,
        meta: BlockMetadata,
        tx: Vec<u8>,
        receipt: Vec<u8>,
    ) -> Self {
        // a second entry so the roots are branch nodes
        let (transactions_root, tx_proof) = indexed_trie_with_proof(&[tx.clone(), vec![0xab; 80]]);
        let (receipts_root, receipt_proof) =
            indexed_trie_with_proof(&[receipt.clone(), vec![0xcd; 80]]);

        let header = BlockHeader {
            transactionsRoot: transactions_root,
            receiptsRoot: receipts_root,
            ..header_for(config, &meta)
        };
        Self {
            meta,
            header,
            tx,
            receipt,
            tx_proof,
            receipt_proof,
        }
    }

    /// Block with a correctly signed anchor transaction to [`PROTOCOL`] and a success receipt.
    pub fn valid(config: &ProtocolConfig, meta: BlockMetadata) -> Self {
        let tx = sign_anchor(anchor_tx(config, PROTOCOL, &meta));
        Self::new(config, meta, tx, success_receipt(vec![]))
    }

    pub fn anchor_evidence(&self) -> AnchorEvidence<'_> {
        AnchorEvidence {
            tx: &self.tx,
            receipt: &self.receipt,
            tx_proof: &self.tx_proof,
            receipt_proof: &self.receipt_proof,
        }
    }
}
