use alloy::primitives::{B256, Bytes};
use alloy_rlp::Decodable;
use alloy_trie::{Nibbles, proof::verify_proof};
use tracing::debug;

/// Trie key of the first entry of a transactions or receipts trie, `rlp(0)`.
pub const FIRST_INDEX_KEY: [u8; 1] = [alloy_rlp::EMPTY_STRING_CODE];

/// Membership check of `key -> value` in a trie committed to by `root`.
pub trait InclusionVerifier {
    fn verify_inclusion(&self, key: &[u8], value: &[u8], proof: &[u8], root: B256) -> bool;
}

/// Merkle Patricia Trie inclusion. The proof is an RLP list of the trie nodes
/// on the path to `key`, root first.
#[derive(Debug, Default, Clone, Copy)]
pub struct MerkleTrie;

impl InclusionVerifier for MerkleTrie {
    fn verify_inclusion(&self, key: &[u8], value: &[u8], proof: &[u8], root: B256) -> bool {
        let mut buf = proof;
        let nodes = match Vec::<Bytes>::decode(&mut buf) {
            Ok(nodes) if buf.is_empty() => nodes,
            Ok(_) => {
                debug!("Inclusion proof has trailing bytes");
                return false;
            }
            Err(e) => {
                debug!("Failed to decode inclusion proof: {e}");
                return false;
            }
        };

        match verify_proof(root, Nibbles::unpack(key), Some(value.to_vec()), &nodes) {
            Ok(()) => true,
            Err(e) => {
                debug!("Inclusion proof rejected: {e}");
                false
            }
        }
    }
}
