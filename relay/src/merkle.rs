//! Merkle inclusion proofs against relayed headers.
//!
//! A proof is the list of sibling hashes from the transaction's leaf up to
//! the root. Bit `i` of the transaction index says whether the running hash
//! is the right (1) or left (0) child at level `i`.

use bitcoin::hashes::{sha256d, Hash};
use bitcoin::{TxMerkleNode, Txid};

use crate::error::{RelayError, RelayResult};

/// Deepest proof accepted. A block cannot hold 2^32 transactions.
pub const MAX_PROOF_DEPTH: usize = 32;

/// Compute the merkle root implied by `txid`, its `index` and the `proof`.
pub fn compute_root(txid: Txid, index: u32, proof: &[TxMerkleNode]) -> RelayResult<TxMerkleNode> {
    if proof.len() > MAX_PROOF_DEPTH {
        return Err(RelayError::InvalidMerkleProof(format!(
            "proof depth {} exceeds {}",
            proof.len(),
            MAX_PROOF_DEPTH
        )));
    }
    if proof.len() < MAX_PROOF_DEPTH && u64::from(index) >> proof.len() != 0 {
        return Err(RelayError::InvalidMerkleProof(format!(
            "index {} does not fit a proof of depth {}",
            index,
            proof.len()
        )));
    }

    let mut current = TxMerkleNode::from_raw_hash(txid.to_raw_hash());
    for (level, sibling) in proof.iter().enumerate() {
        current = if (index >> level) & 1 == 1 {
            hash_pair(sibling, &current)
        } else {
            hash_pair(&current, sibling)
        };
    }
    Ok(current)
}

fn hash_pair(left: &TxMerkleNode, right: &TxMerkleNode) -> TxMerkleNode {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(left.as_byte_array());
    data[32..].copy_from_slice(right.as_byte_array());
    TxMerkleNode::from_raw_hash(sha256d::Hash::hash(&data))
}
