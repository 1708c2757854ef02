//! # Integrity Hashing
//!
//! SHA-256 content hashing and a binary Merkle tree, so producers can derive
//! the metadata hashes they register and the roots they anchor.
//!
//! ## Tree Shape
//!
//! - Parent = SHA-256(left || right)
//! - A level with an odd node count pairs the last node with itself
//! - The root of a single leaf is the leaf; the root of no leaves is zero

use crate::entities::{Hash, ZERO_HASH};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 of arbitrary content.
pub fn content_hash(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

fn next_level(level: &[Hash]) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            hash_pair(left, right)
        })
        .collect()
}

/// Merkle root over already-hashed leaves.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    if leaves.is_empty() {
        return ZERO_HASH;
    }
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = next_level(&level);
    }
    level[0]
}

/// Position of a sibling relative to the node being proven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiblingPosition {
    /// Sibling is on the left.
    Left,
    /// Sibling is on the right.
    Right,
}

/// A node in a Merkle proof path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofNode {
    /// Sibling hash.
    pub hash: Hash,
    /// Sibling position.
    pub position: SiblingPosition,
}

/// Inclusion proof for one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// The leaf being proven.
    pub leaf: Hash,
    /// Index of the leaf in the original list.
    pub index: usize,
    /// Sibling hashes from leaf to root.
    pub path: Vec<ProofNode>,
}

/// Build an inclusion proof for `leaves[index]`.
///
/// Returns `None` if `index` is out of bounds.
pub fn merkle_proof(leaves: &[Hash], index: usize) -> Option<MerkleProof> {
    let leaf = *leaves.get(index)?;
    let mut path = Vec::new();
    let mut level = leaves.to_vec();
    let mut idx = index;

    while level.len() > 1 {
        let (sibling_idx, position) = if idx % 2 == 0 {
            // Odd tail pairs with itself
            ((idx + 1).min(level.len() - 1), SiblingPosition::Right)
        } else {
            (idx - 1, SiblingPosition::Left)
        };
        path.push(ProofNode {
            hash: level[sibling_idx],
            position,
        });
        level = next_level(&level);
        idx /= 2;
    }

    Some(MerkleProof { leaf, index, path })
}

/// Recompute the root from a proof and compare.
pub fn verify_merkle_proof(proof: &MerkleProof, expected_root: &Hash) -> bool {
    let computed = proof
        .path
        .iter()
        .fold(proof.leaf, |current, node| match node.position {
            SiblingPosition::Left => hash_pair(&node.hash, &current),
            SiblingPosition::Right => hash_pair(&current, &node.hash),
        });
    computed == *expected_root
}
