//! Merkle inclusion proofs over allowlist leaves.
//!
//! ## Convention
//!
//! Both sides (tree construction and verification) go through
//! [`hash_pair`], which orders the two children by
//! [`SIBLING_ORDERING`](mintgate_types::constants::SIBLING_ORDERING):
//! numerically smaller hash first. A proof is therefore just the list of
//! sibling hashes, with no left/right bits.
//!
//! ```text
//! node = H(0x01 || min(a, b) || max(a, b))
//! ```
//!
//! When a layer has an odd number of nodes, the last node is promoted to the
//! next layer unchanged and contributes no proof element.

use mintgate_types::constants::{MAX_PROOF_DEPTH, NODE_PREFIX, SIBLING_ORDERING, SiblingOrdering};
use mintgate_types::{AllowlistLeaf, Hash32, MintgateError, Result};
use sha2::{Digest, Sha256};

/// Combine two sibling nodes.
#[must_use]
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (first, second) = match SIBLING_ORDERING {
        SiblingOrdering::Sorted => {
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        }
    };
    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(first.as_bytes());
    hasher.update(second.as_bytes());
    Hash32(hasher.finalize().into())
}

/// Fold `proof` into `leaf`, bottom-up.
#[must_use]
pub fn fold_proof(leaf: Hash32, proof: &[Hash32]) -> Hash32 {
    proof
        .iter()
        .fold(leaf, |running, sibling| hash_pair(&running, sibling))
}

/// `true` if `proof` leads from `leaf` to `root`.
#[must_use]
pub fn verify_proof(root: &Hash32, leaf: Hash32, proof: &[Hash32]) -> bool {
    proof.len() <= MAX_PROOF_DEPTH && fold_proof(leaf, proof) == *root
}

/// A complete tree, kept layer by layer so proofs can be extracted.
///
/// This is the issuing side: the minter itself only stores the root.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// `layers[0]` are the leaf hashes, the last layer is `[root]`.
    layers: Vec<Vec<Hash32>>,
}

impl MerkleTree {
    /// Build the tree committing to `leaves`, in order.
    ///
    /// # Errors
    /// [`MintgateError::Configuration`] if `leaves` is empty.
    pub fn from_leaves(leaves: &[AllowlistLeaf]) -> Result<Self> {
        Self::from_hashes(leaves.iter().map(AllowlistLeaf::leaf_hash).collect())
    }

    pub fn from_hashes(hashes: Vec<Hash32>) -> Result<Self> {
        if hashes.is_empty() {
            return Err(MintgateError::Configuration(
                "allowlist must contain at least one leaf".into(),
            ));
        }
        let mut layers = vec![hashes];
        while let Some(layer) = layers.last().filter(|l| l.len() > 1) {
            let next = layer
                .chunks(2)
                .filter_map(|pair| pair.iter().copied().reduce(|a, b| hash_pair(&a, &b)))
                .collect();
            layers.push(next);
        }
        Ok(Self { layers })
    }

    #[must_use]
    pub fn root(&self) -> Hash32 {
        self.layers
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or_default()
    }

    /// Number of leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sibling path for the leaf at `index`, or `None` if out of range.
    #[must_use]
    pub fn proof(&self, mut index: usize) -> Option<Vec<Hash32>> {
        if index >= self.len() {
            return None;
        }
        let mut proof = Vec::new();
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = index ^ 1;
            if let Some(node) = layer.get(sibling) {
                proof.push(*node);
            }
            index /= 2;
        }
        Some(proof)
    }
}
