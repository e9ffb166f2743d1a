//! Merkle inclusion proofs.
//!
//! A proof for leaf `i` holds the leaf's sibling (`i ^ 1`, or the leaf itself
//! when it is the odd node out) and then, for every layer between the leaves
//! and the root, the sibling of the leaf's ancestor at `(i >> (level + 1)) ^ 1`
//! under the same clamping rule. Each entry records which side it sits on,
//! so verification knows the concatenation order.

use std::ops::Not;

use chainproof_types::{Hash, MerkleHash, MerkleSourceHash};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MerkleError;
use crate::merkle::MerkleTree;

/// A hash together with the side of the pairing it occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum MerklePosition<D: MerkleSourceHash> {
    Left(Hash<D>),
    Right(Hash<D>),
}

impl<D: MerkleSourceHash> MerklePosition<D> {
    /// Side from the parity of `index`: even is left, odd is right.
    pub fn from_index(index: usize, hash: Hash<D>) -> Self {
        if index & 1 == 0 {
            Self::Left(hash)
        } else {
            Self::Right(hash)
        }
    }

    pub fn hash(&self) -> &Hash<D> {
        match self {
            Self::Left(hash) | Self::Right(hash) => hash,
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Parent of this node and `other`, which takes the opposite side.
    pub fn pair(&self, other: &Hash<D>) -> Hash<MerkleHash> {
        match self {
            Self::Left(left) => left.concat_and_rehash(other),
            Self::Right(right) => other.concat_and_rehash(right),
        }
    }
}

impl<D: MerkleSourceHash> Not for MerklePosition<D> {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Left(hash) => Self::Right(hash),
            Self::Right(hash) => Self::Left(hash),
        }
    }
}

/// Inclusion proof for one leaf.
///
/// `path` runs from the layer just above the leaves up to, but excluding,
/// the root layer; a two-leaf tree has an empty path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MerkleProof<D: MerkleSourceHash> {
    /// Sibling of the proven leaf.
    pub neighbour: MerklePosition<D>,
    /// Siblings of the leaf's ancestors, nearest the leaves first.
    pub path: Vec<MerklePosition<MerkleHash>>,
    /// Root of the tree the proof was generated from.
    pub root: Hash<MerkleHash>,
}

impl<D: MerkleSourceHash> MerkleProof<D> {
    /// Build the tree over `leaves` and extract the proof for `index`.
    pub fn generate(leaves: &[Hash<D>], index: usize) -> Result<Self, MerkleError> {
        match leaves.len() {
            0 => return Err(MerkleError::InputEmpty),
            1 => return Err(MerkleError::SingleLeaf),
            len if index >= len => return Err(MerkleError::IndexOutOfRange { index, len }),
            _ => {}
        }

        let neighbour = sibling(leaves, index);
        let (root, layers) = MerkleTree::build(leaves)?.into_parts();
        let below_root = &layers[..layers.len() - 1];
        let path: Vec<_> = below_root
            .iter()
            .enumerate()
            .map(|(level, layer)| sibling(layer, index >> (level + 1)))
            .collect();

        debug!(index, leaves = leaves.len(), path = path.len(), "generated merkle proof");
        Ok(Self {
            neighbour,
            path,
            root,
        })
    }

    /// Recompute the root implied by `value` and this proof.
    pub fn compute_root(&self, value: &Hash<D>) -> Hash<MerkleHash> {
        verify_proof(value, &self.neighbour, &self.path)
    }

    /// Whether `value` is included under `trusted_root`.
    ///
    /// Compares against the caller's root, never the one carried in the
    /// proof.
    pub fn verify(&self, value: &Hash<D>, trusted_root: &Hash<MerkleHash>) -> bool {
        self.compute_root(value) == *trusted_root
    }
}

/// Proof for leaf `index`; see [`MerkleProof::generate`].
pub fn generate_proof<D: MerkleSourceHash>(
    leaves: &[Hash<D>],
    index: usize,
) -> Result<MerkleProof<D>, MerkleError> {
    MerkleProof::generate(leaves, index)
}

/// Recompute a root: pair `value` with `neighbour`, then fold in `path` in
/// order. The caller compares the result with a root it trusts.
pub fn verify_proof<D: MerkleSourceHash>(
    value: &Hash<D>,
    neighbour: &MerklePosition<D>,
    path: &[MerklePosition<MerkleHash>],
) -> Hash<MerkleHash> {
    let first = neighbour.pair(value);
    path.iter().fold(first, |node, position| position.pair(&node))
}

/// Sibling of `index` in `layer`, clamped to the last node.
fn sibling<D: MerkleSourceHash>(layer: &[Hash<D>], index: usize) -> MerklePosition<D> {
    let offset = index ^ 1;
    MerklePosition::from_index(offset, layer[offset.min(layer.len() - 1)])
}
