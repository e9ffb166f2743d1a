use chainproof_types::{Hash, MerkleHash, MerkleSourceHash};
use tracing::{debug, trace};

use crate::error::MerkleError;

/// Bitcoin-style binary merkle tree over an ordered list of hashes.
///
/// Built fresh from its leaves and never mutated afterwards. A layer with an
/// odd number of nodes pairs its last node with itself; two distinct nodes
/// holding the same hash are rejected instead.
///
/// ```text
///             root = H(h01 || h22)
///            /                    \
///     h01 = H(t0 || t1)      h22 = H(t2 || t2)
///      /          \              |
///     t0          t1             t2
/// ```
///
/// `layers` keeps every generated layer, nearest the leaves first; the leaves
/// themselves are not stored and the last layer holds only the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    root: Hash<MerkleHash>,
    layers: Vec<Vec<Hash<MerkleHash>>>,
}

impl MerkleTree {
    /// Build the tree for `leaves`.
    ///
    /// A single leaf is its own root (reinterpreted as a merkle hash) and
    /// produces no layers.
    pub fn build<D: MerkleSourceHash>(leaves: &[Hash<D>]) -> Result<Self, MerkleError> {
        let first = match leaves {
            [] => return Err(MerkleError::InputEmpty),
            [single] => {
                return Ok(Self {
                    root: single.as_merkle_leaf(),
                    layers: Vec::new(),
                })
            }
            _ => pair_layer(leaves, 0)?,
        };

        let mut layers = Vec::new();
        let mut current = first;
        while current.len() > 1 {
            let parents = pair_layer(&current, layers.len() + 1)?;
            layers.push(std::mem::replace(&mut current, parents));
        }
        let root = current[0];
        layers.push(current);

        debug!(leaves = leaves.len(), depth = layers.len(), %root, "built merkle tree");
        Ok(Self { root, layers })
    }

    /// The merkle root.
    pub fn root(&self) -> Hash<MerkleHash> {
        self.root
    }

    /// Generated layers, nearest the leaves first, ending with `[root]`.
    pub fn layers(&self) -> &[Vec<Hash<MerkleHash>>] {
        &self.layers
    }

    /// Number of pairing rounds between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Split into root and layers.
    pub fn into_parts(self) -> (Hash<MerkleHash>, Vec<Vec<Hash<MerkleHash>>>) {
        (self.root, self.layers)
    }
}

/// Merkle root of `leaves`.
pub fn merkle_root<D: MerkleSourceHash>(leaves: &[Hash<D>]) -> Result<Hash<MerkleHash>, MerkleError> {
    MerkleTree::build(leaves).map(|tree| tree.root)
}

/// Generated layers of the tree over `leaves`.
pub fn merkle_layers<D: MerkleSourceHash>(
    leaves: &[Hash<D>],
) -> Result<Vec<Vec<Hash<MerkleHash>>>, MerkleError> {
    MerkleTree::build(leaves).map(|tree| tree.layers)
}

/// Pair `nodes` left to right into their parents. `layer` is the depth of
/// `nodes`, 0 for the leaves.
fn pair_layer<D: MerkleSourceHash>(
    nodes: &[Hash<D>],
    layer: usize,
) -> Result<Vec<Hash<MerkleHash>>, MerkleError> {
    let mut parents = Vec::with_capacity(nodes.len().div_ceil(2));
    for (pair_index, pair) in nodes.chunks(2).enumerate() {
        let left = &pair[0];
        let parent = match pair.get(1) {
            Some(right) if right == left => {
                let index = pair_index * 2;
                debug!(layer, index, hash = %left, "rejected identical merkle pair");
                return Err(MerkleError::IdenticalHashPair { layer, index });
            }
            Some(right) => left.concat_and_rehash(right),
            // odd node out: pair with itself
            None => left.concat_and_rehash(left),
        };
        parents.push(parent);
    }
    trace!(layer, width = parents.len(), "paired merkle layer");
    Ok(parents)
}
