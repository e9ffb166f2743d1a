//! Hash constructions over domain-tagged hashes.
//!
//! Provides BIP-340 style tagged hashing, Bitcoin merkle trees with
//! inclusion proofs, and BIP-157 compact filter header chains.
//!
//! Merkle construction rejects two distinct nodes carrying the same hash
//! (CVE-2012-2459) while still pairing an odd node out with itself.
//!
//! Events are emitted through `tracing`; no subscriber is installed here.

pub mod error;
pub mod filter_chain;
pub mod merkle;
pub mod proof;
pub mod tagged;

pub use error::{ChainError, MerkleError};
pub use filter_chain::FilterHeaderChain;
pub use merkle::{merkle_layers, merkle_root, MerkleTree};
pub use proof::{generate_proof, verify_proof, MerklePosition, MerkleProof};
pub use tagged::{tag_digest, Bip340Challenge, TapBranch, TaggedHash, TapLeaf, TapTweak};
