//! Domain-tagged hash types for block chain data.
//!
//! Every hash carries a zero-sized domain marker, so block headers, merkle
//! nodes, txids, wtxids, compact filters and signature hashes are distinct
//! types that cannot be mixed up. Crossing domains takes a named
//! conversion.
//!
//! # Key Types
//!
//! - [`Hash`]: 32-byte hash stored in digest ("small-endian") order
//! - [`HashDomain`]: implemented by every domain marker
//! - [`MerkleSourceHash`]: the domains allowed as merkle inputs
//! - [`TypeError`]: construction, hex and wire decoding failures
//!
//! The [`digest`] module binds SHA-256 / RIPEMD-160 and [`varint`] holds the
//! CompactSize and CVarInt codecs.

pub mod digest;
pub mod domain;
pub mod error;
pub mod hash;
pub mod varint;

pub use domain::{
    BlockHeaderHash, CompactFilterHash, CompactFilterHeaderHash, HashDomain, MerkleHash,
    MerkleSourceHash, SignatureHash, TransactionLegacyHash, TransactionWitnessHash,
};
pub use error::TypeError;
pub use hash::{Hash, HASH_LEN};
