//! Hash domains.
//!
//! A domain is a zero-sized marker selecting what a [`Hash`](crate::Hash)
//! means. Hashes of different domains are distinct types, so a filter hash
//! can never be paired with a transaction id by accident.

/// Marker implemented by every hash domain.
pub trait HashDomain: 'static {
    /// Human-readable domain name, used in `Debug` output.
    const NAME: &'static str;
}

mod sealed {
    pub trait Sealed {}
}

/// Domains whose hashes may be merkle leaves or merkle inputs.
///
/// Sealed: only [`MerkleHash`], [`TransactionLegacyHash`] and
/// [`TransactionWitnessHash`] qualify.
pub trait MerkleSourceHash: HashDomain + sealed::Sealed {}

macro_rules! hash_domains {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub enum $name {}

            impl HashDomain for $name {
                const NAME: &'static str = stringify!($name);
            }
        )*
    };
}

hash_domains! {
    /// Block header hash (block id).
    BlockHeaderHash,
    /// BIP-158 compact filter hash.
    CompactFilterHash,
    /// BIP-157 compact filter header.
    CompactFilterHeaderHash,
    /// Interior node or root of a merkle tree.
    MerkleHash,
    /// Transaction signature hash.
    SignatureHash,
    /// Transaction id without witness data (txid).
    TransactionLegacyHash,
    /// Transaction id including witness data (wtxid).
    TransactionWitnessHash,
}

impl sealed::Sealed for MerkleHash {}
impl sealed::Sealed for TransactionLegacyHash {}
impl sealed::Sealed for TransactionWitnessHash {}

impl MerkleSourceHash for MerkleHash {}
impl MerkleSourceHash for TransactionLegacyHash {}
impl MerkleSourceHash for TransactionWitnessHash {}
