use thiserror::Error;

/// Errors from merkle tree construction and proof generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MerkleError {
    #[error("sequence input hashList cannot be empty")]
    InputEmpty,

    /// Two independently present nodes hold the same hash (CVE-2012-2459).
    #[error("identical hash pair at layer {layer}, index {index}")]
    IdenticalHashPair { layer: usize, index: usize },

    #[error("a single leaf is its own root and has no proof")]
    SingleLeaf,

    #[error("leaf index {index} out of range for {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors from compact filter header chain verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("filter header mismatch at index {index}")]
    HeaderMismatch { index: usize },
}
