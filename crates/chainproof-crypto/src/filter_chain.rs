use chainproof_types::{CompactFilterHash, CompactFilterHeaderHash, Hash};
use tracing::debug;

use crate::error::ChainError;

/// BIP-157 compact filter header chain.
///
/// Each header commits to its block's filter hash and the previous header:
/// `header = hash256(filter_hash || prev_header)`. The chain for the genesis
/// block starts from the all-zero header.
pub struct FilterHeaderChain;

impl FilterHeaderChain {
    /// Headers for `filter_hashes`, continuing from `prev`.
    pub fn extend(
        prev: &Hash<CompactFilterHeaderHash>,
        filter_hashes: &[Hash<CompactFilterHash>],
    ) -> Vec<Hash<CompactFilterHeaderHash>> {
        let mut headers = Vec::with_capacity(filter_hashes.len());
        let mut prev = *prev;
        for filter_hash in filter_hashes {
            prev = filter_hash.chain_header(&prev);
            headers.push(prev);
        }
        headers
    }

    /// Check that every `(filter_hash, header)` link follows from the one
    /// before it, starting at `prev`.
    ///
    /// An empty chain is valid. Fails on the first mismatching link.
    pub fn verify(
        prev: &Hash<CompactFilterHeaderHash>,
        links: &[(Hash<CompactFilterHash>, Hash<CompactFilterHeaderHash>)],
    ) -> Result<(), ChainError> {
        let mut prev = *prev;
        for (index, (filter_hash, header)) in links.iter().enumerate() {
            let expected = filter_hash.chain_header(&prev);
            if expected != *header {
                debug!(index, %expected, actual = %header, "filter header mismatch");
                return Err(ChainError::HeaderMismatch { index });
            }
            prev = *header;
        }
        Ok(())
    }
}
