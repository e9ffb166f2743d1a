use std::cmp::Ordering;
use std::fmt;
use std::hash::Hasher;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::digest::hash256;
use crate::domain::{
    CompactFilterHash, CompactFilterHeaderHash, HashDomain, MerkleHash, MerkleSourceHash,
    TransactionLegacyHash, TransactionWitnessHash,
};
use crate::error::TypeError;

/// Byte length of every [`Hash`].
pub const HASH_LEN: usize = 32;

/// A 32-byte hash tagged with the domain it belongs to.
///
/// Bytes are stored "small-endian": the order a double-SHA-256 produces,
/// with the trailing zeros of a block hash last. The big-endian view used
/// for hex display and block explorers is derived by reversal.
///
/// Equality compares bytes. Ordering compares the big-endian view, i.e.
/// the hash as a 256-bit big-endian integer.
pub struct Hash<D> {
    bytes: [u8; HASH_LEN],
    _domain: PhantomData<fn() -> D>,
}

impl<D> Hash<D> {
    /// Wrap bytes already in small-endian (digest output) order.
    pub const fn from_little_endian_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self {
            bytes,
            _domain: PhantomData,
        }
    }

    /// Wrap bytes in big-endian (display) order.
    pub fn from_big_endian_bytes(mut bytes: [u8; HASH_LEN]) -> Self {
        bytes.reverse();
        Self::from_little_endian_bytes(bytes)
    }

    /// Like [`Hash::from_little_endian_bytes`], for an unchecked buffer.
    pub fn from_little_endian_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        Ok(Self::from_little_endian_bytes(to_array(bytes)?))
    }

    /// Like [`Hash::from_big_endian_bytes`], for an unchecked buffer.
    pub fn from_big_endian_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        Ok(Self::from_big_endian_bytes(to_array(bytes)?))
    }

    /// The all-zero hash.
    pub const fn zero() -> Self {
        Self::from_little_endian_bytes([0u8; HASH_LEN])
    }

    /// Hash whose numeric value is `value`.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; HASH_LEN];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        Self::from_little_endian_bytes(bytes)
    }

    /// Double-SHA-256 of `data`.
    pub fn derive(data: &[u8]) -> Self {
        Self::from_little_endian_bytes(hash256(data))
    }

    /// Double-SHA-256 of `self || other` (small-endian views), tagged as `T`.
    ///
    /// Both block-chain style hash chaining and merkle pairing reduce to this.
    pub fn concat_and_rehash<T>(&self, other: &Self) -> Hash<T> {
        let mut buf = [0u8; HASH_LEN * 2];
        buf[..HASH_LEN].copy_from_slice(&self.bytes);
        buf[HASH_LEN..].copy_from_slice(&other.bytes);
        Hash::derive(&buf)
    }

    /// Small-endian bytes.
    pub fn as_little_endian(&self) -> &[u8; HASH_LEN] {
        &self.bytes
    }

    /// Big-endian bytes.
    pub fn to_big_endian_bytes(&self) -> [u8; HASH_LEN] {
        let mut bytes = self.bytes;
        bytes.reverse();
        bytes
    }

    /// Big-endian, lower-case hex (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_big_endian_bytes())
    }

    /// Parse 64 hex characters in big-endian order.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        if s.len() != HASH_LEN * 2 {
            return Err(TypeError::HexFormat(format!(
                "expected {} hex characters, got {}",
                HASH_LEN * 2,
                s.len()
            )));
        }
        let mut bytes = [0u8; HASH_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| TypeError::HexFormat(e.to_string()))?;
        Ok(Self::from_big_endian_bytes(bytes))
    }

    /// Reinterpret the same bytes under another domain. Crate-internal:
    /// public conversions are the named ones below.
    pub(crate) fn retag<T>(&self) -> Hash<T> {
        Hash::from_little_endian_bytes(self.bytes)
    }
}

fn to_array(bytes: &[u8]) -> Result<[u8; HASH_LEN], TypeError> {
    bytes
        .try_into()
        .map_err(|_| TypeError::InvalidHashLength {
            expected: HASH_LEN,
            actual: bytes.len(),
        })
}

impl Hash<TransactionLegacyHash> {
    /// The witness id of a transaction without witness data: the same bytes.
    pub fn as_witness_id(&self) -> Hash<TransactionWitnessHash> {
        self.retag()
    }
}

impl Hash<CompactFilterHash> {
    /// BIP-157 filter header: `hash256(filter_hash || prev_header)`.
    pub fn chain_header(
        &self,
        prev_header: &Hash<CompactFilterHeaderHash>,
    ) -> Hash<CompactFilterHeaderHash> {
        self.retag::<CompactFilterHeaderHash>()
            .concat_and_rehash(prev_header)
    }
}

impl<D: MerkleSourceHash> Hash<D> {
    /// Seed a merkle tree: the same bytes under the merkle domain.
    pub fn as_merkle_leaf(&self) -> Hash<MerkleHash> {
        self.retag()
    }
}

impl<D> Clone for Hash<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Hash<D> {}

impl<D> PartialEq for Hash<D> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<D> Eq for Hash<D> {}

impl<D> Ord for Hash<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.iter().rev().cmp(other.bytes.iter().rev())
    }
}

impl<D> PartialOrd for Hash<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Digest bytes are already uniformly distributed; one word is enough.
impl<D> std::hash::Hash for Hash<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&self.bytes[..8]);
        state.write_u64(u64::from_be_bytes(prefix));
    }
}

impl<D: HashDomain> fmt::Debug for Hash<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", D::NAME, self.to_hex())
    }
}

impl<D> fmt::Display for Hash<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<D> FromStr for Hash<D> {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl<D> Default for Hash<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<D> AsRef<[u8]> for Hash<D> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<D> From<Hash<D>> for [u8; HASH_LEN] {
    fn from(hash: Hash<D>) -> Self {
        hash.bytes
    }
}

impl<D> Serialize for Hash<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de, D> Deserialize<'de> for Hash<D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::domain::{BlockHeaderHash, SignatureHash};

    const BLOCK_1_722_094: &str =
        "000000000000012ecc7c92ab495125bf2539607b836830a47a3a5d145304d14a";
    const BLOCK_1_722_097: &str =
        "00000000004d6370ab8d39f3e221354cb4940b042c700ab88e7ad20d72ca2d78";
    const BLOCK_1_722_224: &str =
        "000000001b3e04061a9baec74f84fff9177833b3df5d0ded65dc331782af1c5b";

    fn block(hex: &str) -> Hash<BlockHeaderHash> {
        hex.parse().unwrap()
    }

    /// Records what `std::hash::Hash` feeds the hasher.
    #[derive(Default)]
    struct RecordingHasher(Vec<u8>);

    impl Hasher for RecordingHasher {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, bytes: &[u8]) {
            self.0.extend_from_slice(bytes);
        }
    }

    #[test]
    fn big_endian_is_reversed_storage() {
        let h = block(BLOCK_1_722_094);
        assert_eq!(h.as_little_endian()[0], 0x4a);
        assert_eq!(h.as_little_endian()[31], 0x00);
        assert_eq!(h.to_big_endian_bytes()[0], 0x00);
        assert_eq!(h.to_big_endian_bytes()[31], 0x4a);
    }

    #[test]
    fn from_big_and_little_agree() {
        let be = block(BLOCK_1_722_097).to_big_endian_bytes();
        let mut le = be;
        le.reverse();
        assert_eq!(
            Hash::<BlockHeaderHash>::from_big_endian_bytes(be),
            Hash::<BlockHeaderHash>::from_little_endian_bytes(le)
        );
    }

    #[test]
    fn slice_constructors_check_length() {
        let err = Hash::<SignatureHash>::from_big_endian_slice(&[0u8; 31]).unwrap_err();
        assert_eq!(err, TypeError::InvalidHashLength { expected: 32, actual: 31 });
        let err = Hash::<SignatureHash>::from_little_endian_slice(&[0u8; 33]).unwrap_err();
        assert_eq!(err, TypeError::InvalidHashLength { expected: 32, actual: 33 });
        assert!(Hash::<SignatureHash>::from_little_endian_slice(&[7u8; 32]).is_ok());
    }

    #[test]
    fn ordering_follows_big_endian_value() {
        let a = block(BLOCK_1_722_094);
        let b = block(BLOCK_1_722_097);
        let c = block(BLOCK_1_722_224);
        assert!(!(a < a));
        assert!(a < b);
        assert!(a < c);
        assert!(!(b < a));
        assert!(b < c);
        assert!(!(c < b));
        assert!(!(c < c));
    }

    #[test]
    fn ordering_small_values() {
        let one = block("0000000000000000000000000000000000000000000000000000000000000001");
        let two = block("0000000000000000000000000000000000000000000000000000000000000002");
        let high = block("0100000000000000000000000000000000000000000000000000000000000000");
        assert!(one < two);
        assert!(two < high);
    }

    #[test]
    fn equality() {
        assert_eq!(block(BLOCK_1_722_094), block(BLOCK_1_722_094));
        assert_ne!(block(BLOCK_1_722_094), block(BLOCK_1_722_097));
        assert_ne!(block(BLOCK_1_722_097), block(BLOCK_1_722_224));
    }

    #[test]
    fn hash_code_uses_leading_storage_word() {
        let cases = [
            (BLOCK_1_722_094, 0x7a3a_5d14_5304_d14a_u64),
            (BLOCK_1_722_097, 0x8e7a_d20d_72ca_2d78),
            (BLOCK_1_722_224, 0x65dc_3317_82af_1c5b),
        ];
        for (hex, tail) in cases {
            let mut hasher = RecordingHasher::default();
            std::hash::Hash::hash(&block(hex), &mut hasher);
            assert_eq!(hasher.0, tail.swap_bytes().to_ne_bytes().to_vec());
        }
    }

    #[test]
    fn usable_in_hash_set() {
        let set: HashSet<_> = [BLOCK_1_722_094, BLOCK_1_722_097, BLOCK_1_722_094]
            .into_iter()
            .map(block)
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn zero_and_integer_values() {
        assert_eq!(Hash::<BlockHeaderHash>::zero(), Hash::from_u64(0));
        assert_eq!(Hash::<BlockHeaderHash>::default(), Hash::zero());
        assert_eq!(
            block("0000000000000000000000000000000000000000000000007a3a5d145304d14a"),
            Hash::from_u64(0x7a3a_5d14_5304_d14a)
        );
    }

    #[test]
    fn display_and_debug() {
        let h = block(BLOCK_1_722_224);
        assert_eq!(h.to_string(), BLOCK_1_722_224);
        assert_eq!(format!("{h:?}"), format!("BlockHeaderHash({BLOCK_1_722_224})"));
    }

    #[test]
    fn hex_rejects_malformed_input() {
        let short = &BLOCK_1_722_094[..62];
        assert!(matches!(
            Hash::<BlockHeaderHash>::from_hex(short),
            Err(TypeError::HexFormat(_))
        ));
        let long = format!("{BLOCK_1_722_094}00");
        assert!(matches!(
            Hash::<BlockHeaderHash>::from_hex(&long),
            Err(TypeError::HexFormat(_))
        ));
        let bad = format!("{}zz", &BLOCK_1_722_094[..62]);
        assert!(matches!(
            Hash::<BlockHeaderHash>::from_hex(&bad),
            Err(TypeError::HexFormat(_))
        ));
        assert!(matches!(
            Hash::<BlockHeaderHash>::from_hex(""),
            Err(TypeError::HexFormat(_))
        ));
    }

    #[test]
    fn hex_accepts_upper_case_and_emits_lower_case() {
        let h = block(&BLOCK_1_722_097.to_uppercase());
        assert_eq!(h.to_hex(), BLOCK_1_722_097);
    }

    #[test]
    fn derive_is_double_sha256() {
        let h = Hash::<BlockHeaderHash>::derive(b"");
        assert_eq!(
            h.to_hex(),
            "56944c5d3f98413ef45cf54545538103cc9f298e0575820ad3591376e2e0f65d"
        );
    }

    #[test]
    fn concat_and_rehash_orders_self_first() {
        let a = Hash::<TransactionLegacyHash>::derive(b"a");
        let b = Hash::<TransactionLegacyHash>::derive(b"b");
        let mut buf = a.as_little_endian().to_vec();
        buf.extend_from_slice(b.as_little_endian());
        let ab: Hash<MerkleHash> = a.concat_and_rehash(&b);
        let ba: Hash<MerkleHash> = b.concat_and_rehash(&a);
        assert_eq!(ab, Hash::derive(&buf));
        assert_ne!(ab, ba);
    }

    #[test]
    fn named_conversions_keep_bytes() {
        let txid = Hash::<TransactionLegacyHash>::derive(b"tx");
        assert_eq!(txid.as_witness_id().as_little_endian(), txid.as_little_endian());
        assert_eq!(txid.as_merkle_leaf().as_little_endian(), txid.as_little_endian());
    }

    #[test]
    fn filter_header_chains_filter_then_prev() {
        let filter = Hash::<CompactFilterHash>::derive(b"filter");
        let prev = Hash::<CompactFilterHeaderHash>::derive(b"prev");
        let mut buf = filter.as_little_endian().to_vec();
        buf.extend_from_slice(prev.as_little_endian());
        assert_eq!(filter.chain_header(&prev), Hash::derive(&buf));
    }

    #[test]
    fn serde_uses_big_endian_hex() {
        let h = block(BLOCK_1_722_094);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{BLOCK_1_722_094}\""));
        let parsed: Hash<BlockHeaderHash> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, h);
    }

    #[test]
    fn serde_rejects_bad_hex() {
        let result: Result<Hash<BlockHeaderHash>, _> = serde_json::from_str("\"abcd\"");
        assert!(result.is_err());
        let result: Result<Hash<BlockHeaderHash>, _> = serde_json::from_str("42");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn big_endian_bytes_roundtrip(bytes in any::<[u8; 32]>()) {
            let h = Hash::<BlockHeaderHash>::from_big_endian_bytes(bytes);
            prop_assert_eq!(h.to_big_endian_bytes(), bytes);
        }

        #[test]
        fn hex_roundtrip(bytes in any::<[u8; 32]>()) {
            let h = Hash::<MerkleHash>::from_little_endian_bytes(bytes);
            prop_assert_eq!(Hash::<MerkleHash>::from_hex(&h.to_hex()).unwrap(), h);
        }

        #[test]
        fn ordering_matches_big_endian_bytes(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            let ha = Hash::<SignatureHash>::from_big_endian_bytes(a);
            let hb = Hash::<SignatureHash>::from_big_endian_bytes(b);
            prop_assert_eq!(ha.cmp(&hb), a.cmp(&b));
            prop_assert_eq!(ha == hb, a == b);
        }
    }
}
