use chainproof_types::digest::sha256;
use chainproof_types::{Hash, HashDomain};

/// Domain-separated hashing for domains that declare a fixed tag.
///
/// A tagged hash is `SHA-256(TAG || TAG || message)`: a single SHA-256 with
/// the tag written twice, unlike [`Hash::derive`], which double-hashes the
/// message alone.
///
/// ```
/// use chainproof_crypto::{TaggedHash, TapLeaf};
///
/// let leaf = TapLeaf::derive_tagged(&[0xc0, 0x01, 0x51]);
/// assert_eq!(
///     hex::encode(leaf.as_little_endian()),
///     "a85b2107f791b26a84e7586c28cec7cb61202ed3d01944d832500f363782d675"
/// );
/// ```
pub trait TaggedHash: HashDomain + Sized {
    /// Tag bytes, usually the [`tag_digest`] of a tag name.
    const TAG: &'static [u8];

    /// Tagged hash of `message`, stored in digest order.
    fn derive_tagged(message: &[u8]) -> Hash<Self> {
        let mut buf = Vec::with_capacity(Self::TAG.len() * 2 + message.len());
        buf.extend_from_slice(Self::TAG);
        buf.extend_from_slice(Self::TAG);
        buf.extend_from_slice(message);
        Hash::from_little_endian_bytes(sha256(&buf))
    }
}

/// Tag bytes for a BIP-340 tag name: `SHA-256(name)`.
pub fn tag_digest(name: &str) -> [u8; 32] {
    sha256(name.as_bytes())
}

macro_rules! tagged_domains {
    ($($(#[$meta:meta])* $name:ident => $tag:expr;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub enum $name {}

            impl HashDomain for $name {
                const NAME: &'static str = stringify!($name);
            }

            impl TaggedHash for $name {
                const TAG: &'static [u8] = &$tag;
            }
        )*
    };
}

tagged_domains! {
    /// BIP-340 challenge, `SHA-256("BIP0340/challenge")`.
    Bip340Challenge => [
        0x7b, 0xb5, 0x2d, 0x7a, 0x9f, 0xef, 0x58, 0x32,
        0x3e, 0xb1, 0xbf, 0x7a, 0x40, 0x7d, 0xb3, 0x82,
        0xd2, 0xf3, 0xf2, 0xd8, 0x1b, 0xb1, 0x22, 0x4f,
        0x49, 0xfe, 0x51, 0x8f, 0x6d, 0x48, 0xd3, 0x7c,
    ];
    /// BIP-341 script leaf, `SHA-256("TapLeaf")`.
    TapLeaf => [
        0xae, 0xea, 0x8f, 0xdc, 0x42, 0x08, 0x98, 0x31,
        0x05, 0x73, 0x4b, 0x58, 0x08, 0x1d, 0x1e, 0x26,
        0x38, 0xd3, 0x5f, 0x1c, 0xb5, 0x40, 0x08, 0xd4,
        0xd3, 0x57, 0xca, 0x03, 0xbe, 0x78, 0xe9, 0xee,
    ];
    /// BIP-341 script branch, `SHA-256("TapBranch")`.
    TapBranch => [
        0x19, 0x41, 0xa1, 0xf2, 0xe5, 0x6e, 0xb9, 0x5f,
        0xa2, 0xa9, 0xf1, 0x94, 0xbe, 0x5c, 0x01, 0xf7,
        0x21, 0x6f, 0x33, 0xed, 0x82, 0xb0, 0x91, 0x46,
        0x34, 0x90, 0xd0, 0x5b, 0xf5, 0x16, 0xa0, 0x15,
    ];
    /// BIP-341 key tweak, `SHA-256("TapTweak")`.
    TapTweak => [
        0xe8, 0x0f, 0xe1, 0x63, 0x9c, 0x9c, 0xa0, 0x50,
        0xe3, 0xaf, 0x1b, 0x39, 0xc1, 0x43, 0xc6, 0x3e,
        0x42, 0x9c, 0xbc, 0xeb, 0x15, 0xd9, 0x40, 0xfb,
        0xb5, 0xc5, 0xa1, 0xf4, 0xaf, 0x57, 0xc5, 0xe9,
    ];
}
