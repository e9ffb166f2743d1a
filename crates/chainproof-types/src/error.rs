use thiserror::Error;

/// Errors produced by hash construction, hex parsing, and wire decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex hash: {0}")]
    HexFormat(String),

    #[error("invalid hash length: expected {expected}, got {actual}")]
    InvalidHashLength { expected: usize, actual: usize },

    #[error("input ended before the encoded integer was complete")]
    Truncated,

    #[error("encoded integer overflows {bits} bits")]
    VarIntOverflow { bits: u32 },
}
