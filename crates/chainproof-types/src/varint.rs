//! Wire integer codecs.
//!
//! - CompactSize, the length prefix of the P2P protocol and transaction
//!   serialization.
//! - CVarInt, the MSB base-128 encoding used by block undo data and the
//!   chainstate, where each continuation group carries a `+1` bias so every
//!   value has exactly one encoding.
//!
//! Readers take a `&mut &[u8]` cursor and only advance it on success.

use bytes::{Buf, BufMut};

use crate::error::TypeError;

/// Append the CompactSize encoding of `value`.
pub fn write_compact_size<B: BufMut>(buf: &mut B, value: u64) {
    match value {
        0..=0xFC => buf.put_u8(value as u8),
        0xFD..=0xFFFF => {
            buf.put_u8(0xFD);
            buf.put_u16_le(value as u16);
        }
        0x1_0000..=0xFFFF_FFFF => {
            buf.put_u8(0xFE);
            buf.put_u32_le(value as u32);
        }
        _ => {
            buf.put_u8(0xFF);
            buf.put_u64_le(value);
        }
    }
}

/// Encoded length of `value` as CompactSize.
pub fn compact_size_len(value: u64) -> usize {
    match value {
        0..=0xFC => 1,
        0xFD..=0xFFFF => 3,
        0x1_0000..=0xFFFF_FFFF => 5,
        _ => 9,
    }
}

/// Read one CompactSize value.
pub fn read_compact_size(input: &mut &[u8]) -> Result<u64, TypeError> {
    let mut cursor = *input;
    if !cursor.has_remaining() {
        return Err(TypeError::Truncated);
    }
    let width = match cursor.get_u8() {
        0xFD => 2,
        0xFE => 4,
        0xFF => 8,
        byte => {
            *input = cursor;
            return Ok(u64::from(byte));
        }
    };
    if cursor.remaining() < width {
        return Err(TypeError::Truncated);
    }
    let value = cursor.get_uint_le(width);
    *input = cursor;
    Ok(value)
}

/// Append the CVarInt encoding of `value`.
pub fn write_cvarint<B: BufMut>(buf: &mut B, value: u64) {
    buf.put_slice(&cvarint_bytes(value));
}

/// CVarInt encoding of `value`.
pub fn cvarint_bytes(value: u64) -> Vec<u8> {
    // Groups are produced least significant first, then reversed.
    let mut bytes = Vec::with_capacity(10);
    let mut rest = value;
    bytes.push((rest & 0x7F) as u8);
    while rest > 0x7F {
        rest = (rest >> 7) - 1;
        bytes.push((rest & 0x7F) as u8 | 0x80);
    }
    bytes.reverse();
    bytes
}

/// Unsigned integer widths accepted by [`read_cvarint`].
pub trait CVarIntTarget: Sized {
    const BITS: u32;
    const MAX: u64;

    fn from_u64(value: u64) -> Option<Self>;
}

macro_rules! cvarint_target {
    ($($ty:ty),*) => {
        $(
            impl CVarIntTarget for $ty {
                const BITS: u32 = <$ty>::BITS;
                const MAX: u64 = <$ty>::MAX as u64;

                fn from_u64(value: u64) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }
            }
        )*
    };
}

cvarint_target!(u8, u16, u32, u64);

/// Read one CVarInt value into `T`, failing if it does not fit.
pub fn read_cvarint<T: CVarIntTarget>(input: &mut &[u8]) -> Result<T, TypeError> {
    let overflow = TypeError::VarIntOverflow { bits: T::BITS };
    let mut cursor = *input;
    let mut result: u64 = 0;

    while cursor.has_remaining() {
        let byte = cursor.get_u8();
        if result > T::MAX >> 7 {
            return Err(overflow);
        }
        result = (result << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 != 0 {
            if result == T::MAX {
                return Err(overflow);
            }
            result += 1;
        } else {
            let value = T::from_u64(result).ok_or(overflow)?;
            *input = cursor;
            return Ok(value);
        }
    }

    Err(TypeError::Truncated)
}
