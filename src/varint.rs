//! Variable-length unsigned integer encoding (compact uint)
//!
//! Values up to `0xfc` take a single byte. Larger values are a tag byte
//! followed by a little-endian payload:
//!
//! ```text
//! 0x00..=0xfc  value itself                 1 byte
//! 0xfd         u16 little-endian            3 bytes
//! 0xfe         u32 little-endian            5 bytes
//! 0xff         u64 little-endian            9 bytes
//! ```
//!
//! Every length and count prefix in this crate uses this encoding.

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::state::State;

/// Largest value stored in the tag byte itself
pub const MAX_INLINE: u64 = 0xfc;

/// Tag for a 2-byte payload
pub const U16_TAG: u8 = 0xfd;

/// Tag for a 4-byte payload
pub const U32_TAG: u8 = 0xfe;

/// Tag for an 8-byte payload
pub const U64_TAG: u8 = 0xff;

/// Maximum bytes needed for any varint (tag + u64)
pub const MAX_VARINT_SIZE: usize = 9;

/// Number of bytes `value` occupies once encoded
#[inline]
pub const fn encoded_len(value: u64) -> usize {
    if value <= MAX_INLINE {
        1
    } else if value <= u16::MAX as u64 {
        3
    } else if value <= u32::MAX as u64 {
        5
    } else {
        MAX_VARINT_SIZE
    }
}

/// Measure a varint
#[inline]
pub fn preencode(state: &mut State<'_>, value: u64) -> Result<()> {
    state.add(encoded_len(value))
}

/// Write a varint at the cursor
#[inline]
pub fn encode(state: &mut State<'_>, value: u64) -> Result<()> {
    if value <= MAX_INLINE {
        state.put_u8(value as u8)
    } else if value <= u16::MAX as u64 {
        state.put_u8(U16_TAG)?;
        state.put(&(value as u16).to_le_bytes())
    } else if value <= u32::MAX as u64 {
        state.put_u8(U32_TAG)?;
        state.put(&(value as u32).to_le_bytes())
    } else {
        state.put_u8(U64_TAG)?;
        state.put(&value.to_le_bytes())
    }
}

/// Read a varint at the cursor
#[inline]
pub fn decode(state: &mut State<'_>) -> Result<u64> {
    let tag = state.take_u8()?;
    let value = match tag {
        U16_TAG => u16::from_le_bytes(state.take_array()?) as u64,
        U32_TAG => u32::from_le_bytes(state.take_array()?) as u64,
        U64_TAG => u64::from_le_bytes(state.take_array()?),
        _ => tag as u64,
    };
    Ok(value)
}

/// Measure a length or count
#[inline]
pub fn preencode_usize(state: &mut State<'_>, value: usize) -> Result<()> {
    preencode(state, value as u64)
}

/// Write a length or count
#[inline]
pub fn encode_usize(state: &mut State<'_>, value: usize) -> Result<()> {
    encode(state, value as u64)
}

/// Read a length or count, failing if it does not fit in `usize`
#[inline]
pub fn decode_usize(state: &mut State<'_>) -> Result<usize> {
    usize::try_from(decode(state)?).map_err(|_| Error::Overflow)
}

/// Codec for the compact unsigned integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uint;

impl Codec for Uint {
    type Value<'a> = u64;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        preencode(state, *value)
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        encode(state, *value)
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        decode(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn test_size_classes() {
        let cases = [
            (0u64, 1usize),
            (252, 1),
            (253, 3),
            (65535, 3),
            (65536, 5),
            (u32::MAX as u64, 5),
            (u32::MAX as u64 + 1, 9),
            (u64::MAX, 9),
        ];

        for (value, len) in cases {
            assert_eq!(encoded_len(value), len, "len of {}", value);
            assert_eq!(codec::encode(&Uint, &value).unwrap().len(), len);
        }
    }

    #[test]
    fn test_known_bytes() {
        assert_eq!(codec::encode(&Uint, &42).unwrap(), [42]);
        assert_eq!(codec::encode(&Uint, &4200).unwrap(), [0xfd, 0x68, 0x10]);
        assert_eq!(
            codec::encode(&Uint, &9_007_199_254_740_991).unwrap(),
            [0xff, 255, 255, 255, 255, 255, 255, 31, 0]
        );
    }

    #[test]
    fn test_shared_state_sequence() {
        let values = [42u64, 4200, 9_007_199_254_740_991];

        let mut state = State::new();
        for value in values {
            preencode(&mut state, value).unwrap();
        }
        assert_eq!(state.end, 13);

        let mut buf = [0u8; 13];
        let mut state = State::for_write(&mut buf);
        for value in values {
            encode(&mut state, value).unwrap();
        }
        assert!(state.is_at_end());

        let mut state = State::for_read(&buf);
        for value in values {
            assert_eq!(decode(&mut state).unwrap(), value);
        }
        assert_eq!(state.start, state.end);
        assert_eq!(decode(&mut state), Err(Error::OutOfBounds));
    }

    #[test]
    fn test_truncated_payload() {
        assert_eq!(codec::decode(&Uint, &[0xfd, 0x01]), Err(Error::OutOfBounds));
        assert_eq!(codec::decode(&Uint, &[0xfe, 1, 2, 3]), Err(Error::OutOfBounds));
        assert_eq!(codec::decode(&Uint, &[0xff, 1, 2, 3, 4, 5, 6, 7]), Err(Error::OutOfBounds));
        assert_eq!(codec::decode(&Uint, &[]), Err(Error::OutOfBounds));
    }
}
