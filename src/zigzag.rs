//! ZigZag signed integers
//!
//! Interleaves signs so small magnitudes stay small: `0, -1, 1, -2, 2, ...`
//! map to `0, 1, 2, 3, 4, ...`. Sort order is not preserved; see
//! [`crate::lexint::SignedLexint`] for that.

use crate::codec::Codec;
use crate::error::Result;
use crate::state::State;
use crate::varint;

/// Fold a signed integer onto the unsigned range
#[inline]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Reverse [`zigzag_encode`]
#[inline]
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Codec for a signed integer stored as a zigzag compact uint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Int;

impl Codec for Int {
    type Value<'a> = i64;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        varint::preencode(state, zigzag_encode(*value))
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        varint::encode(state, zigzag_encode(*value))
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        Ok(zigzag_decode(varint::decode(state)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::error::Error;

    #[test]
    fn test_interleaving() {
        let signed = [0i64, -1, 1, -2, 2, -3, 3];
        for (folded, value) in signed.iter().enumerate() {
            assert_eq!(zigzag_encode(*value), folded as u64);
            assert_eq!(zigzag_decode(folded as u64), *value);
        }
    }

    #[test]
    fn test_extremes() {
        assert_eq!(zigzag_encode(i64::MAX), u64::MAX - 1);
        assert_eq!(zigzag_encode(i64::MIN), u64::MAX);
        assert_eq!(zigzag_decode(u64::MAX), i64::MIN);
        assert_eq!(zigzag_decode(u64::MAX - 1), i64::MAX);
    }

    #[test]
    fn test_known_bytes() {
        assert_eq!(codec::encode(&Int, &42).unwrap(), [84]);
        assert_eq!(codec::encode(&Int, &-4200).unwrap(), [0xfd, 0xcf, 0x20]);

        let buf = [84, 0xfd, 0xcf, 0x20];
        let mut state = State::for_read(&buf);
        assert_eq!(Int.decode(&mut state).unwrap(), 42);
        assert_eq!(Int.decode(&mut state).unwrap(), -4200);
        assert!(state.is_at_end());
        assert_eq!(Int.decode(&mut state), Err(Error::OutOfBounds));
    }
}
