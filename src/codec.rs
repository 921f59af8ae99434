//! The three-operation codec contract and the top-level entry points

use alloc::vec;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::state::State;

/// Something that can measure, write and read one kind of value
///
/// `preencode` and `encode` must account for exactly the same number of
/// bytes for the same value; every value written after a mismatch lands at
/// the wrong offset.
pub trait Codec {
    /// The value type; decoded values may borrow from the decode buffer
    type Value<'a>;

    /// Grow `state.end` by the bytes `value` will occupy
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()>;

    /// Write `value` at the cursor and advance past it
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()>;

    /// Read a value at the cursor and advance past it
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>>;
}

impl<C: Codec + ?Sized> Codec for &C {
    type Value<'a> = C::Value<'a>;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        (**self).preencode(state, value)
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        (**self).encode(state, value)
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        (**self).decode(state)
    }
}

/// Measure `value`, allocate exactly that many bytes and write it
pub fn encode<C: Codec + ?Sized>(codec: &C, value: &C::Value<'_>) -> Result<Vec<u8>> {
    let mut state = State::new();
    codec.preencode(&mut state, value)?;

    let mut buf = vec![0u8; state.end];
    let mut state = State::for_write(&mut buf);
    codec.encode(&mut state, value)?;
    debug_assert_eq!(state.start, state.end, "encode wrote fewer bytes than measured");

    Ok(buf)
}

/// Encode into a caller-provided buffer
///
/// Returns the number of bytes written, or `Error::OutOfBounds` if `buf` is
/// smaller than the measured size.
pub fn encode_into<C: Codec + ?Sized>(
    codec: &C,
    value: &C::Value<'_>,
    buf: &mut [u8],
) -> Result<usize> {
    let mut state = State::new();
    codec.preencode(&mut state, value)?;

    let len = state.end;
    let out = buf.get_mut(..len).ok_or(Error::OutOfBounds)?;
    let mut state = State::for_write(out);
    codec.encode(&mut state, value)?;

    Ok(len)
}

/// Decode one value from the start of `buf`
///
/// Trailing bytes are not an error; use [`decode_with_len`] to check that
/// the whole buffer was consumed.
pub fn decode<'a, C: Codec + ?Sized>(codec: &C, buf: &'a [u8]) -> Result<C::Value<'a>> {
    decode_with_len(codec, buf).map(|(value, _)| value)
}

/// Like [`decode`] but also return the number of bytes consumed
pub fn decode_with_len<'a, C: Codec + ?Sized>(
    codec: &C,
    buf: &'a [u8],
) -> Result<(C::Value<'a>, usize)> {
    let mut state = State::for_read(buf);
    let value = codec.decode(&mut state)?;
    Ok((value, state.start))
}
