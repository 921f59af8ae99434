//! Byte block and text codecs
//!
//! Decoded values borrow from the decode buffer; copy them out with
//! `to_vec`/`to_owned` when they must outlive it.

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::state::State;
use crate::varint;

/// All remaining bytes of the region, without a length prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Raw;

impl Codec for Raw {
    type Value<'a> = &'a [u8];

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.add(value.len())
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.put(value)
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        state.take_rest()
    }
}

/// UTF-8 text filling the rest of the region, without a length prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawString;

impl Codec for RawString {
    type Value<'a> = &'a str;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.add(value.len())
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.put(value.as_bytes())
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        core::str::from_utf8(state.take_rest()?).map_err(|_| Error::OutOfBounds)
    }
}

/// Length-prefixed bytes
///
/// A zero length means "absent", so the value is an `Option`: `None` is the
/// single byte `0`, and an empty-but-present buffer cannot be represented.
/// `Some(b"")` is written exactly like `None` and decodes as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buffer;

impl Codec for Buffer {
    type Value<'a> = Option<&'a [u8]>;

    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        match value {
            Some(bytes) if !bytes.is_empty() => {
                varint::preencode_usize(state, bytes.len())?;
                state.add(bytes.len())
            }
            _ => state.add(1),
        }
    }

    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        match value {
            Some(bytes) if !bytes.is_empty() => {
                varint::encode_usize(state, bytes.len())?;
                state.put(bytes)
            }
            _ => state.put_u8(0),
        }
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        let len = varint::decode_usize(state)?;
        if len == 0 {
            return Ok(None);
        }
        state.take(len).map(Some)
    }
}

/// Length-prefixed UTF-8 text; the prefix is the byte length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Str;

impl Codec for Str {
    type Value<'a> = &'a str;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        varint::preencode_usize(state, value.len())?;
        state.add(value.len())
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        varint::encode_usize(state, value.len())?;
        state.put(value.as_bytes())
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        let len = varint::decode_usize(state)?;
        let bytes = state.take(len)?;
        // A cut multi-byte sequence would shift every later field.
        core::str::from_utf8(bytes).map_err(|_| Error::OutOfBounds)
    }
}

/// Bytes that may be handed over as UTF-8 text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesOrText<'a> {
    /// Raw bytes
    Bytes(&'a [u8]),
    /// Text, written as its UTF-8 bytes
    Text(&'a str),
}

impl<'a> BytesOrText<'a> {
    /// The bytes that go on the wire
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            BytesOrText::Bytes(bytes) => bytes,
            BytesOrText::Text(text) => text.as_bytes(),
        }
    }
}

/// [`Buffer`] that also takes text when encoding; always decodes as bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binary;

impl Codec for Binary {
    type Value<'a> = Option<BytesOrText<'a>>;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        Buffer.preencode(state, &value.map(|v| v.as_bytes()))
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        Buffer.encode(state, &value.map(|v| v.as_bytes()))
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        Ok(Buffer.decode(state)?.map(BytesOrText::Bytes))
    }
}

/// [`Raw`] that also takes text when encoding; always decodes as bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawBinary;

impl Codec for RawBinary {
    type Value<'a> = BytesOrText<'a>;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.add(value.as_bytes().len())
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.put(value.as_bytes())
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        state.take_rest().map(BytesOrText::Bytes)
    }
}

/// Takes no bytes at all; accepts and yields `()`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nothing;

impl Codec for Nothing {
    type Value<'a> = ();

    #[inline]
    fn preencode(&self, _state: &mut State<'_>, _value: &Self::Value<'_>) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn encode(&self, _state: &mut State<'_>, _value: &Self::Value<'_>) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn decode<'a>(&self, _state: &mut State<'a>) -> Result<Self::Value<'a>> {
        Ok(())
    }
}

/// Block of exactly `len` bytes, no prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixed {
    len: usize,
}

impl Fixed {
    /// Create a codec for blocks of `len` bytes
    #[inline]
    pub const fn new(len: usize) -> Self {
        Self { len }
    }

    /// Block size in bytes
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-sized block
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Codec for Fixed {
    type Value<'a> = &'a [u8];

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        if value.len() != self.len {
            return Err(Error::OutOfBounds);
        }
        state.add(self.len)
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        if value.len() != self.len {
            return Err(Error::OutOfBounds);
        }
        state.put(value)
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        state.take(self.len)
    }
}

/// Block of exactly `N` bytes as a typed array reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedArray<const N: usize>;

/// 32-byte block, e.g. a hash or public key
pub type Fixed32 = FixedArray<32>;

/// 64-byte block, e.g. a signature
pub type Fixed64 = FixedArray<64>;

impl<const N: usize> Codec for FixedArray<N> {
    type Value<'a> = &'a [u8; N];

    #[inline]
    fn preencode(&self, state: &mut State<'_>, _value: &Self::Value<'_>) -> Result<()> {
        state.add(N)
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.put(&value[..])
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        <&[u8; N]>::try_from(state.take(N)?).map_err(|_| Error::OutOfBounds)
    }
}
