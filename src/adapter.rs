//! Shims that let foreign encoders take part in a [`Codec`] sequence
//!
//! Two shapes are supported: whole-buffer serializers ([`BufferCodec`]),
//! which only know how to turn a value into a fresh byte vector and back,
//! and offset-based encoders ([`AbstractEncoding`]), which report their
//! size up front and read or write in place.

use alloc::vec::Vec;
use core::cell::RefCell;

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::state::State;

/// A serializer that produces a standalone byte vector per value
pub trait BufferCodec {
    /// The value type
    type Item;

    /// Serialize `item` into a new buffer
    fn to_bytes(&self, item: &Self::Item) -> Vec<u8>;

    /// Parse a value from exactly `bytes`
    fn from_bytes(&self, bytes: &[u8]) -> Result<Self::Item>;
}

/// An encoder that knows its size and writes into a caller-provided slice
pub trait AbstractEncoding {
    /// The value type
    type Item;

    /// Bytes `item` will occupy
    fn encoding_length(&self, item: &Self::Item) -> usize;

    /// Write `item` at the start of `buf`, returning the bytes written
    fn encode_at(&self, item: &Self::Item, buf: &mut [u8]) -> Result<usize>;

    /// Read a value from the start of `buf`, returning it and the bytes read
    fn decode_at(&self, buf: &[u8]) -> Result<(Self::Item, usize)>;
}

/// [`Codec`] over a [`BufferCodec`]
///
/// A serializer of this shape cannot measure without serializing, so
/// `preencode` keeps the bytes it produced and `encode` reuses them when it
/// is handed the same value (by address). The value occupies the rest of
/// the region when decoding, so it belongs last in a message.
///
/// Mutating the value in place between `preencode` and `encode` is not
/// detected.
#[derive(Debug)]
pub struct FromBuffer<E> {
    inner: E,
    cache: RefCell<Option<(usize, Vec<u8>)>>,
}

impl<E> FromBuffer<E> {
    /// Wrap `inner`
    pub const fn new(inner: E) -> Self {
        Self {
            inner,
            cache: RefCell::new(None),
        }
    }

    /// The wrapped serializer
    pub fn inner(&self) -> &E {
        &self.inner
    }
}

#[inline]
fn address<T>(value: &T) -> usize {
    value as *const T as usize
}

impl<E: BufferCodec> Codec for FromBuffer<E> {
    type Value<'a> = E::Item;

    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        let bytes = self.inner.to_bytes(value);
        state.add(bytes.len())?;
        *self.cache.borrow_mut() = Some((address(value), bytes));
        Ok(())
    }

    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        let cached = self.cache.borrow_mut().take();
        match cached {
            Some((addr, bytes)) if addr == address(value) => state.put(&bytes),
            _ => state.put(&self.inner.to_bytes(value)),
        }
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        self.inner.from_bytes(state.take_rest()?)
    }
}

/// [`Codec`] over an [`AbstractEncoding`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FromAbstract<E> {
    inner: E,
}

impl<E> FromAbstract<E> {
    /// Wrap `inner`
    pub const fn new(inner: E) -> Self {
        Self { inner }
    }

    /// The wrapped encoder
    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: AbstractEncoding> Codec for FromAbstract<E> {
    type Value<'a> = E::Item;

    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.add(self.inner.encoding_length(value))
    }

    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        let len = self.inner.encoding_length(value);
        let written = self.inner.encode_at(value, state.reserve(len)?)?;
        if written != len {
            tracing::debug!(len, written, "foreign encoder wrote a different length");
            return Err(Error::Foreign);
        }
        Ok(())
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        let (item, used) = self.inner.decode_at(state.peek_rest()?)?;
        state.skip(used)?;
        Ok(item)
    }
}
