//! Homogeneous arrays of any codec

use alloc::vec::Vec;

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::state::State;
use crate::varint;

/// Default ceiling on the element count accepted by [`Array`]
pub const MAX_ARRAY_LEN: usize = 1_048_576;

/// A varint element count followed by each element encoded with `C`
///
/// Counts above the limit are rejected with [`Error::ArrayTooLarge`] on
/// both sides, so anything this codec writes it can also read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Array<C> {
    item: C,
    limit: usize,
}

impl<C> Array<C> {
    /// Array of `item` with the default [`MAX_ARRAY_LEN`] ceiling
    #[inline]
    pub const fn new(item: C) -> Self {
        Self::with_limit(item, MAX_ARRAY_LEN)
    }

    /// Array of `item` accepting at most `limit` elements
    #[inline]
    pub const fn with_limit(item: C, limit: usize) -> Self {
        Self { item, limit }
    }

    /// The element count ceiling
    #[inline]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// The element codec
    #[inline]
    pub fn item(&self) -> &C {
        &self.item
    }

    #[inline]
    fn check_len(&self, len: usize) -> Result<()> {
        if len > self.limit {
            tracing::debug!(len, limit = self.limit, "array exceeds limit");
            return Err(Error::ArrayTooLarge);
        }
        Ok(())
    }
}

impl<C: Default> Default for Array<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: Codec> Codec for Array<C> {
    type Value<'a> = Vec<C::Value<'a>>;

    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        self.check_len(value.len())?;
        varint::preencode_usize(state, value.len())?;
        for item in value {
            self.item.preencode(state, item)?;
        }
        Ok(())
    }

    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        self.check_len(value.len())?;
        varint::encode_usize(state, value.len())?;
        for item in value {
            self.item.encode(state, item)?;
        }
        Ok(())
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        let len = varint::decode_usize(state)?;
        self.check_len(len)?;

        // Every element takes at least one byte; a count beyond that is a lie.
        let mut items = Vec::with_capacity(len.min(state.remaining()));
        for _ in 0..len {
            items.push(self.item.decode(state)?);
        }
        Ok(items)
    }
}

/// Elements encoded with `C` back to back, filling the rest of the region
///
/// There is no count: decoding reads elements until the region ends. The
/// same ceiling as [`Array`] applies, which also bounds elements that take
/// no bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawArray<C> {
    inner: Array<C>,
}

impl<C> RawArray<C> {
    /// Unprefixed array of `item` with the default [`MAX_ARRAY_LEN`] ceiling
    #[inline]
    pub const fn new(item: C) -> Self {
        Self::with_limit(item, MAX_ARRAY_LEN)
    }

    /// Unprefixed array of `item` accepting at most `limit` elements
    #[inline]
    pub const fn with_limit(item: C, limit: usize) -> Self {
        Self {
            inner: Array::with_limit(item, limit),
        }
    }

    /// The element count ceiling
    #[inline]
    pub const fn limit(&self) -> usize {
        self.inner.limit
    }
}

impl<C: Default> Default for RawArray<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: Codec> Codec for RawArray<C> {
    type Value<'a> = Vec<C::Value<'a>>;

    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        self.inner.check_len(value.len())?;
        for item in value {
            self.inner.item.preencode(state, item)?;
        }
        Ok(())
    }

    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        self.inner.check_len(value.len())?;
        for item in value {
            self.inner.item.encode(state, item)?;
        }
        Ok(())
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        let mut items = Vec::new();
        while !state.is_at_end() {
            self.inner.check_len(items.len() + 1)?;
            items.push(self.inner.item.decode(state)?);
        }
        Ok(items)
    }
}
