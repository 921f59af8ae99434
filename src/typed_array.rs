//! Typed numeric arrays
//!
//! Layout is a varint element count followed by the elements back to back,
//! each little-endian. There is no padding, so elements in the encoded
//! buffer may sit at any address. Decoding borrows the buffer in place when
//! the host is little-endian and the data happens to be aligned for `T`;
//! otherwise it copies into an owned, aligned vector. [`RawTypedArray`]
//! drops the count and fills the rest of the region.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::state::State;
use crate::varint;

/// Byte order of the target, fixed at compile time
pub const HOST_BIG_ENDIAN: bool = cfg!(target_endian = "big");

mod sealed {
    pub trait Sealed {}
}

/// A primitive that can be an element of a [`TypedArray`]
pub trait Element:
    FromBytes + IntoBytes + KnownLayout + Immutable + Copy + sealed::Sealed + 'static
{
    /// Encoded width in bytes
    const WIDTH: usize;

    /// Write the little-endian bytes into `out`, which is exactly `WIDTH` long
    fn write_le(self, out: &mut [u8]);

    /// Read from exactly `WIDTH` little-endian bytes
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! element {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const WIDTH: usize = core::mem::size_of::<$ty>();

                #[inline]
                fn write_le(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn read_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

element!(u8, u16, u32, i8, i16, i32, f32, f64);

/// Length-prefixed array of `T`, decoded zero-copy when possible
pub struct TypedArray<T> {
    _marker: PhantomData<fn() -> T>,
}

/// Array of `u8`
pub type Uint8Array = TypedArray<u8>;
/// Array of `u16`
pub type Uint16Array = TypedArray<u16>;
/// Array of `u32`
pub type Uint32Array = TypedArray<u32>;
/// Array of `i8`
pub type Int8Array = TypedArray<i8>;
/// Array of `i16`
pub type Int16Array = TypedArray<i16>;
/// Array of `i32`
pub type Int32Array = TypedArray<i32>;
/// Array of `f32`
pub type Float32Array = TypedArray<f32>;
/// Array of `f64`
pub type Float64Array = TypedArray<f64>;

impl<T> TypedArray<T> {
    /// Create the codec
    #[inline]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedArray<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedArray<T> {}

impl<T> fmt::Debug for TypedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedArray<{}>", core::any::type_name::<T>())
    }
}

fn preencode_elements<T: Element>(state: &mut State<'_>, items: &[T]) -> Result<()> {
    state.add(items.len().checked_mul(T::WIDTH).ok_or(Error::Overflow)?)
}

fn encode_elements<T: Element>(state: &mut State<'_>, items: &[T]) -> Result<()> {
    if HOST_BIG_ENDIAN {
        let byte_len = items.len().checked_mul(T::WIDTH).ok_or(Error::Overflow)?;
        let out = state.reserve(byte_len)?;
        for (slot, item) in out.chunks_exact_mut(T::WIDTH).zip(items.iter()) {
            item.write_le(slot);
        }
        Ok(())
    } else {
        state.put(items.as_bytes())
    }
}

/// View `bytes` as elements, borrowing when the layout allows it
fn decode_elements<T: Element>(bytes: &[u8]) -> Cow<'_, [T]> {
    if !HOST_BIG_ENDIAN {
        if let Ok(items) = <[T]>::ref_from_bytes(bytes) {
            return Cow::Borrowed(items);
        }
    }

    tracing::trace!(len = bytes.len(), width = T::WIDTH, "copying typed array");
    let items: Vec<T> = bytes.chunks_exact(T::WIDTH).map(T::read_le).collect();
    Cow::Owned(items)
}

impl<T: Element> Codec for TypedArray<T> {
    type Value<'a> = Cow<'a, [T]>;

    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        varint::preencode_usize(state, value.len())?;
        preencode_elements(state, value)
    }

    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        varint::encode_usize(state, value.len())?;
        encode_elements(state, value)
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        let count = varint::decode_usize(state)?;
        let byte_len = count.checked_mul(T::WIDTH).ok_or(Error::OutOfBounds)?;
        Ok(decode_elements(state.take(byte_len)?))
    }
}

/// Elements of `T` filling the rest of the region, no count prefix
///
/// A region whose length is not a whole number of elements fails with
/// [`Error::OutOfBounds`].
pub struct RawTypedArray<T> {
    _marker: PhantomData<fn() -> T>,
}

/// Unprefixed array of `u8`
pub type RawUint8Array = RawTypedArray<u8>;
/// Unprefixed array of `u16`
pub type RawUint16Array = RawTypedArray<u16>;
/// Unprefixed array of `u32`
pub type RawUint32Array = RawTypedArray<u32>;
/// Unprefixed array of `i8`
pub type RawInt8Array = RawTypedArray<i8>;
/// Unprefixed array of `i16`
pub type RawInt16Array = RawTypedArray<i16>;
/// Unprefixed array of `i32`
pub type RawInt32Array = RawTypedArray<i32>;
/// Unprefixed array of `f32`
pub type RawFloat32Array = RawTypedArray<f32>;
/// Unprefixed array of `f64`
pub type RawFloat64Array = RawTypedArray<f64>;

impl<T> RawTypedArray<T> {
    /// Create the codec
    #[inline]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for RawTypedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RawTypedArray<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawTypedArray<T> {}

impl<T> fmt::Debug for RawTypedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawTypedArray<{}>", core::any::type_name::<T>())
    }
}

impl<T: Element> Codec for RawTypedArray<T> {
    type Value<'a> = Cow<'a, [T]>;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        preencode_elements(state, value)
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        encode_elements(state, value)
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        if state.remaining() % T::WIDTH != 0 {
            return Err(Error::OutOfBounds);
        }
        Ok(decode_elements(state.take_rest()?))
    }
}
