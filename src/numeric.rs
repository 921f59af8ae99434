//! Fixed-width numeric codecs
//!
//! Every value here occupies a constant number of bytes, little-endian on
//! the wire regardless of host byte order, with no length prefix. Signed
//! variants are zigzag folded onto the unsigned codec of the same width.

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::state::State;
use crate::zigzag::{zigzag_decode, zigzag_encode};

#[inline]
fn check_width(value: u64, width: usize) -> Result<()> {
    if width < 8 && value >> (width * 8) != 0 {
        return Err(Error::Overflow);
    }
    Ok(())
}

#[inline]
fn preencode_uint(state: &mut State<'_>, value: u64, width: usize) -> Result<()> {
    check_width(value, width)?;
    state.add(width)
}

#[inline]
fn encode_uint(state: &mut State<'_>, value: u64, width: usize) -> Result<()> {
    check_width(value, width)?;
    state.put(&value.to_le_bytes()[..width])
}

#[inline]
fn decode_uint(state: &mut State<'_>, width: usize) -> Result<u64> {
    let mut bytes = [0u8; 8];
    bytes[..width].copy_from_slice(state.take(width)?);
    Ok(u64::from_le_bytes(bytes))
}

macro_rules! fixed_uint {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $width:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $name {
            /// Encoded size in bytes
            pub const SIZE: usize = $width;
        }

        impl Codec for $name {
            type Value<'a> = $ty;

            #[inline]
            fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
                preencode_uint(state, *value as u64, Self::SIZE)
            }

            #[inline]
            fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
                encode_uint(state, *value as u64, Self::SIZE)
            }

            #[inline]
            fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
                Ok(decode_uint(state, Self::SIZE)? as $ty)
            }
        }
    };
}

macro_rules! fixed_int {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $width:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $name {
            /// Encoded size in bytes
            pub const SIZE: usize = $width;
        }

        impl Codec for $name {
            type Value<'a> = $ty;

            #[inline]
            fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
                preencode_uint(state, zigzag_encode(*value as i64), Self::SIZE)
            }

            #[inline]
            fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
                encode_uint(state, zigzag_encode(*value as i64), Self::SIZE)
            }

            #[inline]
            fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
                Ok(zigzag_decode(decode_uint(state, Self::SIZE)?) as $ty)
            }
        }
    };
}

fixed_uint!(
    /// Fixed 8-bit unsigned integer
    Uint8, u8, 1
);
fixed_uint!(
    /// Fixed 16-bit unsigned integer, useful for ports
    Uint16, u16, 2
);
fixed_uint!(
    /// Fixed 24-bit unsigned integer, useful for message framing
    Uint24, u32, 3
);
fixed_uint!(
    /// Fixed 32-bit unsigned integer
    Uint32, u32, 4
);
fixed_uint!(
    /// Fixed 40-bit unsigned integer
    Uint40, u64, 5
);
fixed_uint!(
    /// Fixed 48-bit unsigned integer
    Uint48, u64, 6
);
fixed_uint!(
    /// Fixed 56-bit unsigned integer
    Uint56, u64, 7
);
fixed_uint!(
    /// Fixed 64-bit unsigned integer
    Uint64, u64, 8
);

fixed_int!(
    /// Fixed 8-bit zigzag signed integer
    Int8, i8, 1
);
fixed_int!(
    /// Fixed 16-bit zigzag signed integer
    Int16, i16, 2
);
fixed_int!(
    /// Fixed 24-bit zigzag signed integer
    Int24, i32, 3
);
fixed_int!(
    /// Fixed 32-bit zigzag signed integer
    Int32, i32, 4
);
fixed_int!(
    /// Fixed 40-bit zigzag signed integer
    Int40, i64, 5
);
fixed_int!(
    /// Fixed 48-bit zigzag signed integer
    Int48, i64, 6
);
fixed_int!(
    /// Fixed 56-bit zigzag signed integer
    Int56, i64, 7
);
fixed_int!(
    /// Fixed 64-bit zigzag signed integer
    Int64, i64, 8
);

/// IEEE-754 binary32, little-endian
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Float32;

impl Codec for Float32 {
    type Value<'a> = f32;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, _value: &Self::Value<'_>) -> Result<()> {
        state.add(4)
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.put(&value.to_le_bytes())
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        Ok(f32::from_le_bytes(state.take_array()?))
    }
}

/// IEEE-754 binary64, little-endian
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Float64;

impl Codec for Float64 {
    type Value<'a> = f64;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, _value: &Self::Value<'_>) -> Result<()> {
        state.add(8)
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.put(&value.to_le_bytes())
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        Ok(f64::from_le_bytes(state.take_array()?))
    }
}

/// A boolean as a single byte, 1 or 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bool;

impl Codec for Bool {
    type Value<'a> = bool;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, _value: &Self::Value<'_>) -> Result<()> {
        state.add(1)
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.put_u8(u8::from(*value))
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        Ok(state.take_u8()? == 1)
    }
}
