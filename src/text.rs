//! Text stored in encodings other than UTF-8
//!
//! A [`Charset`] maps a Rust string to the bytes kept on the wire. [`Text`]
//! prefixes those bytes with their length like [`Str`](crate::Str) does,
//! [`RawText`] takes the rest of the region like
//! [`RawString`](crate::RawString).
//!
//! Decoding borrows when the wire bytes already are the text (ASCII) and
//! allocates otherwise, so the value type is `Cow<'a, str>`.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;
use core::marker::PhantomData;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::state::State;
use crate::varint;

/// Conversion between text and its wire bytes
pub trait Charset {
    /// Number of bytes `text` takes on the wire
    fn byte_len(text: &str) -> Result<usize>;

    /// Fill `out`, which is exactly `byte_len(text)` bytes long
    fn write(text: &str, out: &mut [u8]) -> Result<()>;

    /// Turn wire bytes back into text
    fn read(bytes: &[u8]) -> Result<Cow<'_, str>>;
}

/// 7-bit ASCII, one byte per character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ascii;

impl Charset for Ascii {
    fn byte_len(text: &str) -> Result<usize> {
        if !text.is_ascii() {
            return Err(Error::InvalidText);
        }
        Ok(text.len())
    }

    fn write(text: &str, out: &mut [u8]) -> Result<()> {
        out.copy_from_slice(text.as_bytes());
        Ok(())
    }

    fn read(bytes: &[u8]) -> Result<Cow<'_, str>> {
        if !bytes.is_ascii() {
            return Err(Error::InvalidText);
        }
        core::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|_| Error::InvalidText)
    }
}

/// Hex digits in the value, the bytes they spell on the wire
///
/// Either case is accepted when writing; decoding yields lowercase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hex;

impl Charset for Hex {
    fn byte_len(text: &str) -> Result<usize> {
        if text.len() % 2 != 0 {
            return Err(Error::InvalidText);
        }
        Ok(text.len() / 2)
    }

    fn write(text: &str, out: &mut [u8]) -> Result<()> {
        hex::decode_to_slice(text, out).map_err(|_| Error::InvalidText)
    }

    fn read(bytes: &[u8]) -> Result<Cow<'_, str>> {
        Ok(Cow::Owned(hex::encode(bytes)))
    }
}

/// Padded standard base64 in the value, the decoded bytes on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Base64;

impl Charset for Base64 {
    fn byte_len(text: &str) -> Result<usize> {
        if text.len() % 4 != 0 {
            return Err(Error::InvalidText);
        }
        let padding = text.bytes().rev().take(2).take_while(|&b| b == b'=').count();
        Ok(text.len() / 4 * 3 - padding)
    }

    fn write(text: &str, out: &mut [u8]) -> Result<()> {
        let bytes = STANDARD.decode(text).map_err(|_| Error::InvalidText)?;
        if bytes.len() != out.len() {
            return Err(Error::InvalidText);
        }
        out.copy_from_slice(&bytes);
        Ok(())
    }

    fn read(bytes: &[u8]) -> Result<Cow<'_, str>> {
        Ok(Cow::Owned(STANDARD.encode(bytes)))
    }
}

/// UTF-16 code units, little-endian
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf16Le;

impl Charset for Utf16Le {
    fn byte_len(text: &str) -> Result<usize> {
        text.encode_utf16()
            .count()
            .checked_mul(2)
            .ok_or(Error::Overflow)
    }

    fn write(text: &str, out: &mut [u8]) -> Result<()> {
        for (slot, unit) in out.chunks_exact_mut(2).zip(text.encode_utf16()) {
            slot.copy_from_slice(&unit.to_le_bytes());
        }
        Ok(())
    }

    fn read(bytes: &[u8]) -> Result<Cow<'_, str>> {
        if bytes.len() % 2 != 0 {
            return Err(Error::InvalidText);
        }
        let units = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
        char::decode_utf16(units)
            .collect::<core::result::Result<String, _>>()
            .map(Cow::Owned)
            .map_err(|_| Error::InvalidText)
    }
}

/// Length-prefixed text in charset `C`; the prefix is the byte length
pub struct Text<C> {
    _charset: PhantomData<fn() -> C>,
}

/// Text with no length prefix, filling the rest of the region
pub struct RawText<C> {
    _charset: PhantomData<fn() -> C>,
}

/// Length-prefixed ASCII
pub type AsciiStr = Text<Ascii>;
/// Length-prefixed hex string
pub type HexStr = Text<Hex>;
/// Length-prefixed base64 string
pub type Base64Str = Text<Base64>;
/// Length-prefixed UTF-16LE
pub type Utf16Str = Text<Utf16Le>;
/// Another name for [`Utf16Str`]
pub type Ucs2Str = Utf16Str;

/// ASCII filling the rest of the region
pub type RawAscii = RawText<Ascii>;
/// Hex string filling the rest of the region
pub type RawHex = RawText<Hex>;
/// Base64 string filling the rest of the region
pub type RawBase64 = RawText<Base64>;
/// UTF-16LE filling the rest of the region
pub type RawUtf16 = RawText<Utf16Le>;
/// Another name for [`RawUtf16`]
pub type RawUcs2 = RawUtf16;

macro_rules! text_codec_common {
    ($name:ident) => {
        impl<C> $name<C> {
            /// Create the codec
            #[inline]
            pub const fn new() -> Self {
                Self {
                    _charset: PhantomData,
                }
            }
        }

        impl<C> Default for $name<C> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<C> Clone for $name<C> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<C> Copy for $name<C> {}

        impl<C> fmt::Debug for $name<C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}<{}>", stringify!($name), core::any::type_name::<C>())
            }
        }
    };
}

text_codec_common!(Text);
text_codec_common!(RawText);

impl<C: Charset> Codec for Text<C> {
    type Value<'a> = Cow<'a, str>;

    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        let len = C::byte_len(value)?;
        varint::preencode_usize(state, len)?;
        state.add(len)
    }

    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        let len = C::byte_len(value)?;
        varint::encode_usize(state, len)?;
        C::write(value, state.reserve(len)?)
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        let len = varint::decode_usize(state)?;
        C::read(state.take(len)?).inspect_err(|_| {
            tracing::debug!(len, "wire bytes are not valid text for this charset");
        })
    }
}

impl<C: Charset> Codec for RawText<C> {
    type Value<'a> = Cow<'a, str>;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.add(C::byte_len(value)?)
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        let len = C::byte_len(value)?;
        C::write(value, state.reserve(len)?)
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        C::read(state.take_rest()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};

    fn text(value: &str) -> Cow<'_, str> {
        Cow::Borrowed(value)
    }

    #[test]
    fn test_ascii() {
        let encoded = encode(&AsciiStr::new(), &text("hi")).unwrap();
        assert_eq!(encoded, [0x02, b'h', b'i']);

        let decoded = decode(&AsciiStr::new(), &encoded).unwrap();
        assert!(matches!(decoded, Cow::Borrowed("hi")));

        assert_eq!(encode(&AsciiStr::new(), &text("høst")), Err(Error::InvalidText));
        assert_eq!(decode(&AsciiStr::new(), &[0x01, 0xe5]), Err(Error::InvalidText));
    }

    #[test]
    fn test_hex() {
        let encoded = encode(&HexStr::new(), &text("DEADbeef")).unwrap();
        assert_eq!(encoded, [0x04, 0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode(&HexStr::new(), &encoded).unwrap(), "deadbeef");

        assert_eq!(encode(&HexStr::new(), &text("abc")), Err(Error::InvalidText));
        assert_eq!(encode(&HexStr::new(), &text("zz")), Err(Error::InvalidText));
    }

    #[test]
    fn test_base64() {
        let encoded = encode(&Base64Str::new(), &text("aGk=")).unwrap();
        assert_eq!(encoded, [0x02, b'h', b'i']);
        assert_eq!(decode(&Base64Str::new(), &encoded).unwrap(), "aGk=");

        let encoded = encode(&Base64Str::new(), &text("aGVsbG8h")).unwrap();
        assert_eq!(&encoded[1..], b"hello!");

        assert_eq!(encode(&Base64Str::new(), &text("aGk")), Err(Error::InvalidText));
        assert_eq!(encode(&Base64Str::new(), &text("a*k=")), Err(Error::InvalidText));
    }

    #[test]
    fn test_utf16le() {
        let encoded = encode(&Utf16Str::new(), &text("hi")).unwrap();
        assert_eq!(encoded, [0x04, b'h', 0, b'i', 0]);

        // Outside the BMP: one surrogate pair, four bytes.
        let encoded = encode(&Ucs2Str::new(), &text("🌾")).unwrap();
        assert_eq!(encoded.len(), 5);
        assert_eq!(decode(&Ucs2Str::new(), &encoded).unwrap(), "🌾");

        assert_eq!(decode(&Utf16Str::new(), &[0x03, b'h', 0, b'i']), Err(Error::InvalidText));
        // Lone high surrogate.
        assert_eq!(decode(&Utf16Str::new(), &[0x02, 0x3c, 0xd8]), Err(Error::InvalidText));
    }

    #[test]
    fn test_raw_text_fills_region() {
        assert_eq!(encode(&RawHex::new(), &text("0102")).unwrap(), [1, 2]);
        assert_eq!(decode(&RawHex::new(), &[1, 2]).unwrap(), "0102");
        assert_eq!(decode(&RawBase64::new(), b"hi").unwrap(), "aGk=");
        assert_eq!(decode(&RawUcs2::new(), &[b'o', 0, b'k', 0]).unwrap(), "ok");

        let data = b"xoky";
        let mut state = State::with_region(data, 1, 3).unwrap();
        assert_eq!(RawAscii::new().decode(&mut state).unwrap(), "ok");
        assert!(state.is_at_end());
    }

    #[test]
    fn test_measure_matches_write() {
        let values = ["", "a", "høsten 🌾", "abcdefghijklmnopqrstuvwxyz"];
        for value in values {
            let mut state = State::new();
            Utf16Str::new().preencode(&mut state, &text(value)).unwrap();
            let encoded = encode(&Utf16Str::new(), &text(value)).unwrap();
            assert_eq!(state.end, encoded.len());
            assert_eq!(decode(&Utf16Str::new(), &encoded).unwrap(), value);
        }
        for value in ["", "Zg==", "Zm8=", "Zm9v"] {
            let mut state = State::new();
            Base64Str::new().preencode(&mut state, &text(value)).unwrap();
            let encoded = encode(&Base64Str::new(), &text(value)).unwrap();
            assert_eq!(state.end, encoded.len());
            assert_eq!(decode(&Base64Str::new(), &encoded).unwrap(), value);
        }
    }
}
