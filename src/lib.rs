//! compactenc: compact binary encoding built from composable codecs
//!
//! Every value type is described by a [`Codec`] with three operations that
//! share one cursor [`State`]:
//!
//! 1. `preencode` measures how many bytes the value needs,
//! 2. `encode` writes it into a buffer of exactly that size,
//! 3. `decode` reads it back, borrowing from the input where it can.
//!
//! A message is just a fixed sequence of codecs run in the same order in
//! all three phases. Nothing on the wire is self-describing: there are no
//! field tags or type markers, so both sides must agree on the sequence.
//!
//! # Wire Format
//!
//! ```text
//! uint (compact)   0x00..=0xfc | 0xfd u16 | 0xfe u32 | 0xff u64     (LE)
//! int              zigzag(n) as uint
//! uintN / intN     N/8 bytes little-endian, intN zigzag folded
//! float32/64       IEEE-754 little-endian
//! buffer / string  uint byte length + bytes (length 0 = absent buffer)
//! ascii/hex/...    uint byte length + the bytes the text stands for
//! array            uint count + elements
//! typed array      uint count + elements little-endian, no padding
//! lexint           order-preserving, byte-wise comparable
//! raw variants     no length or count prefix, fill the rest of the region
//! ```
//!
//! # Features
//!
//! - Exact-size allocation: measure first, allocate once
//! - Zero-copy decoding of bytes, strings and aligned typed arrays
//! - Order-preserving integer and float encodings for sortable keys
//! - ASCII, hex, base64 and UTF-16LE text codecs
//! - Adapters for foreign serializers
//! - `no_std` support with `alloc`
//!
//! # Example
//!
//! ```rust
//! use compactenc::{Codec, State, Str, Uint, Array, Bool};
//!
//! let flags = Array::new(Bool);
//! let name = "høst";
//! let id = 4200u64;
//! let bits = vec![true, false, true];
//!
//! // Measure every field against one state.
//! let mut state = State::new();
//! Uint.preencode(&mut state, &id)?;
//! Str.preencode(&mut state, &name)?;
//! flags.preencode(&mut state, &bits)?;
//!
//! // Write them in the same order.
//! let mut buf = vec![0u8; state.end];
//! let mut state = State::for_write(&mut buf);
//! Uint.encode(&mut state, &id)?;
//! Str.encode(&mut state, &name)?;
//! flags.encode(&mut state, &bits)?;
//!
//! // Read them back.
//! let mut state = State::for_read(&buf);
//! assert_eq!(Uint.decode(&mut state)?, 4200);
//! assert_eq!(Str.decode(&mut state)?, "høst");
//! assert_eq!(flags.decode(&mut state)?, [true, false, true]);
//! assert!(state.is_at_end());
//! # Ok::<(), compactenc::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod adapter;
pub mod array;
pub mod bytes;
pub mod codec;
pub mod error;
pub mod lexint;
pub mod numeric;
pub mod state;
pub mod text;
pub mod typed_array;
pub mod varint;
pub mod zigzag;

// Re-export main types
pub use adapter::{AbstractEncoding, BufferCodec, FromAbstract, FromBuffer};
pub use array::{Array, RawArray, MAX_ARRAY_LEN};
pub use bytes::{
    Binary, Buffer, BytesOrText, Fixed, Fixed32, Fixed64, FixedArray, Nothing, Raw, RawBinary,
    RawString, Str,
};
pub use codec::{decode, decode_with_len, encode, encode_into, Codec};
pub use error::{Error, Result};
pub use lexint::{LexFloat, Lexint, SignedLexFloat, SignedLexint};
pub use numeric::{
    Bool, Float32, Float64, Int16, Int24, Int32, Int40, Int48, Int56, Int64, Int8, Uint16,
    Uint24, Uint32, Uint40, Uint48, Uint56, Uint64, Uint8,
};
pub use state::State;
pub use text::{
    Ascii, AsciiStr, Base64, Base64Str, Charset, Hex, HexStr, RawAscii, RawBase64, RawHex,
    RawText, RawUcs2, RawUtf16, Text, Ucs2Str, Utf16Le, Utf16Str,
};
pub use typed_array::{
    Element, Float32Array, Float64Array, Int16Array, Int32Array, Int8Array, RawFloat32Array,
    RawFloat64Array, RawInt16Array, RawInt32Array, RawInt8Array, RawTypedArray, RawUint16Array,
    RawUint32Array, RawUint8Array, TypedArray, Uint16Array, Uint32Array, Uint8Array,
};
pub use varint::Uint;
pub use zigzag::Int;
