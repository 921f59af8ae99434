//! Lexicographic integers
//!
//! Encodings whose unsigned byte-wise order matches numeric order, for use
//! as sortable keys. Payloads are big-endian so the most significant byte
//! is compared first.
//!
//! ```text
//! n < 251              [n]
//! n < 507              [251, n - 251]
//! n < 2^16             [252] + u16 BE (n - 251)
//! n < 2^24             [253] + u24 BE (n - 251)
//! n < 2^32             [254] + u32 BE (n - 251)
//! otherwise            [255] + lexint(e) + u48 BE mantissa
//! ```
//!
//! The last tier stores `e = floor(log2 n) - 32` and the mantissa
//! `round(n / 2^(e - 11))`, a 44-bit number, so `n = mantissa * 2^(e - 11)`.
//! The exponent is a lexint itself and goes through the same tiers.
//!
//! Two value domains share this wire format. [`Lexint`] works on `u64`:
//! values below 2^44 round-trip exactly, and above that the low bits are
//! rounded away, which keeps order but may map neighbouring values to the
//! same bytes. [`LexFloat`] works on non-negative finite `f64` up to
//! `f64::MAX`, where the big tier keeps the top 44 of the 53 significand
//! bits.

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::state::State;

/// Values below this are stored in a single byte
pub const BASE: u64 = 251;

const TAG_U8: u8 = 251;
const TAG_U16: u8 = 252;
const TAG_U24: u8 = 253;
const TAG_U32: u8 = 254;
const TAG_BIG: u8 = 255;

const EXPONENT_BIAS: u32 = 32;
const MANTISSA_SHIFT: u64 = 11;
const MANTISSA_BYTES: usize = 6;
const MANTISSA_MAX: u64 = (1 << 44) - 1;

const SMALL_LIMIT: u64 = 1 << 32;

const F64_EXPONENT_BIAS: u64 = 1023;
const F64_SIGNIFICAND_BITS: u32 = 52;
const F64_MAX_EXPONENT: u64 = 1023;

/// What a value looks like on the wire before masking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Split {
    Small(u64),
    Big { exp: u64, mantissa: u64 },
}

impl Split {
    fn encoded_len(self) -> usize {
        match self {
            Split::Small(value) => small_len(value),
            Split::Big { exp, .. } => 1 + encoded_len(exp) + MANTISSA_BYTES,
        }
    }
}

#[inline]
fn small_len(value: u64) -> usize {
    if value < BASE {
        1
    } else if value < BASE + 256 {
        2
    } else if value < 1 << 16 {
        3
    } else if value < 1 << 24 {
        4
    } else {
        5
    }
}

fn split_int(value: u64) -> Split {
    if value < SMALL_LIMIT {
        return Split::Small(value);
    }
    let exp = u64::from(63 - value.leading_zeros() - EXPONENT_BIAS);
    Split::Big {
        exp,
        mantissa: mantissa(value, exp),
    }
}

fn mantissa(value: u64, exp: u64) -> u64 {
    if exp <= MANTISSA_SHIFT {
        return value << (MANTISSA_SHIFT - exp);
    }
    let shift = exp - MANTISSA_SHIFT;
    let rounded = (value >> shift) + ((value >> (shift - 1)) & 1);
    // A carry out of 44 bits would need the next exponent.
    rounded.min(MANTISSA_MAX)
}

/// Below 2^32 the fraction is dropped; above it the exponent and mantissa
/// come straight from the IEEE-754 bits.
fn split_float(value: f64) -> Result<Split> {
    if !value.is_finite() {
        return Err(Error::Overflow);
    }
    if value < 0.0 {
        return Err(Error::InvalidSign);
    }
    if value < SMALL_LIMIT as f64 {
        return Ok(Split::Small(value as u64));
    }

    let bits = value.to_bits();
    let biased = bits >> F64_SIGNIFICAND_BITS;
    let significand = (bits & ((1 << F64_SIGNIFICAND_BITS) - 1)) | (1 << F64_SIGNIFICAND_BITS);
    // 53 significand bits, the mantissa keeps the top 44.
    let shift = F64_SIGNIFICAND_BITS - 43;
    let rounded = (significand >> shift) + ((significand >> (shift - 1)) & 1);
    Ok(Split::Big {
        exp: biased - F64_EXPONENT_BIAS - u64::from(EXPONENT_BIAS),
        mantissa: rounded.min(MANTISSA_MAX),
    })
}

fn scale(mantissa: u64, exp: u64) -> Result<u64> {
    if exp <= MANTISSA_SHIFT {
        return Ok(mantissa >> (MANTISSA_SHIFT - exp));
    }
    let shift = exp - MANTISSA_SHIFT;
    if shift >= 64 || u64::from(mantissa.leading_zeros()) < shift {
        return Err(Error::Overflow);
    }
    Ok(mantissa << shift)
}

#[inline]
fn pow2(exp: i32) -> f64 {
    f64::from_bits(((exp + F64_EXPONENT_BIAS as i32) as u64) << F64_SIGNIFICAND_BITS)
}

fn scale_float(mantissa: u64, exp: u64) -> Result<f64> {
    if mantissa == 0 {
        return Ok(0.0);
    }
    if exp > F64_MAX_EXPONENT + MANTISSA_SHIFT {
        return Err(Error::Overflow);
    }
    let shift = exp as i32 - MANTISSA_SHIFT as i32;
    let top = 63 - mantissa.leading_zeros() as i32;
    if top + shift > F64_MAX_EXPONENT as i32 {
        return Err(Error::Overflow);
    }
    // At most 48 bits, so the conversion is exact.
    Ok(mantissa as f64 * pow2(shift))
}

#[inline]
fn put_masked(state: &mut State<'_>, bytes: &[u8], mask: u8) -> Result<()> {
    for &byte in bytes {
        state.put_u8(byte ^ mask)?;
    }
    Ok(())
}

#[inline]
fn take_masked<const N: usize>(state: &mut State<'_>, mask: u8) -> Result<[u8; N]> {
    let mut bytes = state.take_array::<N>()?;
    for byte in &mut bytes {
        *byte ^= mask;
    }
    Ok(bytes)
}

fn encode_small(state: &mut State<'_>, value: u64, mask: u8) -> Result<()> {
    if value < BASE {
        return state.put_u8(value as u8 ^ mask);
    }

    let rest = value - BASE;
    if value < BASE + 256 {
        put_masked(state, &[TAG_U8, rest as u8], mask)
    } else if value < 1 << 16 {
        state.put_u8(TAG_U16 ^ mask)?;
        put_masked(state, &(rest as u16).to_be_bytes(), mask)
    } else if value < 1 << 24 {
        state.put_u8(TAG_U24 ^ mask)?;
        put_masked(state, &(rest as u32).to_be_bytes()[1..], mask)
    } else {
        state.put_u8(TAG_U32 ^ mask)?;
        put_masked(state, &(rest as u32).to_be_bytes(), mask)
    }
}

fn encode_split(state: &mut State<'_>, split: Split, mask: u8) -> Result<()> {
    match split {
        Split::Small(value) => encode_small(state, value, mask),
        Split::Big { exp, mantissa } => {
            state.put_u8(TAG_BIG ^ mask)?;
            encode_masked(state, exp, mask)?;
            put_masked(state, &mantissa.to_be_bytes()[8 - MANTISSA_BYTES..], mask)
        }
    }
}

/// Number of bytes `value` occupies once encoded
#[inline]
pub fn encoded_len(value: u64) -> usize {
    split_int(value).encoded_len()
}

/// Measure a lexint
#[inline]
pub fn preencode(state: &mut State<'_>, value: u64) -> Result<()> {
    state.add(encoded_len(value))
}

/// Write a lexint with every byte XORed with `mask`
///
/// A mask of `0xff` produces the bit-inverted encoding, whose order is the
/// reverse of the plain one.
#[inline]
pub fn encode_masked(state: &mut State<'_>, value: u64, mask: u8) -> Result<()> {
    encode_split(state, split_int(value), mask)
}

/// Write a lexint
#[inline]
pub fn encode(state: &mut State<'_>, value: u64) -> Result<()> {
    encode_masked(state, value, 0)
}

/// Number of bytes the float `value` occupies once encoded
///
/// Fails with [`Error::InvalidSign`] for negative values and
/// [`Error::Overflow`] for NaN and infinities.
#[inline]
pub fn float_encoded_len(value: f64) -> Result<usize> {
    split_float(value).map(Split::encoded_len)
}

/// Write a float lexint with every byte XORed with `mask`
#[inline]
pub fn encode_float_masked(state: &mut State<'_>, value: f64, mask: u8) -> Result<()> {
    encode_split(state, split_float(value)?, mask)
}

/// Read a float lexint whose bytes were XORed with `mask`
///
/// Any valid encoding is accepted, including nested big exponents; values
/// beyond `f64::MAX` fail with [`Error::Overflow`].
pub fn decode_float_masked(state: &mut State<'_>, mask: u8) -> Result<f64> {
    let (value, exp) = decode_parts(state, mask)?;
    match exp {
        Some(exp) => scale_float(value, exp),
        None => Ok(value as f64),
    }
}

/// Read a lexint whose bytes were XORed with `mask`
///
/// Values that do not fit a `u64` fail with [`Error::Overflow`].
#[inline]
pub fn decode_masked(state: &mut State<'_>, mask: u8) -> Result<u64> {
    let (value, exp) = decode_parts(state, mask)?;
    match exp {
        Some(exp) => scale(value, exp),
        None => Ok(value),
    }
}

/// Read a lexint
#[inline]
pub fn decode(state: &mut State<'_>) -> Result<u64> {
    decode_masked(state, 0)
}

fn decode_small(state: &mut State<'_>, tag: u8, mask: u8) -> Result<u64> {
    let value = match tag {
        TAG_U8 => u64::from(state.take_u8()? ^ mask) + BASE,
        TAG_U16 => u64::from(u16::from_be_bytes(take_masked(state, mask)?)) + BASE,
        TAG_U24 => {
            let [hi, mid, lo] = take_masked::<3>(state, mask)?;
            u64::from(u32::from_be_bytes([0, hi, mid, lo])) + BASE
        }
        TAG_U32 => u64::from(u32::from_be_bytes(take_masked(state, mask)?)) + BASE,
        _ => u64::from(tag),
    };
    Ok(value)
}

fn take_mantissa(state: &mut State<'_>, mask: u8) -> Result<u64> {
    let mantissa = take_masked::<MANTISSA_BYTES>(state, mask)?;
    let mut bytes = [0u8; 8];
    bytes[8 - MANTISSA_BYTES..].copy_from_slice(&mantissa);
    Ok(u64::from_be_bytes(bytes))
}

/// Read a lexint as `(value, exponent)`: a small tier has no exponent, a
/// big tier stands for `value * 2^(exponent - 11)`.
///
/// Exponents go through the full tiering again, so one value may nest big
/// tiers inside each other. The nesting is unwound in a loop: every level
/// costs one tag byte up front and one mantissa behind the innermost value.
fn decode_parts(state: &mut State<'_>, mask: u8) -> Result<(u64, Option<u64>)> {
    let mut depth = 0usize;
    let mut tag = state.take_u8()? ^ mask;
    while tag == TAG_BIG {
        depth += 1;
        tag = state.take_u8()? ^ mask;
    }

    let mut value = decode_small(state, tag, mask)?;
    if depth == 0 {
        return Ok((value, None));
    }
    // Every level but the outermost is itself an exponent.
    for _ in 1..depth {
        let mantissa = take_mantissa(state, mask)?;
        value = scale(mantissa, value)?;
    }
    Ok((take_mantissa(state, mask)?, Some(value)))
}

/// Order-preserving unsigned integer codec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lexint;

impl Codec for Lexint {
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

const SIGN_NEGATIVE: u8 = 0;
const SIGN_POSITIVE: u8 = 1;

/// Order-preserving signed integer codec
///
/// Wire format: a sign byte (`0` negative, `1` zero or positive) followed
/// by the lexint of the magnitude. For negative values every magnitude byte
/// is bit-inverted so larger magnitudes sort first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignedLexint;

impl Codec for SignedLexint {
    type Value<'a> = i64;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.add(1)?;
        preencode(state, value.unsigned_abs())
    }

    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        if *value < 0 {
            state.put_u8(SIGN_NEGATIVE)?;
            encode_masked(state, value.unsigned_abs(), 0xff)
        } else {
            state.put_u8(SIGN_POSITIVE)?;
            encode_masked(state, value.unsigned_abs(), 0)
        }
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        if take_sign(state)? {
            let magnitude = decode_masked(state, 0xff)?;
            if magnitude <= i64::MAX as u64 {
                Ok(-(magnitude as i64))
            } else if magnitude == i64::MIN.unsigned_abs() {
                Ok(i64::MIN)
            } else {
                Err(Error::Overflow)
            }
        } else {
            i64::try_from(decode_masked(state, 0)?).map_err(|_| Error::Overflow)
        }
    }
}

/// Read the sign byte, returning true for negative
fn take_sign(state: &mut State<'_>) -> Result<bool> {
    match state.take_u8()? {
        SIGN_NEGATIVE => Ok(true),
        SIGN_POSITIVE => Ok(false),
        sign => {
            tracing::debug!(sign, "rejecting signed lexint with invalid sign byte");
            Err(Error::InvalidSign)
        }
    }
}

/// Order-preserving codec for non-negative finite `f64`
///
/// Shares the [`Lexint`] wire format. Whole numbers below 2^32 are stored
/// in the small tiers and any fraction is dropped. Larger values keep 44
/// significant bits, enough for distinct encodings of values whose
/// relative difference exceeds about 2^-43. Negative values fail with
/// [`Error::InvalidSign`], NaN and infinities with [`Error::Overflow`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexFloat;

impl Codec for LexFloat {
    type Value<'a> = f64;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.add(float_encoded_len(*value)?)
    }

    #[inline]
    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        encode_float_masked(state, *value, 0)
    }

    #[inline]
    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        decode_float_masked(state, 0)
    }
}

#[inline]
fn magnitude(value: f64) -> f64 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}

/// Order-preserving codec for finite `f64` of either sign
///
/// Same layout as [`SignedLexint`] with a [`LexFloat`] magnitude. Negative
/// zero is written as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignedLexFloat;

impl Codec for SignedLexFloat {
    type Value<'a> = f64;

    #[inline]
    fn preencode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        state.add(1)?;
        state.add(float_encoded_len(magnitude(*value))?)
    }

    fn encode(&self, state: &mut State<'_>, value: &Self::Value<'_>) -> Result<()> {
        if *value < 0.0 {
            state.put_u8(SIGN_NEGATIVE)?;
            encode_float_masked(state, -*value, 0xff)
        } else {
            state.put_u8(SIGN_POSITIVE)?;
            encode_float_masked(state, magnitude(*value), 0)
        }
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Self::Value<'a>> {
        if take_sign(state)? {
            Ok(-decode_float_masked(state, 0xff)?)
        } else {
            decode_float_masked(state, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use alloc::vec::Vec;

    fn lex(value: u64) -> Vec<u8> {
        codec::encode(&Lexint, &value).unwrap()
    }

    fn slex(value: i64) -> Vec<u8> {
        codec::encode(&SignedLexint, &value).unwrap()
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(lex(0), [0]);
        assert_eq!(lex(250), [250]);
        assert_eq!(lex(251), [251, 0]);
        assert_eq!(lex(506), [251, 255]);
        assert_eq!(lex(507), [252, 0x01, 0x00]);
        assert_eq!(lex(65535), [252, 0xff, 0x04]);
        assert_eq!(lex(65536), [253, 0x00, 0xff, 0x05]);
        assert_eq!(lex((1 << 24) - 1), [253, 0xff, 0xff, 0x04]);
        assert_eq!(lex(1 << 24), [254, 0x00, 0xff, 0xff, 0x05]);
        assert_eq!(lex(u32::MAX as u64), [254, 0xff, 0xff, 0xff, 0x04]);
        assert_eq!(lex(1 << 32), [255, 0, 0x08, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_encoded_len_matches_output() {
        let values = [0, 250, 251, 506, 507, 65535, 65536, 1 << 24, 1 << 32, 1 << 53, u64::MAX];
        for value in values {
            assert_eq!(lex(value).len(), encoded_len(value), "len of {}", value);
        }
    }

    #[test]
    fn test_small_numbers_strictly_increase() {
        let mut prev = lex(0);
        for n in 1..(256 * 256 * 16) {
            let cur = lex(n);
            assert!(cur > prev, "order broken at {}", n);
            prev = cur;
        }
    }

    #[test]
    fn test_big_numbers_never_decrease() {
        let mut prev = lex(0);
        let mut n: u64 = 1;
        let mut steps = 0;
        while let Some(next) = n.checked_add(1 + n / 97) {
            let cur = lex(n);
            assert!(cur >= prev, "order broken at {}", n);
            if n < 1 << 44 {
                assert!(cur > prev, "collision below exact range at {}", n);
            }
            prev = cur;
            n = next;
            steps += 1;
        }
        assert!(steps > 1000);
        assert!(lex(u64::MAX) >= prev);
    }

    #[test]
    fn test_exact_round_trip_below_2_44() {
        let values = [0, 250, 251, 506, 507, 65535, 65536, u32::MAX as u64, 1 << 32, (1 << 44) - 1];
        for value in values {
            assert_eq!(codec::decode(&Lexint, &lex(value)).unwrap(), value);
        }
    }

    #[test]
    fn test_lossy_round_trip_stays_close() {
        for value in [1u64 << 53, (1 << 53) + 1, 1 << 60, u64::MAX] {
            let decoded = codec::decode(&Lexint, &lex(value)).unwrap();
            let diff = value.abs_diff(decoded);
            assert!(diff <= value >> 43, "{} decoded as {}", value, decoded);
        }
    }

    #[test]
    fn test_distinguishable_values_keep_order() {
        let a = 1u64 << 60;
        let b = a + (a >> 40);
        assert!(lex(a) < lex(b));
    }

    #[test]
    fn test_truncation_fails() {
        assert_eq!(codec::decode(&Lexint, &[251]), Err(Error::OutOfBounds));
        for value in [300u64, 1000, 70_000, 20_000_000, 1 << 40, u64::MAX] {
            let encoded = lex(value);
            for cut in 0..encoded.len() {
                assert_eq!(
                    codec::decode(&Lexint, &encoded[..cut]),
                    Err(Error::OutOfBounds),
                    "value {} cut at {}",
                    value,
                    cut
                );
            }
        }
    }

    #[test]
    fn test_big_tier_beyond_u64() {
        // 2^63 is the largest power of two that still scales into a u64.
        let top = [255, 31, 0x08, 0, 0, 0, 0, 0];
        assert_eq!(codec::decode(&Lexint, &top).unwrap(), 1 << 63);
        assert_eq!(
            codec::decode(&Lexint, &[255, 40, 0x08, 0, 0, 0, 0, 0]),
            Err(Error::Overflow)
        );
        // 2^100 is valid on the wire, it just needs the float domain.
        let big = [255, 68, 0x08, 0, 0, 0, 0, 0];
        assert_eq!(codec::decode(&Lexint, &big), Err(Error::Overflow));
        assert_eq!(codec::decode(&LexFloat, &big).unwrap(), pow2(100));
    }

    #[test]
    fn test_nested_exponent() {
        // Exponent 68 stored in the big tier itself: 68 * 2^11 * 2^(0 - 11).
        let nested = [255, 255, 0, 0, 0, 0, 0x02, 0x20, 0x00, 0x08, 0, 0, 0, 0, 0];
        assert_eq!(codec::decode(&LexFloat, &nested).unwrap(), pow2(100));
        assert_eq!(codec::decode(&Lexint, &nested), Err(Error::Overflow));

        // Exponent 2^32 is far beyond any f64.
        let huge = [255, 255, 0, 0x08, 0, 0, 0, 0, 0, 0x08, 0, 0, 0, 0, 0];
        assert_eq!(codec::decode(&LexFloat, &huge), Err(Error::Overflow));
        assert_eq!(codec::decode(&Lexint, &huge), Err(Error::Overflow));

        for cut in 0..nested.len() {
            assert_eq!(
                codec::decode(&LexFloat, &nested[..cut]),
                Err(Error::OutOfBounds),
                "cut at {}",
                cut
            );
        }
    }

    fn lexf(value: f64) -> Vec<u8> {
        codec::encode(&LexFloat, &value).unwrap()
    }

    #[test]
    fn test_float_shares_integer_wire() {
        let values = [0u64, 250, 251, 506, 507, 65535, 65536, 1 << 32, (1 << 44) - 1, 1 << 53];
        for value in values {
            assert_eq!(lexf(value as f64), lex(value), "bytes of {}", value);
            assert_eq!(codec::decode(&LexFloat, &lex(value)).unwrap(), value as f64);
        }
        assert_eq!(lexf(pow2(100)), [255, 68, 0x08, 0, 0, 0, 0, 0]);
        assert_eq!(float_encoded_len(pow2(100)).unwrap(), 8);
    }

    #[test]
    fn test_float_fraction_dropped_below_2_32() {
        assert_eq!(lexf(3.7), [3]);
        assert_eq!(lexf(-0.0), [0]);
        assert_eq!(codec::decode(&LexFloat, &lexf(3.7)).unwrap(), 3.0);
    }

    #[test]
    fn test_float_rejects_unrepresentable() {
        assert_eq!(codec::encode(&LexFloat, &-1.0), Err(Error::InvalidSign));
        assert_eq!(codec::encode(&LexFloat, &f64::NAN), Err(Error::Overflow));
        assert_eq!(codec::encode(&LexFloat, &f64::INFINITY), Err(Error::Overflow));
        assert_eq!(codec::encode(&SignedLexFloat, &f64::NEG_INFINITY), Err(Error::Overflow));
    }

    #[test]
    fn test_float_up_to_max() {
        let encoded = lexf(f64::MAX);
        assert_eq!(encoded.len(), 1 + 3 + 6);
        let decoded = codec::decode(&LexFloat, &encoded).unwrap();
        assert!(decoded <= f64::MAX);
        assert!(f64::MAX - decoded <= f64::MAX * pow2(-43));
        assert!(encoded > lexf(f64::MAX * 0.999));
    }

    #[test]
    fn test_float_order_across_whole_range() {
        let mut prev = lexf(0.0);
        let mut n = 1.0f64;
        let mut steps = 0;
        while n < f64::MAX / 1.01 {
            let cur = lexf(n);
            assert!(cur > prev, "order broken at {}", n);
            let decoded = codec::decode(&LexFloat, &cur).unwrap();
            let expected = if n < SMALL_LIMIT as f64 { (n as u64) as f64 } else { n };
            let diff = if decoded > expected { decoded - expected } else { expected - decoded };
            assert!(diff <= expected * pow2(-43), "{} decoded as {}", n, decoded);
            prev = cur;
            n = n * 1.01 + 1.0;
            steps += 1;
        }
        assert!(steps > 60_000);
    }

    #[test]
    fn test_float_range_precision() {
        let a = 1e55;
        let b = 1.0000000000001e55;
        assert!(lexf(a) < lexf(b));

        let mut prev = lexf(a);
        for i in 1..1000 {
            let cur = lexf(1e55 + 1e46 * i as f64);
            assert!(cur > prev, "order broken at step {}", i);
            prev = cur;
        }
    }

    #[test]
    fn test_signed_float() {
        let values = [
            -f64::MAX,
            -1e55,
            -pow2(40),
            -70_000.0,
            -1.0,
            0.0,
            1.0,
            300.0,
            pow2(40),
            1e55,
            f64::MAX,
        ];
        let encoded: Vec<Vec<u8>> = values
            .iter()
            .map(|v| codec::encode(&SignedLexFloat, v).unwrap())
            .collect();
        for pair in encoded.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for value in [-pow2(40), -70_000.0, -1.0, 0.0, 300.0, pow2(100)] {
            let bytes = codec::encode(&SignedLexFloat, &value).unwrap();
            assert_eq!(codec::decode(&SignedLexFloat, &bytes).unwrap(), value);
        }
        assert_eq!(codec::encode(&SignedLexFloat, &-0.0).unwrap(), [1, 0]);
        // Whole-number floats and integers agree on the wire.
        assert_eq!(codec::encode(&SignedLexFloat, &-300.0).unwrap(), slex(-300));
    }

    #[test]
    fn test_signed_known_bytes() {
        assert_eq!(slex(0), [1, 0]);
        assert_eq!(slex(5), [1, 5]);
        assert_eq!(slex(-1), [0, 0xfe]);
        assert_eq!(slex(-300), [0, !251u8, !49u8]);
    }

    #[test]
    fn test_signed_order() {
        let values = [
            i64::MIN,
            -(1 << 40),
            -(1 << 32),
            -70_000,
            -507,
            -506,
            -251,
            -250,
            -1,
            0,
            1,
            250,
            251,
            507,
            70_000,
            1 << 32,
            1 << 40,
            i64::MAX,
        ];
        for pair in values.windows(2) {
            assert!(slex(pair[0]) < slex(pair[1]), "{} vs {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_signed_round_trip() {
        for value in [i64::MIN, -(1 << 40), -65536, -1, 0, 1, 65536, 1 << 40] {
            assert_eq!(codec::decode(&SignedLexint, &slex(value)).unwrap(), value);
        }
    }

    #[test]
    fn test_signed_does_not_touch_neighbours() {
        let mut state = State::new();
        Lexint.preencode(&mut state, &7).unwrap();
        SignedLexint.preencode(&mut state, &-7).unwrap();
        Lexint.preencode(&mut state, &9).unwrap();

        let mut buf = [0u8; 4];
        let mut state = State::for_write(&mut buf);
        Lexint.encode(&mut state, &7).unwrap();
        SignedLexint.encode(&mut state, &-7).unwrap();
        Lexint.encode(&mut state, &9).unwrap();
        assert_eq!(buf, [7, 0, !7u8, 9]);

        let mut state = State::for_read(&buf);
        assert_eq!(Lexint.decode(&mut state).unwrap(), 7);
        assert_eq!(SignedLexint.decode(&mut state).unwrap(), -7);
        assert_eq!(Lexint.decode(&mut state).unwrap(), 9);
    }

    #[test]
    fn test_signed_invalid_sign() {
        assert_eq!(codec::decode(&SignedLexint, &[2, 0]), Err(Error::InvalidSign));
        assert_eq!(codec::decode(&SignedLexint, &[]), Err(Error::OutOfBounds));
        assert_eq!(codec::decode(&SignedLexFloat, &[7, 0]), Err(Error::InvalidSign));
    }

    #[test]
    fn test_signed_truncation_fails() {
        for value in [-300i64, -70_000, -(1 << 40), i64::MIN, 300, 1 << 40] {
            let encoded = slex(value);
            for cut in 0..encoded.len() {
                assert_eq!(
                    codec::decode(&SignedLexint, &encoded[..cut]),
                    Err(Error::OutOfBounds),
                    "value {} cut at {}",
                    value,
                    cut
                );
            }
        }
    }
}
