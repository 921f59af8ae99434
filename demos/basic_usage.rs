//! Basic usage example for compactenc
//!
//! Run with: cargo run --example basic_usage

use std::borrow::Cow;

use compactenc::*;

/// A user-defined message: fields are just codecs run in a fixed order
#[derive(Debug)]
struct Reading<'a> {
    sensor: &'a str,
    seq: u64,
    offset: i64,
    samples: Cow<'a, [f32]>,
}

struct ReadingCodec;

impl Codec for ReadingCodec {
    type Value<'a> = Reading<'a>;

    fn preencode(&self, state: &mut State<'_>, value: &Reading<'_>) -> Result<()> {
        Str.preencode(state, &value.sensor)?;
        Uint.preencode(state, &value.seq)?;
        Int.preencode(state, &value.offset)?;
        Float32Array::new().preencode(state, &value.samples)
    }

    fn encode(&self, state: &mut State<'_>, value: &Reading<'_>) -> Result<()> {
        Str.encode(state, &value.sensor)?;
        Uint.encode(state, &value.seq)?;
        Int.encode(state, &value.offset)?;
        Float32Array::new().encode(state, &value.samples)
    }

    fn decode<'a>(&self, state: &mut State<'a>) -> Result<Reading<'a>> {
        Ok(Reading {
            sensor: Str.decode(state)?,
            seq: Uint.decode(state)?,
            offset: Int.decode(state)?,
            samples: Float32Array::new().decode(state)?,
        })
    }
}

fn main() -> Result<()> {
    println!("compactenc Basic Usage Example");
    println!("==============================");

    // Example 1: Manual three-phase encoding
    println!("\n1. Measure, Write, Read:");
    {
        let mut state = State::new();
        Uint.preencode(&mut state, &42)?;
        Str.preencode(&mut state, &"hi")?;
        println!("  Measured {} bytes", state.end);

        let mut buf = vec![0u8; state.end];
        let mut state = State::for_write(&mut buf);
        Uint.encode(&mut state, &42)?;
        Str.encode(&mut state, &"hi")?;
        println!("  Encoded: {:02x?}", buf);

        let mut state = State::for_read(&buf);
        let number = Uint.decode(&mut state)?;
        let text = Str.decode(&mut state)?;
        println!("  Decoded: {} {:?}", number, text);
    }

    // Example 2: Compact integer size classes
    println!("\n2. Compact Integer Sizes:");
    for value in [0u64, 252, 253, 65_535, 65_536, u32::MAX as u64 + 1] {
        let encoded = encode(&Uint, &value)?;
        println!("  {:>12} -> {} bytes", value, encoded.len());
    }

    // Example 3: A composite message
    println!("\n3. Composite Message:");
    {
        let samples = [20.5f32, 20.75, 21.0];
        let reading = Reading {
            sensor: "greenhouse-3",
            seq: 4200,
            offset: -17,
            samples: Cow::Borrowed(&samples[..]),
        };

        let encoded = encode(&ReadingCodec, &reading)?;
        println!("  Encoded {} bytes", encoded.len());

        let (decoded, consumed) = decode_with_len(&ReadingCodec, &encoded)?;
        println!("  Decoded {:?} from {} bytes", decoded, consumed);
        println!(
            "  Samples borrowed from input: {}",
            matches!(decoded.samples, Cow::Borrowed(_))
        );
    }

    // Example 4: Sortable keys
    println!("\n4. Order-Preserving Keys:");
    {
        let mut keys: Vec<Vec<u8>> = [-300i64, 7, -1, 1 << 40, 0]
            .iter()
            .map(|n| encode(&SignedLexint, n))
            .collect::<Result<_>>()?;
        keys.sort();

        for key in &keys {
            println!("  {:02x?} -> {}", key, decode(&SignedLexint, key)?);
        }
    }

    // Example 5: Large numbers and other text encodings
    println!("\n5. Float Keys and Text Encodings:");
    {
        for n in [1e20, 1e55, f64::MAX] {
            let key = encode(&LexFloat, &n)?;
            println!("  {:e} -> {} bytes, decodes to {:e}", n, key.len(), decode(&LexFloat, &key)?);
        }

        let digest = encode(&HexStr::new(), &Cow::Borrowed("c0ffee"))?;
        println!("  hex \"c0ffee\" -> {:02x?}", digest);
        let name = encode(&Utf16Str::new(), &Cow::Borrowed("hi"))?;
        println!("  utf16le \"hi\" -> {:02x?}", name);
    }

    // Example 6: Error handling
    println!("\n6. Error Handling:");
    {
        match decode(&Str, &[0x05, b'h', b'i']) {
            Ok(text) => println!("  Unexpected success: {}", text),
            Err(e) => println!("  Truncated string: {}", e),
        }

        match decode(&Array::new(Uint), &[0xfe, 0xff, 0xff, 0xff, 0x7f]) {
            Ok(list) => println!("  Unexpected success: {} items", list.len()),
            Err(e) => println!("  Oversized array: {}", e),
        }

        match decode(&SignedLexint, &[7, 0]) {
            Ok(n) => println!("  Unexpected success: {}", n),
            Err(e) => println!("  Bad sign byte: {}", e),
        }
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
