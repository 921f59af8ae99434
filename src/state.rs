//! Cursor state shared by every codec
//!
//! A [`State`] is threaded through all three phases of encoding one message:
//! first every codec's `preencode` runs against a state with no buffer and
//! grows `end` by the bytes it will need, then a buffer of exactly `end`
//! bytes is attached and every `encode` runs in the same order. Decoding
//! binds a state to a complete, already received buffer.

use crate::error::{Error, Result};

#[derive(Debug)]
enum Buffer<'a> {
    Absent,
    Write(&'a mut [u8]),
    Read(&'a [u8]),
}

/// Buffer plus the two offsets every codec operates on
///
/// Invariant while a buffer is attached: `start <= end <= buffer.len()`.
#[derive(Debug)]
pub struct State<'a> {
    /// Next byte to produce, or bytes consumed so far when decoding
    pub start: usize,
    /// Exclusive end of the current region; the running size while measuring
    pub end: usize,
    buffer: Buffer<'a>,
}

impl State<'static> {
    /// Create a measuring state with no buffer
    #[inline]
    pub const fn new() -> Self {
        Self {
            start: 0,
            end: 0,
            buffer: Buffer::Absent,
        }
    }
}

impl Default for State<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> State<'a> {
    /// Create a write state over the whole of `buf`
    #[inline]
    pub fn for_write(buf: &'a mut [u8]) -> Self {
        Self {
            start: 0,
            end: buf.len(),
            buffer: Buffer::Write(buf),
        }
    }

    /// Create a read state over the whole of `buf`
    #[inline]
    pub fn for_read(buf: &'a [u8]) -> Self {
        Self {
            start: 0,
            end: buf.len(),
            buffer: Buffer::Read(buf),
        }
    }

    /// Create a read state limited to the region `start..end` of `buf`
    ///
    /// Fails with [`Error::OutOfBounds`] unless `start <= end <= buf.len()`.
    #[inline]
    pub fn with_region(buf: &'a [u8], start: usize, end: usize) -> Result<Self> {
        if start > end || end > buf.len() {
            return Err(Error::OutOfBounds);
        }
        Ok(Self {
            start,
            end,
            buffer: Buffer::Read(buf),
        })
    }

    /// Create a write state limited to the region `start..end` of `buf`
    ///
    /// Bytes outside the region are left untouched, so several values can
    /// be written into one buffer at known offsets.
    #[inline]
    pub fn with_write_region(buf: &'a mut [u8], start: usize, end: usize) -> Result<Self> {
        if start > end || end > buf.len() {
            return Err(Error::OutOfBounds);
        }
        Ok(Self {
            start,
            end,
            buffer: Buffer::Write(buf),
        })
    }

    /// True while no buffer is attached (the size computation phase)
    #[inline]
    pub fn is_measuring(&self) -> bool {
        matches!(self.buffer, Buffer::Absent)
    }

    /// Bytes left in the current region
    #[inline]
    pub fn remaining(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the cursor reached the end of the region
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.start >= self.end
    }

    /// Grow the measured size by `n` bytes
    #[inline]
    pub fn add(&mut self, n: usize) -> Result<()> {
        self.end = self.end.checked_add(n).ok_or(Error::Overflow)?;
        Ok(())
    }

    #[inline]
    fn advance(&self, n: usize) -> Result<usize> {
        self.start
            .checked_add(n)
            .filter(|&stop| stop <= self.end)
            .ok_or(Error::OutOfBounds)
    }

    /// Claim the next `n` bytes of the write buffer and advance past them
    #[inline]
    pub fn reserve(&mut self, n: usize) -> Result<&mut [u8]> {
        let start = self.start;
        let stop = self.advance(n)?;
        match &mut self.buffer {
            Buffer::Write(buf) => {
                let slot = buf.get_mut(start..stop).ok_or(Error::OutOfBounds)?;
                self.start = stop;
                Ok(slot)
            }
            _ => Err(Error::NoBuffer),
        }
    }

    /// Write raw bytes at the cursor
    #[inline]
    pub fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Write a u8 value
    #[inline]
    pub fn put_u8(&mut self, value: u8) -> Result<()> {
        self.reserve(1)?[0] = value;
        Ok(())
    }

    /// Read `n` bytes, returning a zero-copy slice of the decode buffer
    #[inline]
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let stop = self.advance(n)?;
        match self.buffer {
            Buffer::Read(buf) => {
                let bytes = buf.get(self.start..stop).ok_or(Error::OutOfBounds)?;
                self.start = stop;
                Ok(bytes)
            }
            _ => Err(Error::NoBuffer),
        }
    }

    /// Read a u8 value
    #[inline]
    pub fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read exactly `N` bytes into an array
    #[inline]
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read every byte left in the region
    #[inline]
    pub fn take_rest(&mut self) -> Result<&'a [u8]> {
        self.take(self.remaining())
    }

    /// Peek at the rest of the region without advancing
    #[inline]
    pub fn peek_rest(&self) -> Result<&'a [u8]> {
        match self.buffer {
            Buffer::Read(buf) => buf.get(self.start..self.end).ok_or(Error::OutOfBounds),
            _ => Err(Error::NoBuffer),
        }
    }

    /// Skip bytes in the region
    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.start = self.advance(n)?;
        Ok(())
    }
}
