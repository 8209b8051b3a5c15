//! Variable-length bit sequences.
//!
//! [`BitSequence`] is an immutable, 0-indexed run of bits with no alignment
//! assumptions. Bits are packed MSB-first into a shared [`Bytes`] buffer, so
//! sub-ranges ([`BitSequence::slice`], [`BitSequence::skip`]) are views that
//! share storage instead of copying it.
//!
//! [`BitWriter`] assembles new sequences; [`BitReader`] walks one front to
//! back for the container format.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use bytes::Bytes;
use huffle_core::{Error, Result};

/// Immutable ordered sequence of bits.
#[derive(Clone, Default)]
pub struct BitSequence {
    /// Packed storage, MSB-first within each byte.
    bytes: Bytes,
    /// Bit offset of the first bit inside `bytes`.
    offset: usize,
    /// Number of bits in the sequence.
    len: usize,
}

impl BitSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap packed MSB-first bytes holding `len` bits.
    pub fn from_packed(bytes: impl Into<Bytes>, len: usize) -> Result<Self> {
        let bytes = bytes.into();
        let available = bytes.len() * 8;
        if len > available {
            return Err(Error::unexpected_eof(available));
        }
        Ok(Self {
            bytes,
            offset: 0,
            len,
        })
    }

    /// Build a sequence from individual bits.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut writer = BitWriter::new();
        for bit in bits {
            writer.push_bit(bit);
        }
        writer.finish()
    }

    /// Concatenate sequences, preserving their order.
    pub fn assemble<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a BitSequence>,
    {
        let mut writer = BitWriter::new();
        for part in parts {
            writer.push_sequence(part);
        }
        writer.finish()
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the sequence holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        let abs = self.offset + index;
        Some(self.bytes[abs / 8] & (0x80 >> (abs % 8)) != 0)
    }

    /// Bit at `index` as `0` or `1`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn bit_at(&self, index: usize) -> u8 {
        match self.get(index) {
            Some(bit) => bit as u8,
            None => panic!("bit index {} out of range for length {}", index, self.len),
        }
    }

    /// Bits `start..end` as a view sharing this sequence's storage.
    ///
    /// # Panics
    /// Panics if `start > end` or `end > self.len()`.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        assert!(
            start <= end && end <= self.len,
            "bit range {}..{} out of range for length {}",
            start,
            end,
            self.len
        );
        Self {
            bytes: self.bytes.clone(),
            offset: self.offset + start,
            len: end - start,
        }
    }

    /// All bits from `n` to the end.
    ///
    /// # Panics
    /// Panics if `n > self.len()`.
    #[inline]
    pub fn skip(&self, n: usize) -> Self {
        self.slice(n, self.len)
    }

    /// Read `n <= 57` bits starting at `start` as an MSB-first integer.
    pub(crate) fn read_bits(&self, start: usize, n: usize) -> u64 {
        debug_assert!(n <= 57 && start + n <= self.len);
        let mut value = 0u64;
        let mut abs = self.offset + start;
        let mut remaining = n;
        while remaining > 0 {
            let byte = self.bytes[abs / 8] as u32;
            let available = 8 - abs % 8;
            let take = available.min(remaining);
            let chunk = (byte >> (available - take)) & ((1u32 << take) - 1);
            value = (value << take) | chunk as u64;
            abs += take;
            remaining -= take;
        }
        value
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| {
            let abs = self.offset + i;
            self.bytes[abs / 8] & (0x80 >> (abs % 8)) != 0
        })
    }

    /// Pack into bytes, MSB-first, zero-padded to a byte boundary.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        if self.offset % 8 == 0 {
            let start = self.offset / 8;
            let mut out = self.bytes[start..start + self.len.div_ceil(8)].to_vec();
            let tail = self.len % 8;
            if tail != 0 {
                if let Some(last) = out.last_mut() {
                    *last &= 0xFFu8 << (8 - tail);
                }
            }
            return out;
        }
        let mut writer = BitWriter::with_capacity(self.len.div_ceil(8));
        writer.push_sequence(self);
        writer.finish_bytes()
    }
}

impl PartialEq for BitSequence {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for BitSequence {}

impl Hash for BitSequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for bit in self.iter() {
            bit.hash(state);
        }
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSequence(\"{}\")", self)
    }
}

impl FromStr for BitSequence {
    type Err = Error;

    /// Parse a literal pattern such as `"0110"`.
    fn from_str(pattern: &str) -> Result<Self> {
        let mut writer = BitWriter::with_capacity(pattern.len().div_ceil(8));
        for (position, found) in pattern.chars().enumerate() {
            match found {
                '0' => writer.push_bit(false),
                '1' => writer.push_bit(true),
                _ => return Err(Error::InvalidBitPattern { position, found }),
            }
        }
        Ok(writer.finish())
    }
}

/// Accumulates bits MSB-first into a growing byte buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    data: Vec<u8>,
    bit_buf: u64,
    bit_count: u8,
}

impl BitWriter {
    /// Create a new bit writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            bit_buf: 0,
            bit_count: 0,
        }
    }

    /// Append one bit.
    #[inline]
    pub fn push_bit(&mut self, bit: bool) {
        self.push_bits(bit as u64, 1);
    }

    /// Append the low `n` bits of `value`, most significant first.
    #[inline]
    pub fn push_bits(&mut self, value: u64, n: u8) {
        debug_assert!(n <= 32);
        if n == 0 {
            return;
        }
        let mask = (1u64 << n) - 1;
        self.bit_buf = (self.bit_buf << n) | (value & mask);
        self.bit_count += n;

        while self.bit_count >= 8 {
            self.bit_count -= 8;
            self.data.push((self.bit_buf >> self.bit_count) as u8);
        }
        self.bit_buf &= (1u64 << self.bit_count) - 1;
    }

    /// Append every bit of `bits`.
    pub fn push_sequence(&mut self, bits: &BitSequence) {
        let mut pos = 0;
        while pos < bits.len() {
            let n = (bits.len() - pos).min(32);
            self.push_bits(bits.read_bits(pos, n), n as u8);
            pos += n;
        }
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.data.len() * 8 + self.bit_count as usize
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.bit_count == 0
    }

    /// Finish into a sequence of exactly the bits written.
    pub fn finish(self) -> BitSequence {
        let len = self.bit_len();
        BitSequence {
            bytes: Bytes::from(self.finish_bytes()),
            offset: 0,
            len,
        }
    }

    /// Finish into bytes, zero-padding the last one.
    pub fn finish_bytes(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.data.push((self.bit_buf << (8 - self.bit_count)) as u8);
        }
        self.data
    }
}

/// Sequential reader over a [`BitSequence`].
#[derive(Debug, Clone)]
pub struct BitReader {
    bits: BitSequence,
    pos: usize,
}

impl BitReader {
    /// Create a reader positioned at the first bit.
    pub fn new(bits: BitSequence) -> Self {
        Self { bits, pos: 0 }
    }

    /// Current position in bits.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bits left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }

    /// Read one bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        let bit = self
            .bits
            .get(self.pos)
            .ok_or(Error::unexpected_eof(self.pos))?;
        self.pos += 1;
        Ok(bit)
    }

    /// Read `n <= 57` bits as an MSB-first integer.
    pub fn read_bits(&mut self, n: usize) -> Result<u64> {
        if n > self.remaining() {
            return Err(Error::unexpected_eof(self.bits.len()));
        }
        let value = self.bits.read_bits(self.pos, n);
        self.pos += n;
        Ok(value)
    }

    /// Take the next `n` bits as a shared view.
    pub fn take(&mut self, n: usize) -> Result<BitSequence> {
        if n > self.remaining() {
            return Err(Error::unexpected_eof(self.bits.len()));
        }
        let view = self.bits.slice(self.pos, self.pos + n);
        self.pos += n;
        Ok(view)
    }
}
