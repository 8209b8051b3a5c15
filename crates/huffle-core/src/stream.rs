//! Stream configuration and `std::io` adapters for the byte collaborators.

use std::io::{BufWriter, ErrorKind, Read, Write};

use tracing::trace;

use crate::error::{Error, Result};
use crate::traits::{ByteSink, ByteSource};
use crate::types::Symbol;

/// Default buffer size for streaming operations (64 KB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Minimum buffer size allowed.
pub const MIN_BUFFER_SIZE: usize = 4 * 1024;

/// Maximum buffer size allowed (1 MB).
pub const MAX_BUFFER_SIZE: usize = 1024 * 1024;

/// Clamp buffer size to valid range.
#[inline]
pub fn clamp_buffer_size(size: usize) -> usize {
    size.clamp(MIN_BUFFER_SIZE, MAX_BUFFER_SIZE)
}

/// Configuration for stream adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamConfig {
    /// Adapter buffer size (default: 64 KB, clamped to [4 KB, 1 MB]).
    pub buffer_size: usize,

    /// Largest input a source may yield before reading is aborted
    /// (default: 4 GiB - 1, the most symbols a container can count).
    pub max_input_size: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_input_size: u32::MAX as u64,
        }
    }
}

impl StreamConfig {
    /// Buffer size after clamping.
    pub fn effective_buffer_size(&self) -> usize {
        clamp_buffer_size(self.buffer_size)
    }
}

/// A [`ByteSource`] over an in-memory slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a source yielding `data` front to back.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Symbols not yet yielded.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_symbol(&mut self) -> Result<Option<Symbol>> {
        let symbol = self.data.get(self.pos).copied();
        if symbol.is_some() {
            self.pos += 1;
        }
        Ok(symbol)
    }

    fn read_all(&mut self, buf: &mut Vec<Symbol>) -> Result<usize> {
        let rest = self.remaining();
        buf.extend_from_slice(rest);
        self.pos = self.data.len();
        Ok(rest.len())
    }
}

/// A buffered [`ByteSource`] reading from any [`Read`].
pub struct ReadSource<R: Read> {
    inner: R,
    buffer: Vec<u8>,
    pos: usize,
    filled: usize,
    total: u64,
    max_input_size: u64,
    exhausted: bool,
}

impl<R: Read> ReadSource<R> {
    /// Create a new source with default configuration.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, &StreamConfig::default())
    }

    /// Create a new source with the given configuration.
    pub fn with_config(inner: R, config: &StreamConfig) -> Self {
        Self {
            inner,
            buffer: vec![0u8; config.effective_buffer_size()],
            pos: 0,
            filled: 0,
            total: 0,
            max_input_size: config.max_input_size,
            exhausted: false,
        }
    }

    /// Get a reference to the inner reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Consume the adapter, returning the inner reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Refill the buffer. Returns false once the reader is exhausted.
    fn fill(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        loop {
            match self.inner.read(&mut self.buffer) {
                Ok(0) => {
                    self.exhausted = true;
                    trace!(total = self.total, "byte source exhausted");
                    return Ok(false);
                }
                Ok(n) => {
                    self.account(n)?;
                    self.pos = 0;
                    self.filled = n;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    fn account(&mut self, n: usize) -> Result<()> {
        self.total += n as u64;
        if self.total > self.max_input_size {
            return Err(Error::limit_exceeded(
                "input size",
                self.max_input_size,
                self.total,
            ));
        }
        Ok(())
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn next_symbol(&mut self) -> Result<Option<Symbol>> {
        if self.pos == self.filled && !self.fill()? {
            return Ok(None);
        }
        let symbol = self.buffer[self.pos];
        self.pos += 1;
        Ok(Some(symbol))
    }

    fn read_all(&mut self, buf: &mut Vec<Symbol>) -> Result<usize> {
        let start = buf.len();
        loop {
            buf.extend_from_slice(&self.buffer[self.pos..self.filled]);
            self.pos = self.filled;
            if !self.fill()? {
                break;
            }
        }
        Ok(buf.len() - start)
    }
}

/// A buffered [`ByteSink`] writing to any [`Write`].
pub struct WriteSink<W: Write> {
    inner: BufWriter<W>,
}

impl<W: Write> WriteSink<W> {
    /// Create a new sink with default configuration.
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, &StreamConfig::default())
    }

    /// Create a new sink with the given configuration.
    pub fn with_config(inner: W, config: &StreamConfig) -> Self {
        Self {
            inner: BufWriter::with_capacity(config.effective_buffer_size(), inner),
        }
    }

    /// Get a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        self.inner.get_ref()
    }

    /// Flush and return the inner writer.
    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

impl<W: Write> ByteSink for WriteSink<W> {
    fn write_symbols(&mut self, symbols: &[Symbol]) -> Result<()> {
        self.inner.write_all(symbols)?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that hands out at most `chunk` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_clamp_buffer_size() {
        assert_eq!(clamp_buffer_size(1024), MIN_BUFFER_SIZE);
        assert_eq!(clamp_buffer_size(DEFAULT_BUFFER_SIZE), DEFAULT_BUFFER_SIZE);
        assert_eq!(clamp_buffer_size(10 * 1024 * 1024), MAX_BUFFER_SIZE);
    }

    #[test]
    fn test_slice_source_order_and_exhaustion() {
        let mut source = SliceSource::new(b"ab");
        assert_eq!(source.next_symbol().unwrap(), Some(b'a'));
        assert_eq!(source.next_symbol().unwrap(), Some(b'b'));
        assert_eq!(source.next_symbol().unwrap(), None);
        assert_eq!(source.next_symbol().unwrap(), None);
    }

    #[test]
    fn test_read_source_symbol_by_symbol() {
        let data: Vec<u8> = (0..=255).cycle().take(10_000).collect();
        let mut source = ReadSource::new(Trickle {
            data: &data,
            chunk: 7,
        });
        let mut out = Vec::new();
        while let Some(symbol) = source.next_symbol().unwrap() {
            out.push(symbol);
        }
        assert_eq!(out, data);
    }

    #[test]
    fn test_read_source_read_all_after_partial() {
        let data = b"hello, world";
        let mut source = ReadSource::new(Cursor::new(&data[..]));
        assert_eq!(source.next_symbol().unwrap(), Some(b'h'));

        let mut rest = Vec::new();
        assert_eq!(source.read_all(&mut rest).unwrap(), data.len() - 1);
        assert_eq!(rest, &data[1..]);
    }

    #[test]
    fn test_read_source_limit() {
        let config = StreamConfig {
            max_input_size: 10,
            ..Default::default()
        };
        let mut source = ReadSource::with_config(Cursor::new(vec![0u8; 11]), &config);
        let err = source.read_all(&mut Vec::new()).unwrap_err();
        assert_eq!(err.category(), "limit_exceeded");
    }

    #[test]
    fn test_write_sink() {
        let mut sink = WriteSink::new(Vec::new());
        sink.write_symbols(b"abc").unwrap();
        sink.write_symbols(b"de").unwrap();
        sink.commit().unwrap();
        assert_eq!(sink.into_inner().unwrap(), b"abcde");
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<u8> = Vec::new();
        sink.write_symbols(&[1, 2, 3]).unwrap();
        assert_eq!(sink, vec![1, 2, 3]);
    }
}
