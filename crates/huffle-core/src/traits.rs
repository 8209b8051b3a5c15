//! Core traits for compression, decompression and the byte collaborators.
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Compressor / Decompressor  (one-shot operations)
//!       ↓
//! Codec  (combined compress + decompress)
//!
//! ByteSource → codec → ByteSink  (collaborator contracts)
//! ```

use crate::error::{Error, Result};
use crate::types::{Algorithm, CompressionRatio, Symbol};

/// Copy `produced` into the front of `output`.
fn copy_out(produced: &[u8], output: &mut [u8]) -> Result<usize> {
    let provided = output.len();
    let dest = output
        .get_mut(..produced.len())
        .ok_or(Error::buffer_too_small(produced.len(), provided))?;
    dest.copy_from_slice(produced);
    Ok(produced.len())
}

/// Turns a whole message into a self-describing container.
pub trait Compressor {
    fn algorithm(&self) -> Algorithm;

    /// Compress `input` into a new container.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Compress into a caller buffer, returning the container length.
    ///
    /// Fails with [`Error::BufferTooSmall`] and leaves `output` untouched if
    /// the container does not fit.
    fn compress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        copy_out(&self.compress(input)?, output)
    }

    /// Upper bound on the container length for `input_len` message bytes.
    fn max_compressed_size(&self, input_len: usize) -> usize;
}

/// Recovers the message from a container.
pub trait Decompressor {
    fn algorithm(&self) -> Algorithm;

    /// Decompress a whole container.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Decompress into a caller buffer, returning the message length.
    fn decompress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        copy_out(&self.decompress(input)?, output)
    }
}

/// Both directions of one algorithm.
pub trait Codec: Compressor + Decompressor {
    /// Codec with default configuration.
    fn new() -> Self
    where
        Self: Sized;

    /// Compress then decompress `data`, reporting whether it came back intact.
    fn verify_roundtrip(&self, data: &[u8]) -> Result<bool> {
        let container = self.compress(data)?;
        Ok(self.decompress(&container)? == data)
    }

    /// Container size against message size for `data`.
    fn measure_ratio(&self, data: &[u8]) -> Result<CompressionRatio> {
        let container = self.compress(data)?;
        Ok(CompressionRatio::new(data.len(), container.len()))
    }
}

/// Ordered, finite supply of 8-bit symbols.
///
/// Exhaustion is reported as `Ok(None)`; errors are upstream failures the
/// codec passes through untouched.
pub trait ByteSource {
    /// Next symbol, or `None` once the source is exhausted.
    fn next_symbol(&mut self) -> Result<Option<Symbol>>;

    /// Drain the remaining symbols into `buf`, returning how many were appended.
    fn read_all(&mut self, buf: &mut Vec<Symbol>) -> Result<usize> {
        let start = buf.len();
        while let Some(symbol) = self.next_symbol()? {
            buf.push(symbol);
        }
        Ok(buf.len() - start)
    }
}

/// Ordered destination for 8-bit symbols.
///
/// Order must be preserved; all-or-nothing visibility is not required.
pub trait ByteSink {
    /// Append symbols in order.
    fn write_symbols(&mut self, symbols: &[Symbol]) -> Result<()>;

    /// Commit everything written so far to the destination.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_symbol(&mut self) -> Result<Option<Symbol>> {
        (**self).next_symbol()
    }

    fn read_all(&mut self, buf: &mut Vec<Symbol>) -> Result<usize> {
        (**self).read_all(buf)
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write_symbols(&mut self, symbols: &[Symbol]) -> Result<()> {
        (**self).write_symbols(symbols)
    }

    fn commit(&mut self) -> Result<()> {
        (**self).commit()
    }
}

impl ByteSink for Vec<Symbol> {
    fn write_symbols(&mut self, symbols: &[Symbol]) -> Result<()> {
        self.extend_from_slice(symbols);
        Ok(())
    }
}
