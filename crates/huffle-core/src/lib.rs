//! # Huffle Core
//!
//! Core traits, error taxonomy and I/O contracts for the huffle codec.
//!
//! The codec itself only ever sees three collaborators, all defined here:
//!
//! - [`ByteSource`] - an ordered, finite supply of 8-bit symbols
//! - [`ByteSink`] - an ordered destination for decoded symbols
//! - [`Compressor`] / [`Decompressor`] / [`Codec`] - one-shot byte APIs
//!
//! ## Example
//!
//! ```ignore
//! use huffle_core::{Codec, ReadSource, WriteSink};
//! use huffle::HuffmanCodec;
//!
//! let codec = HuffmanCodec::new();
//! let mut source = ReadSource::new(File::open("input.bin")?);
//! let mut sink = WriteSink::new(File::create("input.bin.huf")?);
//! codec.encode_stream(&mut source, &mut sink)?;
//! ```

pub mod error;
pub mod stats;
pub mod stream;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use stats::CompressionStats;
pub use stream::{ReadSource, SliceSource, StreamConfig, WriteSink};
pub use traits::{ByteSink, ByteSource, Codec, Compressor, Decompressor};
pub use types::{ALPHABET_SIZE, Algorithm, CompressionRatio, Symbol};
