//! Codec implementation tying the pipelines to the core traits.

use std::io::{Read, Write};
use std::time::Instant;

use huffle_core::{
    Algorithm, ByteSink, ByteSource, Codec, CompressionStats, Compressor, Decompressor,
    ReadSource, Result, StreamConfig, WriteSink,
};
use tracing::debug;

use crate::container::{PackedReader, read_from, write_container};
use crate::decoder::decode_encoded;
use crate::encoder::{Encoded, MAX_SYMBOL_COUNT, encode};

/// Fixed container overhead: magic plus the largest possible trie and both length fields.
const MAX_HEADER_BYTES: usize = 4 + (1 + 511 + 256 * 8 + 32 + 64usize).div_ceil(8);

/// Longest codeword a 256-symbol trie can assign.
const MAX_CODE_BITS: usize = 255;

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecConfig {
    /// Containers declaring more symbols than this are refused before decoding.
    pub max_symbol_count: usize,

    /// Reject containers whose padding bits are not zero.
    pub verify_padding: bool,

    /// Buffering for [`HuffmanCodec::encode_io`] and [`HuffmanCodec::decode_io`].
    pub stream: StreamConfig,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            max_symbol_count: MAX_SYMBOL_COUNT,
            verify_padding: false,
            stream: StreamConfig::default(),
        }
    }
}

/// Huffman codec producing self-describing containers.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    /// Create a codec with the given configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress and report what happened.
    pub fn compress_with_stats(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        let start = Instant::now();
        let encoded = encode(input)?;
        let container = write_container(&encoded)?;

        let mut stats = CompressionStats::from_operation(
            Algorithm::Huffman,
            input.len(),
            container.len(),
            start.elapsed().as_micros() as u64,
        );
        stats.encoded_bits = encoded.bits.len();
        stats.leaf_count = encoded.trie.leaf_count();
        Ok((container, stats))
    }

    /// Decompress and report what happened.
    pub fn decompress_with_stats(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        let start = Instant::now();
        let encoded = self.read(input)?;
        let output = decode_encoded(&encoded)?;

        let mut stats = CompressionStats::from_operation(
            Algorithm::Huffman,
            output.len(),
            input.len(),
            start.elapsed().as_micros() as u64,
        );
        stats.encoded_bits = encoded.bits.len();
        stats.leaf_count = encoded.trie.leaf_count();
        Ok((output, stats))
    }

    /// Parse a container under this codec's limits.
    pub fn read(&self, input: &[u8]) -> Result<Encoded> {
        let reader = PackedReader::new(input.to_vec())?
            .max_symbol_count(self.config.max_symbol_count)
            .verify_padding(self.config.verify_padding);
        read_from(reader)
    }

    /// Read every symbol from `source`, encode them and write the container to `sink`.
    pub fn encode_stream<S, K>(&self, mut source: S, mut sink: K) -> Result<CompressionStats>
    where
        S: ByteSource,
        K: ByteSink,
    {
        let mut symbols = Vec::new();
        source.read_all(&mut symbols)?;
        let (container, stats) = self.compress_with_stats(&symbols)?;
        sink.write_symbols(&container)?;
        sink.commit()?;
        debug!(%stats, "encoded stream");
        Ok(stats)
    }

    /// Read a container from `source`, decode it and write the symbols to `sink`.
    ///
    /// Nothing reaches the sink unless the whole message decodes.
    pub fn decode_stream<S, K>(&self, mut source: S, mut sink: K) -> Result<CompressionStats>
    where
        S: ByteSource,
        K: ByteSink,
    {
        let mut container = Vec::new();
        source.read_all(&mut container)?;
        let (symbols, stats) = self.decompress_with_stats(&container)?;
        sink.write_symbols(&symbols)?;
        sink.commit()?;
        debug!(%stats, "decoded stream");
        Ok(stats)
    }

    /// [`encode_stream`](Self::encode_stream) over `std::io` types.
    pub fn encode_io<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<CompressionStats> {
        let source = ReadSource::with_config(reader, &self.config.stream);
        let sink = WriteSink::with_config(writer, &self.config.stream);
        self.encode_stream(source, sink)
    }

    /// [`decode_stream`](Self::decode_stream) over `std::io` types.
    pub fn decode_io<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<CompressionStats> {
        let source = ReadSource::with_config(reader, &self.config.stream);
        let sink = WriteSink::with_config(writer, &self.config.stream);
        self.decode_stream(source, sink)
    }
}

impl Compressor for HuffmanCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Huffman
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        write_container(&encode(input)?)
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        MAX_HEADER_BYTES + input_len.saturating_mul(MAX_CODE_BITS).div_ceil(8)
    }
}

impl Decompressor for HuffmanCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Huffman
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        decode_encoded(&self.read(input)?)
    }
}

impl Codec for HuffmanCodec {
    fn new() -> Self {
        Self::default()
    }
}
