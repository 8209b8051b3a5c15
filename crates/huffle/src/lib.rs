//! # Huffle
//!
//! Lossless Huffman compression of byte messages through an explicit binary
//! trie.
//!
//! Encoding counts symbol frequencies, builds the trie by repeatedly merging
//! the two lightest nodes, derives a prefix-free code table from it and packs
//! the message as concatenated codewords. Decoding walks the trie with
//! repeated longest-prefix matches until the recorded symbol count has been
//! produced.
//!
//! ## Quick Start
//!
//! ```ignore
//! use huffle::{Codec, Compressor, Decompressor, HuffmanCodec};
//!
//! let codec = HuffmanCodec::new();
//! let compressed = codec.compress(b"abracadabra")?;
//! let original = codec.decompress(&compressed)?;
//! ```
//!
//! The pipeline stages are usable on their own:
//!
//! ```ignore
//! use huffle::{decode_encoded, encode};
//!
//! let encoded = encode(b"aaaa")?;
//! assert_eq!(encoded.bits.to_string(), "1111");
//! assert_eq!(decode_encoded(&encoded)?, b"aaaa");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/Deserialize for configuration and statistics

pub mod bits;
pub mod codec;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod table;
pub mod trie;

pub use bits::{BitReader, BitSequence, BitWriter};
pub use codec::{CodecConfig, HuffmanCodec};
pub use container::{
    ContainerReader, ContainerWriter, MAGIC, PackedReader, PackedWriter, read_container,
    write_container,
};
pub use decoder::{decode, decode_encoded};
pub use encoder::{Encoded, MAX_SYMBOL_COUNT, encode};
pub use frequency::FrequencyTable;
pub use table::CodeTable;
pub use trie::{HuffmanTrie, Match, MatchError, TrieNode};

pub use huffle_core::{
    ALPHABET_SIZE, Algorithm, ByteSink, ByteSource, Codec, CompressionRatio, CompressionStats,
    Compressor, Decompressor, Error, ReadSource, Result, SliceSource, StreamConfig, Symbol,
    WriteSink,
};
