//! Per-operation statistics.

use core::fmt;

use crate::types::{Algorithm, CompressionRatio};

/// What a single compress or decompress call did.
///
/// `original_size` is always the message length and `compressed_size`
/// the container length, whichever direction the call ran.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressionStats {
    pub algorithm: Option<Algorithm>,

    /// Message length in bytes.
    pub original_size: usize,

    /// Container length in bytes.
    pub compressed_size: usize,

    /// Length of the concatenated codeword stream in bits.
    pub encoded_bits: usize,

    /// Number of leaves in the trie, placeholder included.
    pub leaf_count: usize,

    /// Wall time in microseconds.
    pub time_us: u64,
}

impl CompressionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats for a finished call; trie figures are filled in by the caller.
    pub fn from_operation(
        algorithm: Algorithm,
        original_size: usize,
        compressed_size: usize,
        time_us: u64,
    ) -> Self {
        CompressionStats {
            algorithm: Some(algorithm),
            original_size,
            compressed_size,
            time_us,
            ..Default::default()
        }
    }

    pub fn ratio(&self) -> CompressionRatio {
        CompressionRatio::new(self.original_size, self.compressed_size)
    }

    /// Average codeword length, excluding container overhead.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.encoded_bits as f64 / self.original_size as f64
    }

    /// Message bytes per second.
    pub fn throughput_bps(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.original_size as f64 * 1_000_000.0 / self.time_us as f64
    }

    /// Bits of container spent on framing and the trie.
    pub fn overhead_bits(&self) -> usize {
        (self.compressed_size * 8).saturating_sub(self.encoded_bits)
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} bytes, {} leaves, {:.3} bits/symbol, {} us",
            self.original_size,
            self.compressed_size,
            self.leaf_count,
            self.bits_per_symbol(),
            self.time_us,
        )
    }
}
