//! Symbols, algorithm identifiers and size ratios.

/// One 8-bit code unit. Never interpreted as text.
pub type Symbol = u8;

/// Number of distinct symbols in the alphabet.
pub const ALPHABET_SIZE: usize = 256;

/// Supported compression algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Static Huffman coding over an explicit binary trie.
    Huffman,
}

impl Algorithm {
    /// Get algorithm name as string.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Huffman => "huffman",
        }
    }
}

impl core::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Container size against message size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionRatio {
    /// Message length in bytes.
    pub original_size: usize,
    /// Container length in bytes.
    pub compressed_size: usize,
}

impl CompressionRatio {
    pub fn new(original_size: usize, compressed_size: usize) -> Self {
        Self {
            original_size,
            compressed_size,
        }
    }

    /// `original / compressed`; zero when nothing was produced.
    pub fn ratio(&self) -> f64 {
        match self.compressed_size {
            0 => 0.0,
            n => self.original_size as f64 / n as f64,
        }
    }

    /// Container bits spent per message byte. Eight means no gain.
    pub fn bits_per_byte(&self) -> f64 {
        match self.original_size {
            0 => 0.0,
            n => (self.compressed_size * 8) as f64 / n as f64,
        }
    }

    /// True if the container is smaller than the message.
    pub fn is_effective(&self) -> bool {
        self.compressed_size < self.original_size
    }
}
