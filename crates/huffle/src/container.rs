//! Typed container for encoded messages.
//!
//! A container holds exactly three values, always in this order: the trie,
//! the symbol count and the codeword bits. [`ContainerWriter`] and
//! [`ContainerReader`] are the contract; [`PackedWriter`] and
//! [`PackedReader`] implement it as a single MSB-first bit stream:
//!
//! ```text
//! magic       32 bits   "HUF1"
//! has_trie     1 bit    0 = empty trie, nothing else for the trie
//! trie         preorder, per node: 1 + 8-bit symbol (leaf)
//!                                  0 + left + right (internal)
//! count       32 bits   number of symbols
//! bit_len     64 bits   length of the codeword stream
//! codewords   bit_len bits, then zero padding to a byte boundary
//! ```
//!
//! Node weights are not stored; a trie read back has all weights zero.

use bytes::Bytes;
use huffle_core::{ALPHABET_SIZE, Error, Result, Symbol};
use tracing::{debug, trace};

use crate::bits::{BitReader, BitSequence, BitWriter};
use crate::encoder::{Encoded, MAX_SYMBOL_COUNT};
use crate::trie::{HuffmanTrie, TrieNode};

/// Leading bytes of every container.
pub const MAGIC: [u8; 4] = *b"HUF1";

/// Deepest trie a 256-symbol alphabet can produce.
pub const MAX_TRIE_DEPTH: usize = ALPHABET_SIZE - 1;

/// Bits used for the symbol count.
const COUNT_BITS: u8 = 32;

/// Writes the three container values in order.
pub trait ContainerWriter {
    /// Write the trie. Must come first.
    fn write_trie(&mut self, trie: &HuffmanTrie) -> Result<()>;

    /// Write the symbol count. Must follow the trie.
    fn write_symbol_count(&mut self, count: usize) -> Result<()>;

    /// Write the codeword bits. Must follow the symbol count.
    fn write_bits(&mut self, bits: &BitSequence) -> Result<()>;
}

/// Reads the three container values in order.
pub trait ContainerReader {
    /// Read the trie. Must come first.
    fn read_trie(&mut self) -> Result<HuffmanTrie>;

    /// Read the symbol count. Must follow the trie.
    fn read_symbol_count(&mut self) -> Result<usize>;

    /// Read the codeword bits. Must follow the symbol count.
    fn read_bits(&mut self) -> Result<BitSequence>;
}

/// Which value comes next.
///
/// `Failed` is terminal: once a step errors, the stream position is no
/// longer meaningful and every later call is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Trie,
    SymbolCount,
    Bits,
    Done,
    Failed,
}

impl Stage {
    fn name(self) -> &'static str {
        match self {
            Stage::Trie => "trie",
            Stage::SymbolCount => "symbol count",
            Stage::Bits => "bits",
            Stage::Done => "end of container",
            Stage::Failed => "nothing after a failed step",
        }
    }

    fn next(self) -> Stage {
        match self {
            Stage::Trie => Stage::SymbolCount,
            Stage::SymbolCount => Stage::Bits,
            Stage::Bits | Stage::Done => Stage::Done,
            Stage::Failed => Stage::Failed,
        }
    }

    fn expect(self, requested: Stage) -> Result<()> {
        if self != requested {
            return Err(Error::InvalidState {
                expected: self.name(),
                actual: requested.name(),
            });
        }
        Ok(())
    }
}

/// Bit-packed [`ContainerWriter`].
#[derive(Debug)]
pub struct PackedWriter {
    writer: BitWriter,
    stage: Stage,
}

impl PackedWriter {
    /// Start a container, writing the magic.
    pub fn new() -> Self {
        let mut writer = BitWriter::new();
        for byte in MAGIC {
            writer.push_bits(byte as u64, 8);
        }
        Self {
            writer,
            stage: Stage::Trie,
        }
    }

    /// Finish the container, padding to a byte boundary.
    pub fn finish(self) -> Result<Vec<u8>> {
        self.stage.expect(Stage::Done)?;
        Ok(self.writer.finish_bytes())
    }

    /// Run `op` as stage `requested`, moving on only if it succeeds.
    fn step<T>(&mut self, requested: Stage, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.stage.expect(requested)?;
        let result = op(self);
        self.stage = if result.is_ok() {
            requested.next()
        } else {
            Stage::Failed
        };
        result
    }

    fn write_node(&mut self, node: &TrieNode) {
        match node {
            TrieNode::Leaf { symbol, .. } => {
                self.writer.push_bit(true);
                self.writer.push_bits(*symbol as u64, 8);
            }
            TrieNode::Internal { left, right, .. } => {
                self.writer.push_bit(false);
                self.write_node(left);
                self.write_node(right);
            }
        }
    }
}

impl Default for PackedWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerWriter for PackedWriter {
    fn write_trie(&mut self, trie: &HuffmanTrie) -> Result<()> {
        self.step(Stage::Trie, |this| {
            match trie.root() {
                None => this.writer.push_bit(false),
                Some(root) => {
                    this.writer.push_bit(true);
                    this.write_node(root);
                }
            }
            Ok(())
        })
    }

    fn write_symbol_count(&mut self, count: usize) -> Result<()> {
        self.step(Stage::SymbolCount, |this| {
            if count > MAX_SYMBOL_COUNT {
                return Err(Error::limit_exceeded(
                    "symbol count",
                    MAX_SYMBOL_COUNT as u64,
                    count as u64,
                ));
            }
            this.writer.push_bits(count as u64, COUNT_BITS);
            Ok(())
        })
    }

    fn write_bits(&mut self, bits: &BitSequence) -> Result<()> {
        self.step(Stage::Bits, |this| {
            let len = bits.len() as u64;
            this.writer.push_bits(len >> 32, 32);
            this.writer.push_bits(len & 0xFFFF_FFFF, 32);
            this.writer.push_sequence(bits);
            Ok(())
        })
    }
}

/// Bit-packed [`ContainerReader`].
#[derive(Debug)]
pub struct PackedReader {
    reader: BitReader,
    stage: Stage,
    max_symbol_count: usize,
    verify_padding: bool,
}

impl PackedReader {
    /// Open a container, checking the magic.
    pub fn new(data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        let total = data.len() * 8;
        let mut reader = BitReader::new(BitSequence::from_packed(data, total)?);

        let magic = reader.read_bits(32)?;
        if magic != u32::from_be_bytes(MAGIC) as u64 {
            return Err(Error::corrupted(format!("bad magic 0x{magic:08x}")));
        }

        Ok(Self {
            reader,
            stage: Stage::Trie,
            max_symbol_count: MAX_SYMBOL_COUNT,
            verify_padding: false,
        })
    }

    /// Reject containers declaring more than `limit` symbols.
    pub fn max_symbol_count(mut self, limit: usize) -> Self {
        self.max_symbol_count = limit;
        self
    }

    /// Require the padding bits to be zero.
    pub fn verify_padding(mut self, verify: bool) -> Self {
        self.verify_padding = verify;
        self
    }

    /// Check that only padding is left.
    pub fn finish(mut self) -> Result<()> {
        self.stage.expect(Stage::Done)?;
        let remaining = self.reader.remaining();
        if remaining >= 8 {
            return Err(Error::corrupted_at(
                format!("{} trailing bytes", remaining / 8),
                self.reader.position(),
            ));
        }
        if self.verify_padding && self.reader.read_bits(remaining)? != 0 {
            return Err(Error::corrupted_at("non-zero padding", self.reader.position()));
        }
        Ok(())
    }

    /// Run `op` as stage `requested`, moving on only if it succeeds.
    fn step<T>(&mut self, requested: Stage, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.stage.expect(requested)?;
        let result = op(self);
        self.stage = if result.is_ok() {
            requested.next()
        } else {
            Stage::Failed
        };
        result
    }

    fn read_node(&mut self, depth: usize, seen: &mut [bool; ALPHABET_SIZE]) -> Result<TrieNode> {
        if depth > MAX_TRIE_DEPTH {
            return Err(Error::corrupted_at(
                format!("trie deeper than {MAX_TRIE_DEPTH}"),
                self.reader.position(),
            ));
        }
        if self.reader.read_bit()? {
            let symbol = self.reader.read_bits(8)? as Symbol;
            if std::mem::replace(&mut seen[symbol as usize], true) {
                return Err(Error::corrupted_at(
                    format!("duplicate leaf 0x{symbol:02x}"),
                    self.reader.position(),
                ));
            }
            Ok(TrieNode::Leaf { symbol, weight: 0 })
        } else {
            let left = self.read_node(depth + 1, seen)?;
            let right = self.read_node(depth + 1, seen)?;
            Ok(TrieNode::Internal {
                left: Box::new(left),
                right: Box::new(right),
                weight: 0,
            })
        }
    }
}

impl ContainerReader for PackedReader {
    fn read_trie(&mut self) -> Result<HuffmanTrie> {
        self.step(Stage::Trie, |this| {
            if !this.reader.read_bit()? {
                return Ok(HuffmanTrie::empty());
            }
            let mut seen = [false; ALPHABET_SIZE];
            let root = this.read_node(0, &mut seen)?;
            if root.is_leaf() {
                // a lone leaf would have an empty codeword
                return Err(Error::corrupted("trie root is a leaf"));
            }
            let trie = HuffmanTrie::from_root(Some(root));
            trace!(leaves = trie.leaf_count(), depth = trie.depth(), "read trie");
            Ok(trie)
        })
    }

    fn read_symbol_count(&mut self) -> Result<usize> {
        self.step(Stage::SymbolCount, |this| {
            let count = this.reader.read_bits(COUNT_BITS as usize)? as usize;
            if count > this.max_symbol_count {
                return Err(Error::limit_exceeded(
                    "symbol count",
                    this.max_symbol_count as u64,
                    count as u64,
                ));
            }
            Ok(count)
        })
    }

    fn read_bits(&mut self) -> Result<BitSequence> {
        self.step(Stage::Bits, |this| {
            let len = (this.reader.read_bits(32)? << 32) | this.reader.read_bits(32)?;
            let remaining = this.reader.remaining() as u64;
            if len > remaining {
                return Err(Error::corrupted_at(
                    format!("codeword stream declares {len} bits but {remaining} remain"),
                    this.reader.position(),
                ));
            }
            this.reader.take(len as usize)
        })
    }
}

/// Serialize an encoded message.
pub fn write_container(encoded: &Encoded) -> Result<Vec<u8>> {
    let mut writer = PackedWriter::new();
    writer.write_trie(&encoded.trie)?;
    writer.write_symbol_count(encoded.symbol_count)?;
    writer.write_bits(&encoded.bits)?;
    let bytes = writer.finish()?;
    debug!(
        bytes = bytes.len(),
        symbols = encoded.symbol_count,
        "wrote container"
    );
    Ok(bytes)
}

/// Parse a container with default limits.
pub fn read_container(data: impl Into<Bytes>) -> Result<Encoded> {
    read_from(PackedReader::new(data)?)
}

/// Read all three values from `reader` and check nothing follows them.
pub(crate) fn read_from(mut reader: PackedReader) -> Result<Encoded> {
    let trie = reader.read_trie()?;
    let symbol_count = reader.read_symbol_count()?;
    let bits = reader.read_bits()?;
    reader.finish()?;
    debug!(symbols = symbol_count, bits = bits.len(), "read container");
    Ok(Encoded {
        trie,
        symbol_count,
        bits,
    })
}
