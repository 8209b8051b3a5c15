//! Encode pipeline: symbols to trie, count and packed codewords.

use huffle_core::{Error, Result, Symbol};
use tracing::debug;

use crate::bits::{BitSequence, BitWriter};
use crate::frequency::FrequencyTable;
use crate::table::CodeTable;
use crate::trie::HuffmanTrie;

/// Largest message a container can describe.
pub const MAX_SYMBOL_COUNT: usize = u32::MAX as usize;

/// Everything needed to decode a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    /// Trie the codewords were drawn from.
    pub trie: HuffmanTrie,
    /// Number of symbols in the original message.
    pub symbol_count: usize,
    /// Codewords of the message, concatenated in message order.
    pub bits: BitSequence,
}

impl Encoded {
    /// Check if this encodes the empty message.
    pub fn is_empty(&self) -> bool {
        self.symbol_count == 0
    }
}

/// Encode `symbols`.
///
/// Empty input is not an error: it yields an empty trie, a count of zero and
/// no bits.
pub fn encode(symbols: &[Symbol]) -> Result<Encoded> {
    if symbols.len() > MAX_SYMBOL_COUNT {
        return Err(Error::limit_exceeded(
            "symbol count",
            MAX_SYMBOL_COUNT as u64,
            symbols.len() as u64,
        ));
    }

    let frequencies = FrequencyTable::from_symbols(symbols);
    let trie = HuffmanTrie::from_frequencies(&frequencies);
    let table = trie.code_table();
    let bits = pack(symbols, &table)?;

    debug!(
        symbols = symbols.len(),
        distinct = frequencies.len(),
        bits = bits.len(),
        "encoded message"
    );

    Ok(Encoded {
        trie,
        symbol_count: symbols.len(),
        bits,
    })
}

/// Concatenate the codeword of each symbol in message order.
fn pack(symbols: &[Symbol], table: &CodeTable) -> Result<BitSequence> {
    let mut writer = BitWriter::with_capacity(symbols.len() / 2);
    for &symbol in symbols {
        let code = table
            .get(symbol)
            .ok_or(Error::InternalConsistency { symbol })?;
        writer.push_sequence(code);
    }
    Ok(writer.finish())
}
