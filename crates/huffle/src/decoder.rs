//! Decode pipeline: repeated longest-prefix matches over the packed bits.

use huffle_core::{Error, Result, Symbol};
use tracing::{debug, warn};

use crate::bits::BitSequence;
use crate::encoder::Encoded;
use crate::trie::{HuffmanTrie, MatchError};

/// Decode exactly `symbol_count` symbols from `bits`.
///
/// The count, not the bit length, bounds decoding: bits left after the last
/// symbol are never looked at. A zero count yields nothing whatever the trie.
pub fn decode(trie: &HuffmanTrie, symbol_count: usize, bits: &BitSequence) -> Result<Vec<Symbol>> {
    // every codeword of a well-formed trie is at least one bit long
    let mut output = Vec::with_capacity(symbol_count.min(bits.len()));
    let mut offset = 0;

    for symbol_index in 0..symbol_count {
        let remaining = bits.skip(offset);
        let matched = trie
            .longest_prefix_match(&remaining)
            .map_err(|e| match_error(e, symbol_index, offset))?;
        output.push(matched.symbol());
        offset += matched.len();
    }

    debug!(
        symbols = symbol_count,
        consumed_bits = offset,
        unused_bits = bits.len() - offset,
        "decoded message"
    );
    Ok(output)
}

/// Decode an [`Encoded`] message.
pub fn decode_encoded(encoded: &Encoded) -> Result<Vec<Symbol>> {
    decode(&encoded.trie, encoded.symbol_count, &encoded.bits)
}

fn match_error(error: MatchError, symbol_index: usize, bit_offset: usize) -> Error {
    warn!(symbol_index, bit_offset, %error, "decode stopped");
    match error {
        MatchError::EmptyTrie => Error::MatchFailure {
            reason: "trie is empty",
        },
        MatchError::Truncated { .. } => Error::TruncatedDecode {
            symbol_index,
            bit_offset,
        },
    }
}
