//! Symbol frequency counting.

use std::collections::BTreeMap;

use huffle_core::{ALPHABET_SIZE, ByteSource, Result, Symbol};

/// Occurrence count of each distinct symbol in a message.
///
/// Iteration is always in ascending symbol order, which is what makes trie
/// construction reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyTable {
    /// Count every symbol of `symbols`.
    pub fn from_symbols(symbols: &[Symbol]) -> Self {
        let mut histogram = [0u64; ALPHABET_SIZE];
        for &symbol in symbols {
            histogram[symbol as usize] += 1;
        }
        Self::from_histogram(&histogram)
    }

    /// Count every symbol a source yields, draining it.
    pub fn from_source<S: ByteSource>(source: &mut S) -> Result<Self> {
        let mut histogram = [0u64; ALPHABET_SIZE];
        while let Some(symbol) = source.next_symbol()? {
            histogram[symbol as usize] += 1;
        }
        Ok(Self::from_histogram(&histogram))
    }

    /// Build from explicit `(symbol, count)` pairs. Later duplicates win.
    ///
    /// Zero counts are kept as entries; trie construction ignores them.
    pub fn from_counts<I: IntoIterator<Item = (Symbol, u64)>>(counts: I) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    fn from_histogram(histogram: &[u64; ALPHABET_SIZE]) -> Self {
        let counts = histogram
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as Symbol, count))
            .collect();
        Self { counts }
    }

    /// Count for `symbol`, zero if absent.
    pub fn get(&self, symbol: Symbol) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}
