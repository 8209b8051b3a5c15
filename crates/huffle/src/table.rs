//! Symbol to codeword lookup.

use std::collections::BTreeMap;

use huffle_core::Symbol;

use crate::bits::BitSequence;
use crate::trie::{HuffmanTrie, TrieNode};

/// Codeword of every leaf of a [`HuffmanTrie`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, BitSequence>,
}

impl CodeTable {
    /// Collect the root-to-leaf path of every leaf, `0` for left and `1` for right.
    pub fn from_trie(trie: &HuffmanTrie) -> Self {
        let mut codes = BTreeMap::new();
        if let Some(root) = trie.root() {
            let mut path = Vec::with_capacity(trie.depth());
            collect(root, &mut path, &mut codes);
        }
        Self { codes }
    }

    /// Codeword for `symbol`.
    pub fn get(&self, symbol: Symbol) -> Option<&BitSequence> {
        self.codes.get(&symbol)
    }

    /// Check if `symbol` has a codeword.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.codes.contains_key(&symbol)
    }

    /// Number of codewords.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codewords in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSequence)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }
}

fn collect(node: &TrieNode, path: &mut Vec<bool>, codes: &mut BTreeMap<Symbol, BitSequence>) {
    match node {
        TrieNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, BitSequence::from_bits(path.iter().copied()));
        }
        TrieNode::Internal { left, right, .. } => {
            path.push(false);
            collect(left, path, codes);
            path.pop();

            path.push(true);
            collect(right, path, codes);
            path.pop();
        }
    }
}
