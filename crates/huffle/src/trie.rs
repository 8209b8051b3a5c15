//! Huffman trie construction and longest-prefix matching.
//!
//! ## Construction
//!
//! Every symbol with a positive count becomes a leaf. Leaves go into a
//! min-priority queue keyed on `(weight, sequence)`, where `sequence` is the
//! insertion order: leaves in ascending symbol order first, then each merged
//! node as it is created. The two smallest entries are repeatedly merged,
//! the first extracted becoming the `0` (left) child, until a single root is
//! left. Because the key is a total order, equal weights never fall back on
//! heap internals and the same table always yields the same trie.
//!
//! A table with exactly one live symbol gets a zero-weight placeholder leaf
//! (`0x00`, or `0x01` when the live symbol is `0x00`) so that its codeword
//! is one bit long rather than empty.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use huffle_core::Symbol;
use thiserror::Error;
use tracing::{debug, trace};

use crate::bits::BitSequence;
use crate::frequency::FrequencyTable;
use crate::table::CodeTable;

/// Preferred placeholder symbol for single-symbol alphabets.
pub const PLACEHOLDER_SYMBOL: Symbol = 0x00;

/// Placeholder used when the live symbol is [`PLACEHOLDER_SYMBOL`] itself.
pub const PLACEHOLDER_FALLBACK: Symbol = 0x01;

/// A node of the trie. Internal nodes own both children exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieNode {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        left: Box<TrieNode>,
        right: Box<TrieNode>,
        weight: u64,
    },
}

impl TrieNode {
    /// Frequency of a leaf, or the sum of a subtree.
    pub fn weight(&self) -> u64 {
        match self {
            TrieNode::Leaf { weight, .. } | TrieNode::Internal { weight, .. } => *weight,
        }
    }

    /// Check if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, TrieNode::Leaf { .. })
    }

    /// Combine two subtrees; `left` is the `0` branch.
    fn merge(left: TrieNode, right: TrieNode) -> TrieNode {
        TrieNode::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            TrieNode::Leaf { .. } => 1,
            TrieNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            TrieNode::Leaf { .. } => 0,
            TrieNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Queue entry ordered so that `BinaryHeap` pops the lightest, then oldest, node.
struct Pending {
    weight: u64,
    sequence: u64,
    node: TrieNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is max-heap, so we reverse
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Result of a successful longest-prefix match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    sequence: BitSequence,
    symbol: Symbol,
}

impl Match {
    /// Bits consumed to reach the leaf.
    pub fn sequence(&self) -> &BitSequence {
        &self.sequence
    }

    /// Symbol at the leaf.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Number of bits consumed.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if no bits were consumed.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Why a longest-prefix match produced no symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The trie has no root.
    #[error("trie is empty")]
    EmptyTrie,

    /// The bits ran out before a leaf was reached.
    #[error("bits exhausted inside the trie after {consumed} bits")]
    Truncated { consumed: usize },
}

/// Binary trie whose root-to-leaf paths are prefix-free codewords.
///
/// Immutable once built: a new table means a new trie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTrie {
    root: Option<TrieNode>,
}

impl HuffmanTrie {
    /// A trie with no root. Every match against it fails.
    pub fn empty() -> Self {
        Self { root: None }
    }

    /// Build the trie for `table`. Zero counts are ignored.
    pub fn from_frequencies(table: &FrequencyTable) -> Self {
        let mut heap = BinaryHeap::with_capacity(table.len() + 1);
        let mut sequence = 0u64;
        let mut push = |heap: &mut BinaryHeap<Pending>, node: TrieNode| {
            heap.push(Pending {
                weight: node.weight(),
                sequence,
                node,
            });
            sequence += 1;
        };

        for (symbol, weight) in table.iter().filter(|&(_, count)| count > 0) {
            push(&mut heap, TrieNode::Leaf { symbol, weight });
        }

        if heap.is_empty() {
            debug!("no symbols with positive frequency, trie is empty");
            return Self::empty();
        }

        if let Some(only) = single_symbol(&heap) {
            let placeholder = if only == PLACEHOLDER_SYMBOL {
                PLACEHOLDER_FALLBACK
            } else {
                PLACEHOLDER_SYMBOL
            };
            trace!(symbol = only, placeholder, "injecting placeholder leaf");
            push(
                &mut heap,
                TrieNode::Leaf {
                    symbol: placeholder,
                    weight: 0,
                },
            );
        }

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            debug_assert!(left.weight <= right.weight);
            push(&mut heap, TrieNode::merge(left.node, right.node));
        }

        let root = heap.pop().map(|entry| entry.node);
        let trie = Self { root };
        debug!(
            leaves = trie.leaf_count(),
            depth = trie.depth(),
            weight = trie.root().map_or(0, TrieNode::weight),
            "built huffman trie"
        );
        trie
    }

    /// Wrap an already-validated root.
    pub(crate) fn from_root(root: Option<TrieNode>) -> Self {
        Self { root }
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<&TrieNode> {
        self.root.as_ref()
    }

    /// Check if the trie has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of leaves, placeholder included.
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, TrieNode::leaf_count)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, TrieNode::depth)
    }

    /// Walk from the root consuming one bit per step (`0` left, `1` right)
    /// until a leaf is reached.
    ///
    /// Fails with [`MatchError::EmptyTrie`] if there is no root and with
    /// [`MatchError::Truncated`] if `bits` runs out before a leaf.
    pub fn longest_prefix_match(&self, bits: &BitSequence) -> Result<Match, MatchError> {
        let mut node = self.root.as_ref().ok_or(MatchError::EmptyTrie)?;
        let mut consumed = 0;
        loop {
            match node {
                TrieNode::Leaf { symbol, .. } => {
                    return Ok(Match {
                        sequence: bits.slice(0, consumed),
                        symbol: *symbol,
                    });
                }
                TrieNode::Internal { left, right, .. } => {
                    let bit = bits
                        .get(consumed)
                        .ok_or(MatchError::Truncated { consumed })?;
                    node = if bit { &**right } else { &**left };
                    consumed += 1;
                }
            }
        }
    }

    /// Codeword of every leaf.
    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_trie(self)
    }
}

/// The symbol of the only queued leaf, if exactly one is queued.
fn single_symbol(heap: &BinaryHeap<Pending>) -> Option<Symbol> {
    if heap.len() != 1 {
        return None;
    }
    match heap.peek().map(|entry| &entry.node) {
        Some(TrieNode::Leaf { symbol, .. }) => Some(*symbol),
        _ => None,
    }
}
