//! Worked examples with known tries and codewords.

use huffle::{
    BitSequence, FrequencyTable, HuffmanTrie, TrieNode, decode, decode_encoded, encode,
    read_container, write_container,
};

use super::init_tracing;

fn scenario_trie() -> HuffmanTrie {
    HuffmanTrie::from_frequencies(&FrequencyTable::from_counts([
        (b'a', 1),
        (b'b', 2),
        (b'c', 4),
        (b'd', 5),
        (b'e', 6),
    ]))
}

fn code(trie: &HuffmanTrie, symbol: u8) -> String {
    trie.code_table()
        .get(symbol)
        .map(ToString::to_string)
        .unwrap_or_default()
}

#[test]
fn test_five_symbol_scenario() {
    init_tracing();
    let trie = scenario_trie();

    assert_eq!(trie.leaf_count(), 5);
    assert_eq!(trie.depth(), 3);
    assert_eq!(trie.root().map(TrieNode::weight), Some(18));

    // a and b are the two lightest, so they sit deepest as siblings
    assert_eq!(code(&trie, b'a'), "000");
    assert_eq!(code(&trie, b'b'), "001");
    assert_eq!(code(&trie, b'c'), "01");
    assert_eq!(code(&trie, b'd'), "10");
    assert_eq!(code(&trie, b'e'), "11");

    let table = trie.code_table();
    let a = table.get(b'a').unwrap();
    assert!(a.len() >= 3);
    for (symbol, other) in table.iter() {
        if symbol == b'a' {
            continue;
        }
        let n = other.len().min(a.len());
        assert_ne!(a.slice(0, n), other.slice(0, n), "{} shares a prefix with a", symbol);
    }
}

#[test]
fn test_five_symbol_scenario_decodes_every_codeword() {
    let trie = scenario_trie();
    let bits: BitSequence = "000001011011".parse().unwrap();
    assert_eq!(decode(&trie, 5, &bits).unwrap(), b"abcde");
}

#[test]
fn test_singleton_scenario() {
    init_tracing();
    let encoded = encode(b"aaaa").unwrap();

    assert_eq!(encoded.symbol_count, 4);
    assert_eq!(encoded.trie.leaf_count(), 2);
    assert_eq!(code(&encoded.trie, b'a'), "1");
    assert_eq!(code(&encoded.trie, 0x00), "0");
    assert_eq!(encoded.bits.to_string(), "1111");

    assert_eq!(decode_encoded(&encoded).unwrap(), b"aaaa");
}

#[test]
fn test_singleton_of_placeholder_symbol() {
    let encoded = encode(&[0x00; 3]).unwrap();
    assert_eq!(code(&encoded.trie, 0x00), "1");
    assert_eq!(code(&encoded.trie, 0x01), "0");
    assert_eq!(decode_encoded(&encoded).unwrap(), vec![0x00; 3]);
}

#[test]
fn test_empty_scenario() {
    let encoded = encode(b"").unwrap();
    assert!(encoded.is_empty());
    assert!(encoded.trie.is_empty());
    assert!(encoded.bits.is_empty());
    assert!(decode_encoded(&encoded).unwrap().is_empty());

    // count zero ignores whatever trie and bits are supplied
    let bits: BitSequence = "0101".parse().unwrap();
    assert!(decode(&scenario_trie(), 0, &bits).unwrap().is_empty());
}

#[test]
fn test_container_preserves_codes() {
    for input in [&b""[..], b"aaaa", b"abracadabra", b"The quick brown fox"] {
        let encoded = encode(input).unwrap();
        let restored = read_container(write_container(&encoded).unwrap()).unwrap();

        assert_eq!(restored.symbol_count, encoded.symbol_count);
        assert_eq!(restored.bits, encoded.bits);
        assert_eq!(restored.trie.code_table(), encoded.trie.code_table());
        assert_eq!(decode_encoded(&restored).unwrap(), input);
    }
}

#[test]
fn test_all_byte_values() {
    let input: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let encoded = encode(&input).unwrap();
    assert_eq!(encoded.trie.leaf_count(), 256);
    // uniform counts give a complete trie
    assert_eq!(encoded.trie.depth(), 8);
    assert_eq!(encoded.bits.len(), 4096 * 8);
    assert_eq!(decode_encoded(&encoded).unwrap(), input);
}
