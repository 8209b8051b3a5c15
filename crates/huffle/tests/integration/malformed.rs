//! Damaged and hostile containers must be rejected, never decoded into
//! fabricated symbols.

use huffle::{
    BitWriter, Codec, CodecConfig, Decompressor, Error, HuffmanCodec, HuffmanTrie, MAGIC,
    decode, decode_encoded, encode, read_container, write_container,
};

use super::init_tracing;

/// Header bits shared by hand-built containers.
fn header() -> BitWriter {
    let mut writer = BitWriter::new();
    for byte in MAGIC {
        writer.push_bits(byte as u64, 8);
    }
    writer
}

fn push_lengths(writer: &mut BitWriter, count: u32, bit_len: u64) {
    writer.push_bits(count as u64, 32);
    writer.push_bits(bit_len >> 32, 32);
    writer.push_bits(bit_len & 0xFFFF_FFFF, 32);
}

#[test]
fn test_bad_magic() {
    init_tracing();
    let mut container = write_container(&encode(b"hello").unwrap()).unwrap();
    container[0] = b'X';
    let err = read_container(container).unwrap_err();
    assert_eq!(err.category(), "corrupted_data");
}

#[test]
fn test_too_short_for_magic() {
    let err = read_container(b"HU".to_vec()).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof { .. }));
}

#[test]
fn test_every_truncation_fails() {
    let container = write_container(&encode(b"mississippi river").unwrap()).unwrap();
    for len in 0..container.len() {
        assert!(
            read_container(container[..len].to_vec()).is_err(),
            "truncated to {} bytes still parsed",
            len
        );
    }
}

#[test]
fn test_trailing_bytes() {
    let mut container = write_container(&encode(b"hello").unwrap()).unwrap();
    container.push(0);
    let err = read_container(container).unwrap_err();
    assert_eq!(err.category(), "corrupted_data");
}

#[test]
fn test_leaf_root() {
    let mut writer = header();
    writer.push_bit(true); // has trie
    writer.push_bit(true); // root is a leaf
    writer.push_bits(b'a' as u64, 8);
    push_lengths(&mut writer, 0, 0);

    let err = read_container(writer.finish_bytes()).unwrap_err();
    assert_eq!(err.category(), "corrupted_data");
}

#[test]
fn test_duplicate_leaves() {
    let mut writer = header();
    writer.push_bit(true);
    writer.push_bit(false); // internal root
    writer.push_bit(true);
    writer.push_bits(b'a' as u64, 8);
    writer.push_bit(true);
    writer.push_bits(b'a' as u64, 8);
    push_lengths(&mut writer, 0, 0);

    let err = read_container(writer.finish_bytes()).unwrap_err();
    assert_eq!(err.category(), "corrupted_data");
}

#[test]
fn test_declared_bits_exceed_input() {
    let mut writer = header();
    writer.push_bit(true);
    writer.push_bit(false);
    writer.push_bit(true);
    writer.push_bits(b'a' as u64, 8);
    writer.push_bit(true);
    writer.push_bits(b'b' as u64, 8);
    push_lengths(&mut writer, 2, 1 << 40);
    writer.push_bits(0b01, 2);

    let err = read_container(writer.finish_bytes()).unwrap_err();
    assert_eq!(err.category(), "corrupted_data");
}

#[test]
fn test_count_beyond_bits_is_truncated_decode() {
    let mut encoded = encode(b"abc").unwrap();
    encoded.symbol_count += 1;
    let container = write_container(&encoded).unwrap();

    let err = HuffmanCodec::new().decompress(&container).unwrap_err();
    assert!(!err.is_recoverable());
    match err {
        Error::TruncatedDecode {
            symbol_index,
            bit_offset,
        } => {
            assert_eq!(symbol_index, 3);
            assert_eq!(bit_offset, encoded.bits.len());
        }
        other => panic!("expected truncated decode, got {other:?}"),
    }
}

#[test]
fn test_nonzero_symbols_with_empty_trie() {
    let mut writer = header();
    writer.push_bit(false); // no trie
    push_lengths(&mut writer, 3, 0);

    let err = read_container(writer.finish_bytes())
        .and_then(|encoded| decode_encoded(&encoded))
        .unwrap_err();
    assert!(matches!(err, Error::MatchFailure { .. }));
}

#[test]
fn test_match_against_empty_trie() {
    let bits = "0101".parse().unwrap();
    let err = decode(&HuffmanTrie::empty(), 1, &bits).unwrap_err();
    assert_eq!(err.category(), "match_failure");
    assert!(!err.is_recoverable());
}

#[test]
fn test_padding_verification() {
    let mut container = write_container(&encode(b"aab").unwrap()).unwrap();
    let last = container.len() - 1;
    container[last] |= 0x01;

    // padding is ignored unless asked for
    assert_eq!(HuffmanCodec::new().decompress(&container).unwrap(), b"aab");

    let strict = HuffmanCodec::with_config(CodecConfig {
        verify_padding: true,
        ..Default::default()
    });
    let err = strict.decompress(&container).unwrap_err();
    assert_eq!(err.category(), "corrupted_data");
}
