//! Byte source and sink entry points.

use std::io::{self, Cursor, Read};

use huffle::{
    Codec, CodecConfig, Compressor, HuffmanCodec, ReadSource, SliceSource, StreamConfig,
    WriteSink,
};

use super::init_tracing;

/// Reader that hands out at most three bytes per call.
struct Dribble<'a>(&'a [u8]);

impl Read for Dribble<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.0.len().min(buf.len()).min(3);
        buf[..n].copy_from_slice(&self.0[..n]);
        self.0 = &self.0[n..];
        Ok(n)
    }
}

fn sample(len: usize) -> Vec<u8> {
    b"it was the best of times, it was the worst of times, "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

#[test]
fn test_io_roundtrip_large() {
    init_tracing();
    let codec = HuffmanCodec::new();
    let input = sample(200_000);

    let mut container = Vec::new();
    let stats = codec
        .encode_io(Cursor::new(&input), &mut container)
        .unwrap();
    assert_eq!(stats.original_size, input.len());
    assert_eq!(stats.compressed_size, container.len());
    assert!(stats.ratio().is_effective());

    let mut output = Vec::new();
    codec.decode_io(Cursor::new(&container), &mut output).unwrap();
    assert_eq!(output, input);
}

#[test]
fn test_stream_matches_one_shot() {
    let codec = HuffmanCodec::new();
    let input = sample(5_000);

    let mut streamed = Vec::new();
    codec
        .encode_stream(SliceSource::new(&input), &mut streamed)
        .unwrap();
    assert_eq!(streamed, codec.compress(&input).unwrap());
}

#[test]
fn test_short_reads() {
    let codec = HuffmanCodec::with_config(CodecConfig {
        stream: StreamConfig {
            buffer_size: 0,
            ..Default::default()
        },
        ..Default::default()
    });
    let input = sample(10_000);

    let mut container = Vec::new();
    codec.encode_io(Dribble(&input), &mut container).unwrap();

    let mut output = Vec::new();
    codec.decode_io(Dribble(&container), &mut output).unwrap();
    assert_eq!(output, input);
}

#[test]
fn test_explicit_adapters() {
    let codec = HuffmanCodec::new();
    let input = sample(1_000);

    let mut sink = WriteSink::new(Vec::new());
    codec
        .encode_stream(ReadSource::new(Cursor::new(&input)), &mut sink)
        .unwrap();
    let container = sink.into_inner().unwrap();

    let mut source = ReadSource::new(Cursor::new(container));
    let mut output = Vec::new();
    codec.decode_stream(&mut source, &mut output).unwrap();
    assert_eq!(output, input);
}

#[test]
fn test_empty_stream() {
    let codec = HuffmanCodec::new();

    let mut container = Vec::new();
    let stats = codec
        .encode_io(io::empty(), &mut container)
        .unwrap();
    assert_eq!(stats.original_size, 0);
    assert_eq!(stats.leaf_count, 0);
    assert!(!container.is_empty());

    let mut output = Vec::new();
    codec.decode_io(Cursor::new(&container), &mut output).unwrap();
    assert!(output.is_empty());
}

#[test]
fn test_input_size_limit() {
    let codec = HuffmanCodec::with_config(CodecConfig {
        stream: StreamConfig {
            max_input_size: 100,
            ..Default::default()
        },
        ..Default::default()
    });

    let mut container = Vec::new();
    let err = codec
        .encode_io(Cursor::new(sample(101)), &mut container)
        .unwrap_err();
    assert_eq!(err.category(), "limit_exceeded");
    assert!(container.is_empty());
}
