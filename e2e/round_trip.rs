// e2e/round_trip.rs — end-to-end round trips through the public library API.
//
// Each test goes data → compress → container bytes → decompress and checks
// the bytes, the header and the size bound.

use mam::config::{HEADER_SIZE, OVERHEAD_MARGIN_DEFAULT};
use mam::container::decode;
use mam::engine::Lznt1Engine;
use mam::verify::sample;
use mam::{compress, decompress, ChunkedCodec, CodecOptions, Container, FormatCode};

fn codec() -> ChunkedCodec<Lznt1Engine> {
    ChunkedCodec::new(Lznt1Engine::new(), CodecOptions::new(FormatCode::LZNT1))
}

fn check(data: &[u8]) -> Container {
    let codec = codec();
    let c = codec.compress(data).unwrap();
    assert!(c.len() <= data.len() + OVERHEAD_MARGIN_DEFAULT + HEADER_SIZE);
    assert_eq!(c.uncompressed_size() as usize, data.len());
    assert_eq!(codec.decompress(c.as_bytes()).unwrap(), data);
    c
}

// ── Scenario: the 1300-byte repeated sample ─────────────────────────────────

#[test]
fn hello_world_1300() {
    let data = b"Hello World! ".repeat(100);
    assert_eq!(data.len(), 1300);
    let c = check(&data);
    assert!(c.len() <= 1300 + 4096 + 8);
    let v = decode(c.as_bytes()).unwrap();
    assert_eq!(v.uncompressed_size, 1300);
}

// ── Scenario: empty input ───────────────────────────────────────────────────

#[test]
fn empty_input() {
    let c = check(&[]);
    assert_eq!(decode(c.as_bytes()).unwrap().uncompressed_size, 0);
}

// ── Shapes ───────────────────────────────────────────────────────────────────

#[test]
fn single_byte() {
    check(b"\x7f");
}

#[test]
fn prefetch_like_sample() {
    check(&sample::repeated_phrases());
}

#[test]
fn large_repetitive() {
    let c = check(&sample::repeated_pattern(b"Repeated Data ", 1 << 20));
    assert!(c.len() < (1 << 20) / 4);
}

#[test]
fn pseudo_random_up_to_margin_limit() {
    // 4096-byte margin covers two header bytes per 4 KiB chunk up to ~8 MiB.
    check(&sample::pseudo_random(2 << 20, 5));
}

#[test]
fn mixed_runs_and_noise() {
    let mut data = Vec::new();
    for i in 0..40u64 {
        data.extend(sample::repeated_pattern(b"run", 300 + i as usize));
        data.extend(sample::pseudo_random(200, i + 1));
    }
    check(&data);
}

// ── Free functions agree with ChunkedCodec ──────────────────────────────────

#[test]
fn free_functions_match_codec() {
    let engine = Lznt1Engine::new();
    let data = sample::repeated_phrases();
    let a = compress(&engine, &data, &CodecOptions::new(FormatCode::LZNT1)).unwrap();
    let b = codec().compress(&data).unwrap();
    assert_eq!(a, b);
    assert_eq!(decompress(&engine, b.as_bytes()).unwrap(), data);
}

// ── Boxed default engine ────────────────────────────────────────────────────

#[test]
fn default_engine_round_trips_lznt1() {
    let engine = mam::default_engine();
    let data = sample::repeated_phrases();
    let c = compress(engine.as_ref(), &data, &CodecOptions::new(FormatCode::LZNT1)).unwrap();
    assert_eq!(decompress(engine.as_ref(), c.as_bytes()).unwrap(), data);
}
