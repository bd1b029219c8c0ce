// ChunkedCodec with a shared workspace pool across threads.

use std::thread;

use mam::engine::Lznt1Engine;
use mam::verify::sample;
use mam::{ChunkedCodec, CodecOptions, CompressionEngine, FormatCode, MamError};

#[test]
fn concurrent_pooled_round_trips() {
    let codec = ChunkedCodec::new(Lznt1Engine::new(), CodecOptions::new(FormatCode::LZNT1));
    let pool = codec.pool(2);
    assert_eq!(pool.capacity(), 2);

    thread::scope(|s| {
        for seed in 1..=8u64 {
            let codec = &codec;
            let pool = &pool;
            s.spawn(move || {
                let mut data = sample::repeated_phrases();
                data.extend(sample::pseudo_random(500, seed));
                let c = codec.compress_with_pool(&data, pool).unwrap();
                assert_eq!(codec.decompress_with_pool(c.as_bytes(), pool).unwrap(), data);
            });
        }
    });
}

#[test]
fn pooled_decompress_checks_header_first() {
    let codec = ChunkedCodec::new(Lznt1Engine::new(), CodecOptions::new(FormatCode::LZNT1));
    let pool = codec.pool(1);
    assert!(matches!(
        codec.decompress_with_pool(b"MAM", &pool),
        Err(MamError::TruncatedInput { len: 3 })
    ));
}

#[test]
fn pool_rejects_unsupported_format() {
    let codec = ChunkedCodec::new(
        Lznt1Engine::new(),
        CodecOptions::new(FormatCode::XPRESS_HUFF),
    );
    let pool = codec.pool(1);
    assert!(matches!(
        codec.compress_with_pool(b"abc", &pool),
        Err(MamError::EngineStatus { .. })
    ));
    assert_eq!(codec.options().format, FormatCode::XPRESS_HUFF);
    assert_eq!(codec.engine().name(), "lznt1");
}
