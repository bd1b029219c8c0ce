// Chunked decompressor: exact sizing and corruption handling.

use mam::container::encode;
use mam::engine::{Lznt1Engine, NtStatus};
use mam::verify::sample;
use mam::{compress, decompress, CodecOptions, FormatCode, MamError};

fn lznt1() -> CodecOptions {
    CodecOptions::new(FormatCode::LZNT1)
}

fn round_trip(data: &[u8]) {
    let engine = Lznt1Engine::new();
    let c = compress(&engine, data, &lznt1()).unwrap();
    assert_eq!(decompress(&engine, c.as_bytes()).unwrap(), data);
}

#[test]
fn round_trip_shapes() {
    round_trip(&sample::empty());
    round_trip(b"A");
    round_trip(&sample::repeated_phrases());
    round_trip(&sample::repeated_pattern(b"Hello World! ", 1300));
    round_trip(&sample::repeated_pattern(b"\0", 100_000));
    round_trip(&sample::pseudo_random(50_000, 3));
    // Exactly on and around chunk boundaries.
    for len in [4095, 4096, 4097, 8192] {
        round_trip(&sample::repeated_pattern(b"boundary ", len));
    }
}

#[test]
fn corrupted_size_field_never_yields_wrong_data() {
    let engine = Lznt1Engine::new();
    let data = sample::repeated_phrases();
    let c = compress(&engine, &data, &lznt1()).unwrap();

    for declared in [0u32, 1, 1999, 2001, 4096, 1 << 20] {
        let forged = encode(c.payload(), declared, FormatCode::LZNT1);
        match decompress(&engine, forged.as_bytes()) {
            Err(MamError::SizeMismatch { declared: d, actual }) => {
                assert_eq!(d, declared);
                assert_eq!(actual, 2000);
            }
            Err(MamError::DecompressionEngine { status }) => {
                assert_eq!(status, NtStatus::BAD_COMPRESSION_BUFFER);
            }
            other => panic!("declared {declared}: unexpected {other:?}"),
        }
    }
}

#[test]
fn truncated_payload_is_engine_error() {
    let engine = Lznt1Engine::new();
    let c = compress(&engine, &sample::repeated_phrases(), &lznt1()).unwrap();
    let bytes = c.as_bytes();
    let cut = &bytes[..bytes.len() - 5];
    assert!(matches!(
        decompress(&engine, cut),
        Err(MamError::DecompressionEngine { .. })
    ));
}

#[test]
fn header_errors_come_first() {
    let engine = Lznt1Engine::new();
    assert!(matches!(decompress(&engine, b""), Err(MamError::TruncatedInput { len: 0 })));
    assert!(matches!(
        decompress(&engine, b"MZ\x90\x00\x03\x00\x00\x00\x04"),
        Err(MamError::Format { .. })
    ));
}

#[test]
fn zero_size_header_with_empty_payload() {
    let engine = Lznt1Engine::new();
    assert_eq!(decompress(&engine, b"MAM\x02\x00\x00\x00\x00").unwrap(), b"");
}

#[test]
fn forged_max_size_is_rejected_without_allocating() {
    let engine = Lznt1Engine::new();
    let c = compress(&engine, &sample::repeated_phrases(), &lznt1()).unwrap();
    let forged = encode(c.payload(), u32::MAX, FormatCode::LZNT1);
    assert!(matches!(
        decompress(&engine, forged.as_bytes()),
        Err(MamError::ImplausibleSize { declared: u32::MAX, .. })
    ));

    // The pooled path applies the same bound.
    let codec = mam::ChunkedCodec::new(Lznt1Engine::new(), lznt1());
    let pool = codec.pool(1);
    assert!(matches!(
        codec.decompress_with_pool(forged.as_bytes(), &pool),
        Err(MamError::ImplausibleSize { .. })
    ));
}

#[test]
fn bound_holds_for_real_streams() {
    let engine = Lznt1Engine::new();
    for data in [
        sample::repeated_pattern(b"\0", 1 << 20),
        sample::repeated_phrases(),
        sample::pseudo_random(20_000, 9),
    ] {
        let c = compress(&engine, &data, &lznt1()).unwrap();
        assert!(data.len() <= mam::engine::lznt1::max_decompressed_len(c.payload().len()));
    }
}
