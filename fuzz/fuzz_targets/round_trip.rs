#![no_main]
use libfuzzer_sys::fuzz_target;

use mam::engine::Lznt1Engine;
use mam::{CodecOptions, FormatCode};

fuzz_target!(|data: &[u8]| {
    let engine = Lznt1Engine::new();
    let options = CodecOptions::new(FormatCode::LZNT1);

    let container = mam::compress(&engine, data, &options)
        .expect("compression of a valid buffer must succeed");
    assert!(container.len() <= data.len() + options.overhead_margin + 8);

    let recovered = mam::decompress(&engine, container.as_bytes())
        .expect("decompression of a fresh container must succeed");
    assert_eq!(recovered, data, "round-trip mismatch for {} bytes", data.len());
});
