#![no_main]
use libfuzzer_sys::fuzz_target;

use mam::engine::Lznt1Engine;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through header parsing and LZNT1 expansion.
    // Err results are expected; what we check is no panics and no oversized
    // allocation from a forged size field.
    let Ok(view) = mam::decode(data) else {
        return;
    };
    assert_eq!(view.payload.len(), data.len() - 8);

    if let Ok(out) = mam::decompress(&Lznt1Engine::new(), data) {
        assert_eq!(out.len(), view.uncompressed_size as usize);
        assert!(out.len() <= mam::engine::lznt1::max_decompressed_len(view.payload.len()));
    }
});
