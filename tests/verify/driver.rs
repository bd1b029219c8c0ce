// Round-trip verifier with in-process and scripted decompressors.

use mam::engine::Lznt1Engine;
use mam::verify::{
    sample, verify, Decompressor, DecompressorOutput, InProcessDecompressor,
};
use mam::{CodecOptions, FormatCode};

fn lznt1() -> CodecOptions {
    CodecOptions::new(FormatCode::LZNT1)
}

/// Returns a fixed answer regardless of input.
struct Canned(Result<Vec<u8>, String>);

impl Decompressor for Canned {
    fn name(&self) -> String {
        "canned".into()
    }
    fn decompress(&self, _: &[u8]) -> DecompressorOutput {
        DecompressorOutput {
            result: self.0.clone(),
            stdout: "canned stdout".into(),
            stderr: String::new(),
        }
    }
}

#[test]
fn every_sample_passes_in_process() {
    let engine = Lznt1Engine::new();
    let d = InProcessDecompressor::new(&engine);
    let samples: Vec<Box<dyn Fn() -> Vec<u8>>> = vec![
        Box::new(sample::repeated_phrases),
        Box::new(sample::empty),
        Box::new(|| sample::repeated_pattern(b"Hello World! ", 1300)),
        Box::new(|| sample::pseudo_random(10_000, 99)),
    ];
    for s in samples {
        let r = verify(s, &lznt1(), &engine, &d);
        assert!(r.passed, "{r}");
        assert_eq!(r.first_mismatch, None);
    }
}

#[test]
fn short_output_reports_prefix_mismatch() {
    let engine = Lznt1Engine::new();
    let mut truncated = sample::repeated_phrases();
    truncated.truncate(1500);
    let r = verify(sample::repeated_phrases, &lznt1(), &engine, &Canned(Ok(truncated)));
    assert!(!r.passed);
    assert_eq!(r.expected_len, 2000);
    assert_eq!(r.actual_len, Some(1500));
    assert_eq!(r.first_mismatch, Some(1500));
    assert_eq!(r.stdout, "canned stdout");
}

#[test]
fn decompressor_error_is_captured() {
    let engine = Lznt1Engine::new();
    let r = verify(
        sample::repeated_phrases,
        &lznt1(),
        &engine,
        &Canned(Err("exploded".into())),
    );
    assert!(!r.passed);
    assert_eq!(r.actual_len, None);
    assert!(r.container_len.is_some());
    assert!(r.diagnostic.contains("canned"), "{}", r.diagnostic);
    assert!(r.diagnostic.contains("exploded"), "{}", r.diagnostic);
}

#[test]
fn unsupported_format_fails_without_panicking() {
    let engine = Lznt1Engine::new();
    let r = verify(
        sample::repeated_phrases,
        &CodecOptions::new(FormatCode::XPRESS_HUFF),
        &engine,
        &InProcessDecompressor::new(&engine),
    );
    assert!(!r.passed);
    assert_eq!(r.container_len, None);
}
