// External-process decompressor driven through the verifier.

#![cfg(unix)]

use std::time::{Duration, Instant};

use mam::engine::Lznt1Engine;
use mam::verify::{sample, verify, ProcessDecompressor};
use mam::{CodecOptions, FormatCode};

fn lznt1() -> CodecOptions {
    CodecOptions::new(FormatCode::LZNT1)
}

#[test]
fn failing_process_is_reported_not_raised() {
    let engine = Lznt1Engine::new();
    let d = ProcessDecompressor::new("/bin/sh").args(["-c", "echo nope >&2; exit 1", "sh"]);
    let r = verify(sample::repeated_phrases, &lznt1(), &engine, &d);
    assert!(!r.passed);
    assert_eq!(r.stderr.trim(), "nope");
    assert!(r.diagnostic.contains("/bin/sh"), "{}", r.diagnostic);
}

#[test]
fn process_echoing_container_is_a_mismatch() {
    // Copies the container instead of expanding it.
    let engine = Lznt1Engine::new();
    let d = ProcessDecompressor::new("/bin/sh").args(["-c", "cp \"$1\" \"$2\"", "sh"]);
    let r = verify(sample::repeated_phrases, &lznt1(), &engine, &d);
    assert!(!r.passed);
    assert_eq!(r.actual_len, r.container_len);
    // Sample starts with 'H', container with 'M'.
    assert_eq!(r.first_mismatch, Some(0));
}

#[test]
fn hung_process_times_out() {
    let engine = Lznt1Engine::new();
    let d = ProcessDecompressor::new("/bin/sh")
        .args(["-c", "exec sleep 10", "sh"])
        .timeout(Duration::from_millis(200));
    let r = verify(sample::empty, &lznt1(), &engine, &d);
    assert!(!r.passed);
    assert!(r.diagnostic.contains("did not finish"), "{}", r.diagnostic);
}

#[test]
fn wrapper_with_forked_child_still_times_out() {
    let engine = Lznt1Engine::new();
    let d = ProcessDecompressor::new("/bin/sh")
        .args(["-c", "sleep 10; true", "sh"])
        .timeout(Duration::from_millis(200));
    let start = Instant::now();
    let r = verify(sample::repeated_phrases, &lznt1(), &engine, &d);
    assert!(!r.passed);
    assert!(r.diagnostic.contains("unavailable"), "{}", r.diagnostic);
    assert!(start.elapsed() < Duration::from_secs(5), "{:?}", start.elapsed());
}
