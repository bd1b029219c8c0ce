// e2e/error_handling.rs — failure paths: corrupt, truncated and forged input.
//
// Every failure must surface as a typed error (library) or a non-zero exit
// code (binary); none may produce wrong data or panic.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use mam::engine::Lznt1Engine;
use mam::verify::sample;
use mam::{compress, decompress, CodecOptions, FormatCode, MamError};
use tempfile::TempDir;

fn mam_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mam"))
}

fn packed_sample() -> Vec<u8> {
    compress(
        &Lznt1Engine::new(),
        &sample::repeated_phrases(),
        &CodecOptions::new(FormatCode::LZNT1),
    )
    .unwrap()
    .into_bytes()
}

// ── Library ─────────────────────────────────────────────────────────────────

#[test]
fn every_single_byte_payload_flip_is_caught_or_harmless() {
    let engine = Lznt1Engine::new();
    let original = sample::repeated_phrases();
    let packed = packed_sample();
    for i in 8..packed.len() {
        let mut bad = packed.clone();
        bad[i] ^= 0x80;
        match decompress(&engine, &bad) {
            // Flipping a literal changes the output but keeps the length.
            Ok(out) => assert_eq!(out.len(), original.len()),
            Err(MamError::SizeMismatch { .. }) | Err(MamError::DecompressionEngine { .. }) => {}
            Err(other) => panic!("offset {i}: unexpected {other:?}"),
        }
    }
}

#[test]
fn every_prefix_is_rejected() {
    let engine = Lznt1Engine::new();
    let packed = packed_sample();
    for len in 0..packed.len() {
        assert!(decompress(&engine, &packed[..len]).is_err(), "prefix {len} accepted");
    }
}

#[test]
fn garbage_after_header_is_engine_error() {
    let engine = Lznt1Engine::new();
    let mut bad = b"MAM\x02\xd0\x07\x00\x00".to_vec();
    bad.extend(sample::pseudo_random(256, 17));
    assert!(decompress(&engine, &bad).is_err());
}

// ── Binary ──────────────────────────────────────────────────────────────────

#[test]
fn decompress_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let status = Command::new(mam_bin())
        .args(["decompress", "absent.mam", "out"])
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn decompress_bad_magic_fails_with_message() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("x.mam"), b"MEM\x04\x00\x00\x00\x00").unwrap();
    let out = Command::new(mam_bin())
        .args(["decompress", "x.mam", "x.out"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not a MAM container"));
    assert!(!dir.path().join("x.out").exists());
}

#[test]
fn decompress_forged_size_fails() {
    let dir = TempDir::new().unwrap();
    let mut packed = packed_sample();
    packed[4..8].copy_from_slice(&4000u32.to_le_bytes());
    fs::write(dir.path().join("f.mam"), &packed).unwrap();
    let out = Command::new(mam_bin())
        .args(["decompress", "f.mam", "f.out"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("size mismatch"));
}

#[test]
fn compress_with_bad_chunk_size_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in"), b"abcabcabc").unwrap();
    let status = Command::new(mam_bin())
        .args(["compress", "in", "--format", "lznt1", "--chunk-size", "512"])
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!dir.path().join("in.mam").exists());
}
