// Public file-level API: compress_file / decompress_file / container_file_info.

use std::fs;

use mam::engine::Lznt1Engine;
use mam::io::{
    compress_file, container_file_info, decompress_file, default_output_name, NUL_MARK,
    STDIN_MARK, STDOUT_MARK,
};
use mam::verify::sample;
use mam::{CodecOptions, FormatCode, MamError};

fn lznt1() -> CodecOptions {
    CodecOptions::new(FormatCode::LZNT1)
}

#[test]
fn sentinels() {
    assert_eq!(STDIN_MARK, "stdin");
    assert_eq!(STDOUT_MARK, "stdout");
    assert!(!NUL_MARK.is_empty());
    assert_eq!(default_output_name("a/b.pf"), "a/b.pf.mam");
}

#[test]
fn compress_to_null_device() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in");
    fs::write(&src, sample::repeated_phrases()).unwrap();
    let stats = compress_file(&Lznt1Engine::new(), src.to_str().unwrap(), NUL_MARK, &lznt1(), false)
        .unwrap();
    assert_eq!(stats.bytes_in, 2000);
    assert!(stats.ratio() < 100.0);
}

#[test]
fn refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in");
    let dst = dir.path().join("in.mam");
    fs::write(&src, b"data").unwrap();
    fs::write(&dst, b"keep me").unwrap();
    let engine = Lznt1Engine::new();

    let err = compress_file(&engine, src.to_str().unwrap(), dst.to_str().unwrap(), &lznt1(), false)
        .unwrap_err();
    assert!(matches!(err, MamError::Io(ref e) if e.kind() == std::io::ErrorKind::AlreadyExists));
    assert_eq!(fs::read(&dst).unwrap(), b"keep me");

    compress_file(&engine, src.to_str().unwrap(), dst.to_str().unwrap(), &lznt1(), true).unwrap();
    assert_eq!(&fs::read(&dst).unwrap()[..3], b"MAM");
}

#[test]
fn size_mismatch_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Lznt1Engine::new();
    let c = mam::compress(&engine, &sample::repeated_phrases(), &lznt1()).unwrap();
    let mut bytes = c.into_bytes();
    bytes[4] = bytes[4].wrapping_add(1);
    let src = dir.path().join("forged.mam");
    let out = dir.path().join("forged.out");
    fs::write(&src, &bytes).unwrap();

    let err = decompress_file(&engine, src.to_str().unwrap(), out.to_str().unwrap(), false)
        .unwrap_err();
    assert!(matches!(err, MamError::SizeMismatch { declared: 2001, actual: 2000 }));
    assert!(!out.exists());
}

#[test]
fn info_reports_header_and_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.mam");
    fs::write(&path, b"MAM\x04\x00\x10\x00\x00payload").unwrap();
    let info = container_file_info(path.to_str().unwrap()).unwrap();
    assert_eq!(info.header.format, FormatCode::XPRESS_HUFF);
    assert_eq!(info.header.uncompressed_size, 4096);
    assert_eq!(info.file_size, Some(15));
}
