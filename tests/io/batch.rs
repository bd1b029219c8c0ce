// Batch compression over a rayon pool with pooled workspaces.

use std::fs;

use mam::engine::Lznt1Engine;
use mam::io::compress_batch;
use mam::verify::sample;
use mam::{decompress, CodecOptions, FormatCode};

#[test]
fn batch_output_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let files: Vec<String> = (0..10u64)
        .map(|i| {
            let p = dir.path().join(format!("{i}.bin"));
            let mut data = sample::repeated_phrases();
            data.extend(sample::pseudo_random(i as usize * 1000, i + 1));
            fs::write(&p, data).unwrap();
            p.to_str().unwrap().to_owned()
        })
        .collect();

    let engine = Lznt1Engine::new();
    let report = compress_batch(&engine, &files, &CodecOptions::new(FormatCode::LZNT1), 4, false)
        .unwrap();
    assert!(report.is_success());
    assert_eq!(report.succeeded(), 10);

    for item in &report.items {
        assert_eq!(item.dst, format!("{}.mam", item.src));
        let restored = decompress(&engine, &fs::read(&item.dst).unwrap()).unwrap();
        assert_eq!(restored, fs::read(&item.src).unwrap());
    }
}

#[test]
fn existing_outputs_fail_individually() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::write(&a, b"aaaa").unwrap();
    fs::write(&b, b"bbbb").unwrap();
    fs::write(dir.path().join("b.mam"), b"taken").unwrap();
    let files = vec![a.to_str().unwrap().to_owned(), b.to_str().unwrap().to_owned()];

    let report = compress_batch(
        &Lznt1Engine::new(),
        &files,
        &CodecOptions::new(FormatCode::LZNT1),
        2,
        false,
    )
    .unwrap();
    assert_eq!(report.succeeded(), 1);
    assert!(report.items[0].result.is_ok());
    assert!(report.items[1].result.is_err());
}
