// e2e/cli_integration.rs — black-box tests of the `mam` binary.
//
// Covers compress / decompress dispatch, default output naming, mtime
// preservation, info, batch, verify and exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Locate the `mam` binary produced by Cargo.
fn mam_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mam"))
}

fn mam(dir: &Path, args: &[&str]) -> Output {
    Command::new(mam_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run mam")
}

/// TempDir holding a ~4 KB text file.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    fs::write(&input_path, "Hello, MAM!\n".repeat(341)).unwrap();
    (dir, input_path)
}

// ── 1. Compress / decompress roundtrip ───────────────────────────────────────

#[test]
fn test_cli_compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = mam(dir.path(), &["compress", "input.txt", "packed.mam", "--format", "lznt1"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let packed = fs::read(dir.path().join("packed.mam")).unwrap();
    assert_eq!(&packed[..4], b"MAM\x02");
    assert_eq!(u32::from_le_bytes(packed[4..8].try_into().unwrap()) as usize, original.len());
    assert!(packed.len() < original.len());

    let out = mam(dir.path(), &["decompress", "packed.mam", "restored.txt"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(dir.path().join("restored.txt")).unwrap(), original);
}

#[test]
fn test_cli_default_output_name_and_mtime() {
    let (dir, input) = make_temp_input();
    let past = filetime::FileTime::from_unix_time(1_500_000_000, 0);
    filetime::set_file_mtime(&input, past).unwrap();

    let out = mam(dir.path(), &["compress", "input.txt", "--format", "lznt1"]);
    assert!(out.status.success());
    let packed = dir.path().join("input.txt.mam");
    assert!(packed.exists());
    let mtime = filetime::FileTime::from_last_modification_time(&fs::metadata(&packed).unwrap());
    assert_eq!(mtime.unix_seconds(), 1_500_000_000);
}

#[test]
fn test_cli_refuses_overwrite_without_force() {
    let (dir, _) = make_temp_input();
    fs::write(dir.path().join("input.txt.mam"), b"occupied").unwrap();

    let out = mam(dir.path(), &["compress", "input.txt", "--format", "lznt1"]);
    assert!(!out.status.success());
    assert_eq!(fs::read(dir.path().join("input.txt.mam")).unwrap(), b"occupied");

    let out = mam(dir.path(), &["compress", "input.txt", "--format", "lznt1", "-f"]);
    assert!(out.status.success());
}

// ── 2. info ──────────────────────────────────────────────────────────────────

#[test]
fn test_cli_info_prints_header() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.mam"), b"MAM\x04\x14\x05\x00\x00xx").unwrap();
    let out = mam(dir.path(), &["info", "a.mam"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("1300"), "{stdout}");
    assert!(stdout.contains("0x04"), "{stdout}");
    assert!(stdout.contains("a.mam"), "{stdout}");
}

#[test]
fn test_cli_info_rejects_non_container() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.bin"), b"PK\x03\x04 not a container").unwrap();
    let out = mam(dir.path(), &["info", "b.bin"]);
    assert!(!out.status.success());
}

// ── 3. batch ─────────────────────────────────────────────────────────────────

#[test]
fn test_cli_batch() {
    let dir = TempDir::new().unwrap();
    for name in ["one", "two", "three"] {
        fs::write(dir.path().join(name), name.repeat(500)).unwrap();
    }
    let out = mam(dir.path(), &["batch", "one", "two", "three", "-T", "2", "--format", "lznt1"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    for name in ["one", "two", "three"] {
        let restored = dir.path().join(format!("{name}.out"));
        let out = mam(
            dir.path(),
            &["decompress", &format!("{name}.mam"), restored.to_str().unwrap()],
        );
        assert!(out.status.success());
        assert_eq!(fs::read(restored).unwrap(), name.repeat(500).as_bytes());
    }
}

// ── 4. verify ────────────────────────────────────────────────────────────────

#[test]
fn test_cli_verify_in_process() {
    let dir = TempDir::new().unwrap();
    for sample in ["repeated", "random", "empty"] {
        let out = mam(dir.path(), &["verify", "--format", "lznt1", "--sample", sample]);
        assert!(out.status.success(), "{sample}: {}", String::from_utf8_lossy(&out.stderr));
    }
}

#[test]
fn test_cli_verify_against_itself_as_external_process() {
    let dir = TempDir::new().unwrap();
    let bin = mam_bin();
    let out = mam(
        dir.path(),
        &[
            "verify",
            "--format",
            "lznt1",
            "--decompressor",
            bin.to_str().unwrap(),
            "--",
            "decompress",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
}

#[cfg(unix)]
#[test]
fn test_cli_verify_detects_broken_decompressor() {
    let dir = TempDir::new().unwrap();
    let out = mam(
        dir.path(),
        &[
            "verify", "--format", "lznt1", "--decompressor", "/bin/sh", "--", "-c",
            "printf broken > \"$2\"", "sh",
        ],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("FAIL"));
}

// ── 5. Exit codes ────────────────────────────────────────────────────────────

#[test]
fn test_cli_no_subcommand_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let out = mam(dir.path(), &[]);
    assert!(!out.status.success());
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    let out = mam(dir.path(), &["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
}
