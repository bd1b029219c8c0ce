//! Round-trip verification of a decompressor.
//!
//! [`verify`] builds a deterministic sample, compresses it into a container
//! with the chunked compressor, hands the container bytes to a
//! [`Decompressor`] and compares the result byte for byte. Every failure
//! along the way (compression, the decompressor itself, a length or content
//! mismatch) ends up in the returned [`VerificationResult`]; nothing is
//! propagated and nothing panics.

pub mod process;
pub mod sample;

pub use process::ProcessDecompressor;

use std::fmt;

use xxhash_rust::xxh64::xxh64;

use crate::codec::{self, CodecOptions};
use crate::displaylevel;
use crate::engine::CompressionEngine;

// ─────────────────────────────────────────────────────────────────────────────
// Decompressor under test
// ─────────────────────────────────────────────────────────────────────────────

/// What a decompressor produced for one container.
#[derive(Clone, Debug)]
pub struct DecompressorOutput {
    pub result: Result<Vec<u8>, String>,
    pub stdout: String,
    pub stderr: String,
}

/// The component whose correctness is being checked.
pub trait Decompressor {
    /// Label used in diagnostics.
    fn name(&self) -> String;

    /// Expands one container.
    fn decompress(&self, container: &[u8]) -> DecompressorOutput;
}

/// Decompresses in-process with the crate's own codec.
pub struct InProcessDecompressor<'e, E: CompressionEngine + ?Sized> {
    engine: &'e E,
}

impl<'e, E: CompressionEngine + ?Sized> InProcessDecompressor<'e, E> {
    pub fn new(engine: &'e E) -> Self {
        InProcessDecompressor { engine }
    }
}

impl<E: CompressionEngine + ?Sized> Decompressor for InProcessDecompressor<'_, E> {
    fn name(&self) -> String {
        format!("in-process ({})", self.engine.name())
    }

    fn decompress(&self, container: &[u8]) -> DecompressorOutput {
        DecompressorOutput {
            result: codec::decompress(self.engine, container).map_err(|e| e.to_string()),
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Result
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of one round trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    pub passed: bool,
    pub expected_len: usize,
    /// `None` when the decompressor produced nothing.
    pub actual_len: Option<usize>,
    /// Offset of the first differing byte; equals the shorter length when
    /// one output is a prefix of the other.
    pub first_mismatch: Option<usize>,
    pub expected_digest: u64,
    pub actual_digest: Option<u64>,
    /// Size of the container handed to the decompressor; `None` when
    /// compression itself failed.
    pub container_len: Option<usize>,
    pub stdout: String,
    pub stderr: String,
    pub diagnostic: String,
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "{verdict}: {}", self.diagnostic)?;
        write!(f, " (expected {} bytes, xxh64 {:016x}", self.expected_len, self.expected_digest)?;
        if let (Some(len), Some(digest)) = (self.actual_len, self.actual_digest) {
            write!(f, "; got {len} bytes, xxh64 {digest:016x}")?;
        }
        if let Some(offset) = self.first_mismatch {
            write!(f, "; first mismatch at offset {offset}")?;
        }
        write!(f, ")")
    }
}

/// Offset of the first byte where `a` and `b` differ, if any.
pub fn first_mismatch(a: &[u8], b: &[u8]) -> Option<usize> {
    match a.iter().zip(b).position(|(x, y)| x != y) {
        Some(i) => Some(i),
        None if a.len() != b.len() => Some(a.len().min(b.len())),
        None => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Driver
// ─────────────────────────────────────────────────────────────────────────────

/// Runs one round trip: sample → container → `decompressor` → compare.
pub fn verify<F, E, D>(
    sample: F,
    options: &CodecOptions,
    engine: &E,
    decompressor: &D,
) -> VerificationResult
where
    F: FnOnce() -> Vec<u8>,
    E: CompressionEngine + ?Sized,
    D: Decompressor + ?Sized,
{
    let original = sample();
    let expected_digest = xxh64(&original, 0);
    let mut result = VerificationResult {
        passed: false,
        expected_len: original.len(),
        actual_len: None,
        first_mismatch: None,
        expected_digest,
        actual_digest: None,
        container_len: None,
        stdout: String::new(),
        stderr: String::new(),
        diagnostic: String::new(),
    };

    let container = match codec::compress(engine, &original, options) {
        Ok(c) => c,
        Err(e) => {
            result.diagnostic = format!("compression with {} failed: {e}", engine.name());
            displaylevel!(1, "{}\n", result.diagnostic);
            return result;
        }
    };
    result.container_len = Some(container.len());
    displaylevel!(
        3,
        "sample: {} bytes, container: {} bytes ({})\n",
        original.len(),
        container.len(),
        options.format
    );

    let output = decompressor.decompress(container.as_bytes());
    result.stdout = output.stdout;
    result.stderr = output.stderr;

    let produced = match output.result {
        Ok(bytes) => bytes,
        Err(why) => {
            result.diagnostic = format!("{} failed: {why}", decompressor.name());
            displaylevel!(1, "{}\n", result.diagnostic);
            return result;
        }
    };

    result.actual_len = Some(produced.len());
    result.actual_digest = Some(xxh64(&produced, 0));
    result.first_mismatch = first_mismatch(&original, &produced);
    result.passed = result.first_mismatch.is_none();
    result.diagnostic = if result.passed {
        "decompressed data matches original data".to_owned()
    } else {
        format!(
            "data mismatch: expected {} bytes, got {}",
            original.len(),
            produced.len()
        )
    };
    displaylevel!(2, "{}\n", result);
    result
}
