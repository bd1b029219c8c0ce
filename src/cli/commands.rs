//! Subcommand handlers.
//!
//! Each handler maps to one [`Command`](super::args::Command) variant,
//! builds its engine explicitly and reports failures as `anyhow` errors with
//! the file name attached. The process exit code is decided by the caller.

use std::time::Duration;

use anyhow::{bail, Context, Result};

use super::args::{BatchArgs, CodecArgs, CompressArgs, DecompressArgs, InfoArgs, SampleKind, VerifyArgs};
use crate::codec::CodecOptions;
use crate::container::FormatCode;
use crate::engine::{default_engine, CompressionEngine, NtStatus};
use crate::error::MamError;
use crate::io::{
    compress_batch, compress_file, container_file_info, decompress_file, default_output_name,
};
use crate::verify::{sample, verify, Decompressor, InProcessDecompressor, ProcessDecompressor, VerificationResult};
use crate::{display, displaylevel, displayout};

impl CodecArgs {
    /// Options for this invocation, filling the format with the platform
    /// default.
    pub fn options(&self) -> CodecOptions {
        CodecOptions::new(self.format.unwrap_or_else(FormatCode::platform_default))
            .chunk_size(self.chunk_size)
            .overhead_margin(self.margin)
    }
}

fn check_engine(engine: &dyn CompressionEngine, format: FormatCode) -> Result<()> {
    if !engine.supports(format) {
        bail!("engine '{}' does not support format {}", engine.name(), format);
    }
    Ok(())
}

/// Adds a `--margin` suggestion when the engine ran out of destination space.
fn with_margin_hint(e: MamError, options: &CodecOptions) -> anyhow::Error {
    let out_of_room = matches!(
        e,
        MamError::CompressionEngine { status } if status == NtStatus::BUFFER_TOO_SMALL
    );
    let err = anyhow::Error::new(e);
    if out_of_room {
        err.context(format!(
            "output did not fit the {}-byte margin; retry with a larger --margin",
            options.overhead_margin
        ))
    } else {
        err
    }
}

pub fn compress(args: &CompressArgs) -> Result<()> {
    let options = args.codec.options();
    let engine = default_engine();
    check_engine(engine.as_ref(), options.format)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_name(&args.input));
    if args.output.is_none() {
        displaylevel!(2, "Compressed filename will be : {}\n", output);
    }
    compress_file(engine.as_ref(), &args.input, &output, &options, args.force)
        .map_err(|e| with_margin_hint(e, &options))
        .with_context(|| format!("{}: compression failed", args.input))?;
    Ok(())
}

pub fn decompress(args: &DecompressArgs) -> Result<()> {
    let engine = default_engine();
    decompress_file(engine.as_ref(), &args.input, &args.output, args.force)
        .with_context(|| format!("{}: decompression failed", args.input))?;
    Ok(())
}

pub fn info(args: &InfoArgs) -> Result<()> {
    displayout!(
        "{:>16} {:>14} {:>12}   {}\n",
        "Format", "Uncompressed", "Compressed", "Filename"
    );
    let mut failures = 0usize;
    for path in &args.files {
        match container_file_info(path) {
            Ok(info) => {
                let compressed = info
                    .file_size
                    .map_or_else(|| "-".to_owned(), |n| n.to_string());
                displayout!(
                    "{:>16} {:>14} {:>12}   {}\n",
                    info.header.format.to_string(),
                    info.header.uncompressed_size,
                    compressed,
                    info.path
                );
            }
            Err(e) => {
                display!("mam: {}: {}\n", path, e);
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{failures} file(s) are not readable containers");
    }
    Ok(())
}

pub fn batch(args: &BatchArgs) -> Result<()> {
    let options = args.codec.options();
    let engine = default_engine();
    check_engine(engine.as_ref(), options.format)?;

    let report = compress_batch(engine.as_ref(), &args.files, &options, args.threads, args.force)?;
    let totals = report.totals();
    displaylevel!(
        2,
        "{} file(s) compressed, {} failed: {} bytes -> {} bytes ({:.2}%)\n",
        report.succeeded(),
        report.failed(),
        totals.bytes_in,
        totals.bytes_out,
        totals.ratio()
    );
    if !report.is_success() {
        bail!("{} of {} file(s) failed", report.failed(), report.items.len());
    }
    Ok(())
}

fn sample_bytes(kind: SampleKind, size: Option<usize>, seed: u64) -> Vec<u8> {
    match (kind, size) {
        (SampleKind::Repeated, None) => sample::repeated_phrases(),
        (SampleKind::Repeated, Some(len)) => sample::repeated_pattern(&sample::repeated_phrases(), len),
        (SampleKind::Random, len) => sample::pseudo_random(len.unwrap_or(2000), seed),
        (SampleKind::Empty, _) => sample::empty(),
    }
}

/// Runs one round trip and returns its result; the caller maps `passed` to
/// the exit code.
pub fn run_verify(args: &VerifyArgs) -> Result<VerificationResult> {
    let options = args.codec.options();
    let engine = default_engine();

    let decompressor: Box<dyn Decompressor + '_> = match &args.decompressor {
        Some(program) => Box::new(
            ProcessDecompressor::new(program)
                .args(args.decompressor_args.iter().cloned())
                .timeout(Duration::from_secs(args.timeout)),
        ),
        None => Box::new(InProcessDecompressor::new(engine.as_ref())),
    };
    displaylevel!(
        3,
        "verifying {} with {:?} sample, format {}\n",
        decompressor.name(),
        args.sample,
        options.format
    );

    let result = verify(
        || sample_bytes(args.sample, args.size, args.seed),
        &options,
        engine.as_ref(),
        decompressor.as_ref(),
    );

    if !result.stdout.is_empty() {
        displaylevel!(3, "    STDOUT: {}\n", result.stdout.trim_end());
    }
    if !result.stderr.is_empty() {
        displaylevel!(2, "    STDERR: {}\n", result.stderr.trim_end());
    }
    Ok(result)
}
