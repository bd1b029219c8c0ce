//! File I/O primitives for container files.
//!
//! - [`open_src_file`] resolves a path string to a `Box<dyn Read>`,
//!   handling the `"stdin"` sentinel and rejecting directories.
//! - [`open_dst_file`] resolves a path string to a [`DstFile`], handling the
//!   `"stdout"` and null-device sentinels and enforcing the overwrite policy.
//! - [`copy_mtime`] carries the source modification time over to the output.
//!
//! Diagnostics go to stderr through the display-level macros.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use filetime::FileTime;

use crate::config::EXTENSION;
use crate::displaylevel;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Sentinel: discard output.
#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

#[inline]
pub fn is_stdin(s: &str) -> bool {
    s == STDIN_MARK
}

#[inline]
pub fn is_stdout(s: &str) -> bool {
    s == STDOUT_MARK
}

#[inline]
fn is_dev_null(s: &str) -> bool {
    s == NUL_MARK
}

/// `<input>.mam`; reading from stdin defaults to writing stdout.
pub fn default_output_name(input: &str) -> String {
    if is_stdin(input) {
        STDOUT_MARK.to_owned()
    } else {
        format!("{input}{EXTENSION}")
    }
}

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Opens a source for reading.
///
/// - `"stdin"` returns standard input.
/// - A directory is an [`io::ErrorKind::InvalidInput`] error.
/// - Anything else is opened and wrapped in a [`BufReader`].
pub fn open_src_file(path: &str) -> io::Result<Box<dyn Read>> {
    if is_stdin(path) {
        displaylevel!(4, "Using stdin for input\n");
        return Ok(Box::new(io::stdin()));
    }

    if Path::new(path).is_dir() {
        displaylevel!(1, "mam: {} is a directory -- ignored\n", path);
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path}: is a directory"),
        ));
    }

    let f = File::open(path).map_err(|e| {
        displaylevel!(1, "{}: {}\n", path, e);
        e
    })?;
    Ok(Box::new(BufReader::new(f)))
}

/// Reads the whole source into memory. Containers are bounded by the u32
/// size field, so payloads always fit.
pub fn read_src(path: &str) -> io::Result<Vec<u8>> {
    let mut reader = open_src_file(path)?;
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    displaylevel!(4, "{}: read {} bytes\n", path, data.len());
    Ok(data)
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// A write-capable destination produced by [`open_dst_file`].
pub struct DstFile {
    inner: Box<dyn Write>,
    pub is_stdout: bool,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Opens a destination for writing.
///
/// `"stdout"` and [`NUL_MARK`] are resolved before touching the filesystem.
/// An existing regular file is only replaced when `overwrite` is set;
/// otherwise the call fails with [`io::ErrorKind::AlreadyExists`].
pub fn open_dst_file(path: &str, overwrite: bool) -> io::Result<DstFile> {
    if is_stdout(path) {
        displaylevel!(4, "Using stdout for output\n");
        return Ok(DstFile {
            inner: Box::new(io::stdout()),
            is_stdout: true,
        });
    }

    if is_dev_null(path) {
        return Ok(DstFile {
            inner: Box::new(io::sink()),
            is_stdout: false,
        });
    }

    if !overwrite && Path::new(path).exists() {
        displaylevel!(1, "{} already exists; not overwritten\n", path);
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{path}: already exists; not overwritten"),
        ));
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            displaylevel!(1, "{}: {}\n", path, e);
            e
        })?;

    Ok(DstFile {
        inner: Box::new(f),
        is_stdout: false,
    })
}

/// Writes `bytes` to `path` in one go and flushes.
pub fn write_dst(path: &str, bytes: &[u8], overwrite: bool) -> io::Result<()> {
    let mut dst = open_dst_file(path, overwrite)?;
    dst.write_all(bytes)?;
    dst.flush()
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Copies the modification time of `src` onto `dst`.
///
/// Sentinels have no timestamps and are skipped.
pub fn copy_mtime(src: &str, dst: &str) -> io::Result<()> {
    if is_stdin(src) || is_stdout(dst) || is_dev_null(dst) {
        return Ok(());
    }
    let meta = fs::metadata(src)?;
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_mtime(dst, mtime)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
