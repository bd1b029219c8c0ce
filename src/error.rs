//! Error taxonomy shared by the container codec, the workspace manager and the
//! chunked compressor / decompressor.
//!
//! Engine adapters speak [`EngineError`](crate::engine::EngineError); the
//! codec layer lifts those into the variants below so the raw status code is
//! kept for diagnostics while the failing stage (sizing, compression,
//! decompression) is explicit in the variant.

use std::io;

use thiserror::Error;

use crate::engine::NtStatus;

/// Errors surfaced by every public operation of the crate.
#[derive(Debug, Error)]
pub enum MamError {
    /// The first three bytes are not the ASCII tag `MAM`.
    #[error("not a MAM container: header tag is {found:02X?}")]
    Format {
        /// The three bytes found where the tag was expected.
        found: [u8; 3],
    },

    /// Fewer than the 8 header bytes are available.
    #[error("truncated container: {len} byte(s), header needs 8")]
    TruncatedInput {
        /// Length of the buffer that was offered.
        len: usize,
    },

    /// The compression engine cannot be reached (not present on this platform,
    /// failed to start, or exceeded its deadline).
    #[error("compression engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The workspace-size query reported a non-zero status.
    #[error("workspace size query failed with status {code}")]
    EngineStatus {
        /// Status reported by the engine.
        code: NtStatus,
    },

    /// The engine failed to compress.
    #[error("compression failed with status {status}")]
    CompressionEngine {
        /// Status reported by the engine.
        status: NtStatus,
    },

    /// The engine failed to decompress.
    #[error("decompression failed with status {status}")]
    DecompressionEngine {
        /// Status reported by the engine.
        status: NtStatus,
    },

    /// The engine succeeded but produced a different length than the header
    /// declares.
    #[error("size mismatch: header declares {declared} byte(s), payload expanded to {actual}")]
    SizeMismatch {
        /// `uncompressedSize` from the header.
        declared: u32,
        /// Bytes the engine actually produced.
        actual: usize,
    },

    /// The header declares more output than the payload can expand to.
    #[error(
        "implausible size: header declares {declared} byte(s), \
         a {payload}-byte payload expands to at most {limit}"
    )]
    ImplausibleSize {
        /// `uncompressedSize` from the header.
        declared: u32,
        /// Payload length.
        payload: usize,
        /// Engine's bound for that payload length.
        limit: usize,
    },

    /// The buffer for the declared output size could not be allocated.
    #[error("cannot allocate {len} byte(s) for the decompressed output")]
    OutOfMemory {
        /// Requested length.
        len: usize,
    },

    /// Input longer than a 32-bit size field can describe.
    #[error("input of {len} bytes does not fit a 32-bit size field")]
    InputTooLarge {
        /// Offending length.
        len: usize,
    },

    /// Underlying I/O failure (file glue only).
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MamError>;
