//! Compression engine boundary.
//!
//! The container layer never does entropy coding itself. It calls an engine
//! through [`CompressionEngine`], which mirrors the three native services the
//! format was designed around: a workspace-size query, a chunked compressor
//! and a size-bounded decompressor. The native call convention returns a
//! status code and writes results through out-parameters; adapters in this
//! module turn that into `Result<usize, EngineError>` so no raw status escapes
//! except as a preserved diagnostic code.
//!
//! Engines:
//! - [`lznt1::Lznt1Engine`]: pure Rust, every platform, format `0x02`.
//! - [`ntdll::NtdllEngine`]: Windows only, formats `0x02`–`0x04`, backed by
//!   `RtlCompressBuffer` / `RtlDecompressBufferEx`.

use std::fmt;

use crate::container::FormatCode;

pub mod lznt1;
#[cfg(windows)]
pub mod ntdll;
pub mod request;

pub use lznt1::Lznt1Engine;
#[cfg(windows)]
pub use ntdll::NtdllEngine;
pub use request::{CompressionRequest, DecompressionRequest};

// ─────────────────────────────────────────────────────────────────────────────
// Status codes
// ─────────────────────────────────────────────────────────────────────────────

/// A 32-bit NT status code as reported by an engine.
///
/// The portable engine reports failures with the same codes the native
/// service uses, so diagnostics read the same on every platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NtStatus(pub u32);

impl NtStatus {
    pub const SUCCESS: NtStatus = NtStatus(0x0000_0000);
    pub const INVALID_PARAMETER: NtStatus = NtStatus(0xC000_000D);
    pub const BUFFER_TOO_SMALL: NtStatus = NtStatus(0xC000_0023);
    pub const NOT_SUPPORTED: NtStatus = NtStatus(0xC000_00BB);
    pub const BAD_COMPRESSION_BUFFER: NtStatus = NtStatus(0xC000_0242);
    pub const UNSUPPORTED_COMPRESSION: NtStatus = NtStatus(0xC000_025F);

    #[inline]
    pub fn is_success(self) -> bool {
        self == NtStatus::SUCCESS
    }

    /// Symbolic name for the codes above.
    pub fn name(self) -> Option<&'static str> {
        match self {
            NtStatus::SUCCESS => Some("STATUS_SUCCESS"),
            NtStatus::INVALID_PARAMETER => Some("STATUS_INVALID_PARAMETER"),
            NtStatus::BUFFER_TOO_SMALL => Some("STATUS_BUFFER_TOO_SMALL"),
            NtStatus::NOT_SUPPORTED => Some("STATUS_NOT_SUPPORTED"),
            NtStatus::BAD_COMPRESSION_BUFFER => Some("STATUS_BAD_COMPRESSION_BUFFER"),
            NtStatus::UNSUPPORTED_COMPRESSION => Some("STATUS_UNSUPPORTED_COMPRESSION"),
            _ => None,
        }
    }
}

impl fmt::Display for NtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "0x{:08X} ({})", self.0, name),
            None => write!(f, "0x{:08X}", self.0),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine error
// ─────────────────────────────────────────────────────────────────────────────

/// Failure reported by an engine adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The engine could not be reached at all.
    Unavailable(String),
    /// The engine ran and returned a non-success status.
    Status(NtStatus),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Unavailable(why) => write!(f, "engine unavailable: {why}"),
            EngineError::Status(status) => write!(f, "engine status {status}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Scratch sizes an engine needs for one format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkspaceSize {
    /// Bytes of scratch memory needed by one compress / decompress call.
    pub primary: u32,
    /// Bytes needed to process one independently decodable fragment.
    pub fragment: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine trait
// ─────────────────────────────────────────────────────────────────────────────

/// A block compression service reached through a narrow, status-bearing
/// interface.
///
/// Implementations must treat the request's workspace as exclusively theirs
/// for the duration of one call and must never write past the request's
/// destination slice.
pub trait CompressionEngine: Send + Sync {
    /// Short identifier used in log lines.
    fn name(&self) -> &'static str;

    /// Whether `format` can be handled at all.
    fn supports(&self, format: FormatCode) -> bool;

    /// Scratch sizes needed for `format`.
    fn workspace_size(&self, format: FormatCode) -> Result<WorkspaceSize, EngineError>;

    /// Compresses `request.source` into `request.destination`; returns the
    /// number of destination bytes written.
    fn compress(&self, request: CompressionRequest<'_>) -> Result<usize, EngineError>;

    /// Decompresses `request.source` into `request.destination`; returns the
    /// number of destination bytes produced.
    fn decompress(&self, request: DecompressionRequest<'_>) -> Result<usize, EngineError>;

    /// Most bytes a `compressed_len`-byte payload of `format` can expand to,
    /// when the format bounds it. Lets the codec reject a forged size field
    /// before allocating for it.
    fn max_decompressed_len(&self, _format: FormatCode, _compressed_len: usize) -> Option<usize> {
        None
    }
}

impl<E: CompressionEngine + ?Sized> CompressionEngine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn supports(&self, format: FormatCode) -> bool {
        (**self).supports(format)
    }
    fn workspace_size(&self, format: FormatCode) -> Result<WorkspaceSize, EngineError> {
        (**self).workspace_size(format)
    }
    fn compress(&self, request: CompressionRequest<'_>) -> Result<usize, EngineError> {
        (**self).compress(request)
    }
    fn decompress(&self, request: DecompressionRequest<'_>) -> Result<usize, EngineError> {
        (**self).decompress(request)
    }
    fn max_decompressed_len(&self, format: FormatCode, compressed_len: usize) -> Option<usize> {
        (**self).max_decompressed_len(format, compressed_len)
    }
}

/// The engine to use when the caller has no preference: the native service on
/// Windows, the portable LZNT1 engine elsewhere.
pub fn default_engine() -> Box<dyn CompressionEngine> {
    #[cfg(windows)]
    {
        Box::new(NtdllEngine::new())
    }
    #[cfg(not(windows))]
    {
        Box::new(Lznt1Engine::new())
    }
}
