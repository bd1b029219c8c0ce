//! Portable LZNT1 engine.
//!
//! LZNT1 is the NT kernel's chunked LZ77 format (`COMPRESSION_FORMAT_LZNT1`,
//! code `0x02`). The stream is a run of chunks, each covering at most 4 KiB of
//! uncompressed data and opening with a 2-byte little-endian header:
//!
//! | Bits   | Meaning                                            |
//! |--------|----------------------------------------------------|
//! | 0..=11 | total chunk length (header included) minus 3       |
//! | 12..=14| signature, always `0b011`                          |
//! | 15     | set when the body is compressed, clear when stored |
//!
//! A compressed body is a series of groups: one flag byte followed by up to
//! eight tokens. Flag bit `i` clear means token `i` is one literal byte; set
//! means a 2-byte little-endian back-reference whose split between offset and
//! length depends on how far into the chunk the decoder is (see
//! [`split_for`]). A zero header, or the end of input, terminates the stream.
//!
//! The match finder keeps its hash-head and chain tables in the caller's
//! workspace, so the engine itself holds no mutable state.

mod compress;
mod decompress;

use crate::container::FormatCode;
use crate::engine::{
    CompressionEngine, CompressionRequest, DecompressionRequest, EngineError, NtStatus,
    WorkspaceSize,
};

pub use compress::compress_lznt1;
pub use decompress::decompress_lznt1;

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Uncompressed bytes covered by one chunk.
pub const LZNT1_CHUNK_SIZE: usize = 4096;

/// Bytes of chunk header.
pub const CHUNK_HEADER_SIZE: usize = 2;

/// Shortest back-reference.
pub const MIN_MATCH: usize = 3;

pub(crate) const HEADER_LENGTH_MASK: u16 = 0x0FFF;
pub(crate) const HEADER_SIGNATURE_MASK: u16 = 0x7000;
pub(crate) const HEADER_SIGNATURE: u16 = 0x3000;
pub(crate) const HEADER_COMPRESSED: u16 = 0x8000;

// Match-finder tables, both arrays of u16 stored little-endian in the workspace.
pub(crate) const HASH_BITS: u32 = 12;
pub(crate) const HASH_ENTRIES: usize = 1 << HASH_BITS;
pub(crate) const HEAD_TABLE_BYTES: usize = HASH_ENTRIES * 2;
pub(crate) const CHAIN_TABLE_BYTES: usize = LZNT1_CHUNK_SIZE * 2;

/// Scratch the compressor needs: hash heads plus the per-position chain.
pub const LZNT1_WORKSPACE_SIZE: u32 = (HEAD_TABLE_BYTES + CHAIN_TABLE_BYTES) as u32;

/// Candidates examined per position unless configured otherwise.
pub const DEFAULT_CHAIN_DEPTH: usize = 32;

/// Smallest chunk on the wire: the header's length field stores `total - 3`.
const MIN_CHUNK_TOTAL: usize = 3;

/// Upper bound on the output of a `compressed_len`-byte LZNT1 stream. Every
/// chunk spends at least 3 input bytes and yields at most one 4 KiB chunk.
pub fn max_decompressed_len(compressed_len: usize) -> usize {
    (compressed_len / MIN_CHUNK_TOTAL).saturating_mul(LZNT1_CHUNK_SIZE)
}

/// Offset/length split of a back-reference token decoded at `pos` bytes into
/// the current chunk: `(length_bits, length_mask)`.
///
/// Offset bits grow from 4 to 12 as the chunk fills: the smallest `b >= 4`
/// with `pos <= 1 << b`. Length takes the remaining `16 - b` bits.
#[inline]
pub(crate) fn split_for(pos: usize) -> (u32, u16) {
    let mut offset_bits = 4u32;
    while (1usize << offset_bits) < pos {
        offset_bits += 1;
    }
    let length_bits = 16 - offset_bits;
    (length_bits, ((1u32 << length_bits) - 1) as u16)
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────────────────

/// Pure-Rust LZNT1 engine. Handles [`FormatCode::LZNT1`] only.
#[derive(Clone, Debug)]
pub struct Lznt1Engine {
    chain_depth: usize,
}

impl Lznt1Engine {
    pub fn new() -> Self {
        Lznt1Engine {
            chain_depth: DEFAULT_CHAIN_DEPTH,
        }
    }

    /// Sets how many earlier positions the match finder tries per byte.
    /// Higher finds longer matches at the cost of speed; `0` emits literals only.
    pub fn with_chain_depth(mut self, depth: usize) -> Self {
        self.chain_depth = depth;
        self
    }

    fn check_format(format: FormatCode) -> Result<(), EngineError> {
        if format == FormatCode::LZNT1 {
            Ok(())
        } else {
            Err(EngineError::Status(NtStatus::UNSUPPORTED_COMPRESSION))
        }
    }
}

impl Default for Lznt1Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressionEngine for Lznt1Engine {
    fn name(&self) -> &'static str {
        "lznt1"
    }

    fn supports(&self, format: FormatCode) -> bool {
        format == FormatCode::LZNT1
    }

    fn workspace_size(&self, format: FormatCode) -> Result<WorkspaceSize, EngineError> {
        Self::check_format(format)?;
        Ok(WorkspaceSize {
            primary: LZNT1_WORKSPACE_SIZE,
            fragment: LZNT1_CHUNK_SIZE as u32,
        })
    }

    fn compress(&self, request: CompressionRequest<'_>) -> Result<usize, EngineError> {
        Self::check_format(request.format)?;
        if request.chunk_size as usize != LZNT1_CHUNK_SIZE {
            return Err(EngineError::Status(NtStatus::INVALID_PARAMETER));
        }
        if request.workspace.len() < LZNT1_WORKSPACE_SIZE as usize {
            return Err(EngineError::Status(NtStatus::BUFFER_TOO_SMALL));
        }
        compress_lznt1(
            request.source,
            request.destination,
            request.workspace.as_mut_slice(),
            self.chain_depth,
        )
        .map_err(EngineError::Status)
    }

    fn decompress(&self, request: DecompressionRequest<'_>) -> Result<usize, EngineError> {
        Self::check_format(request.format)?;
        decompress_lznt1(request.source, request.destination).map_err(EngineError::Status)
    }

    fn max_decompressed_len(&self, format: FormatCode, compressed_len: usize) -> Option<usize> {
        self.supports(format).then(|| max_decompressed_len(compressed_len))
    }
}
