//! Per-call request values handed to an engine.
//!
//! Both are built by the chunked codec right before the engine call and
//! dropped right after it. They borrow everything; the workspace borrow is
//! mutable so the borrow checker enforces exclusive use for the call.

use crate::container::FormatCode;
use crate::workspace::Workspace;

/// Inputs of one compression call.
#[derive(Debug)]
pub struct CompressionRequest<'a> {
    pub format: FormatCode,
    /// Block granularity the engine uses internally.
    pub chunk_size: u32,
    pub source: &'a [u8],
    /// Output buffer; its length is the capacity the engine may use.
    pub destination: &'a mut [u8],
    pub workspace: &'a mut Workspace,
}

/// Inputs of one decompression call.
#[derive(Debug)]
pub struct DecompressionRequest<'a> {
    pub format: FormatCode,
    pub source: &'a [u8],
    /// Output buffer sized to the declared uncompressed length.
    pub destination: &'a mut [u8],
    pub workspace: &'a mut Workspace,
}
