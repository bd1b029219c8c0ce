//! Native Windows engine backed by the NT runtime library.
//!
//! `RtlGetCompressionWorkSpaceSize`, `RtlCompressBuffer` and
//! `RtlDecompressBufferEx` report through an `NTSTATUS` return value and write
//! sizes through out-parameters. This adapter is the only place that sees that
//! convention; callers get `Result<usize, EngineError>`.
//!
//! There is no process-wide handle: `ntdll` is linked at build time and an
//! [`NtdllEngine`] value is constructed explicitly by whoever needs one.

use std::ptr;

use winapi::shared::ntdef::{NTSTATUS, PUCHAR, PULONG, PVOID, ULONG, USHORT};

use crate::container::FormatCode;
use crate::engine::{
    CompressionEngine, CompressionRequest, DecompressionRequest, EngineError, NtStatus,
    WorkspaceSize,
};

const COMPRESSION_ENGINE_STANDARD: USHORT = 0x0000;

#[link(name = "ntdll")]
extern "system" {
    fn RtlGetCompressionWorkSpaceSize(
        compression_format_and_engine: USHORT,
        compress_buffer_work_space_size: PULONG,
        compress_fragment_work_space_size: PULONG,
    ) -> NTSTATUS;

    fn RtlCompressBuffer(
        compression_format_and_engine: USHORT,
        uncompressed_buffer: PUCHAR,
        uncompressed_buffer_size: ULONG,
        compressed_buffer: PUCHAR,
        compressed_buffer_size: ULONG,
        uncompressed_chunk_size: ULONG,
        final_compressed_size: PULONG,
        work_space: PVOID,
    ) -> NTSTATUS;

    fn RtlDecompressBufferEx(
        compression_format: USHORT,
        uncompressed_buffer: PUCHAR,
        uncompressed_buffer_size: ULONG,
        compressed_buffer: PUCHAR,
        compressed_buffer_size: ULONG,
        final_uncompressed_size: PULONG,
        work_space: PVOID,
    ) -> NTSTATUS;
}

#[inline]
fn check(status: NTSTATUS) -> Result<(), EngineError> {
    if status == 0 {
        Ok(())
    } else {
        Err(EngineError::Status(NtStatus(status as u32)))
    }
}

#[inline]
fn to_ulong(len: usize) -> Result<ULONG, EngineError> {
    ULONG::try_from(len).map_err(|_| EngineError::Status(NtStatus::INVALID_PARAMETER))
}

/// `RtlCompressBuffer`-backed engine for LZNT1, XPRESS and XPRESS Huffman.
#[derive(Clone, Copy, Debug, Default)]
pub struct NtdllEngine;

impl NtdllEngine {
    pub fn new() -> Self {
        NtdllEngine
    }

    fn format_and_engine(format: FormatCode) -> Result<USHORT, EngineError> {
        match format {
            FormatCode::LZNT1 | FormatCode::XPRESS | FormatCode::XPRESS_HUFF => {
                Ok(format.as_u8() as USHORT | COMPRESSION_ENGINE_STANDARD)
            }
            _ => Err(EngineError::Status(NtStatus::UNSUPPORTED_COMPRESSION)),
        }
    }
}

impl CompressionEngine for NtdllEngine {
    fn name(&self) -> &'static str {
        "ntdll"
    }

    fn supports(&self, format: FormatCode) -> bool {
        Self::format_and_engine(format).is_ok()
    }

    fn workspace_size(&self, format: FormatCode) -> Result<WorkspaceSize, EngineError> {
        let fe = Self::format_and_engine(format)?;
        let mut primary: ULONG = 0;
        let mut fragment: ULONG = 0;
        // SAFETY: both out-pointers refer to live locals.
        check(unsafe { RtlGetCompressionWorkSpaceSize(fe, &mut primary, &mut fragment) })?;
        Ok(WorkspaceSize { primary, fragment })
    }

    fn compress(&self, request: CompressionRequest<'_>) -> Result<usize, EngineError> {
        let fe = Self::format_and_engine(request.format)?;
        let src_len = to_ulong(request.source.len())?;
        let dst_len = to_ulong(request.destination.len())?;
        let mut final_size: ULONG = 0;
        // SAFETY: the source is only read despite the non-const pointer type;
        // destination and workspace lengths match what is passed, and the
        // workspace is exclusively borrowed for the call.
        check(unsafe {
            RtlCompressBuffer(
                fe,
                request.source.as_ptr() as PUCHAR,
                src_len,
                request.destination.as_mut_ptr(),
                dst_len,
                request.chunk_size,
                &mut final_size,
                workspace_ptr(request.workspace.as_mut_slice()),
            )
        })?;
        Ok(final_size as usize)
    }

    fn decompress(&self, request: DecompressionRequest<'_>) -> Result<usize, EngineError> {
        let fe = Self::format_and_engine(request.format)?;
        let src_len = to_ulong(request.source.len())?;
        let dst_len = to_ulong(request.destination.len())?;
        let mut final_size: ULONG = 0;
        // SAFETY: as in `compress`.
        check(unsafe {
            RtlDecompressBufferEx(
                fe,
                request.destination.as_mut_ptr(),
                dst_len,
                request.source.as_ptr() as PUCHAR,
                src_len,
                &mut final_size,
                workspace_ptr(request.workspace.as_mut_slice()),
            )
        })?;
        Ok(final_size as usize)
    }

    fn max_decompressed_len(&self, format: FormatCode, compressed_len: usize) -> Option<usize> {
        (format == FormatCode::LZNT1).then(|| super::lznt1::max_decompressed_len(compressed_len))
    }
}

#[inline]
fn workspace_ptr(ws: &mut [u8]) -> PVOID {
    if ws.is_empty() {
        ptr::null_mut()
    } else {
        ws.as_mut_ptr() as PVOID
    }
}
