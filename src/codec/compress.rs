//! Chunked compression into a container.
//!
//! Sequence for one call:
//! 1. size and acquire a workspace for the format;
//! 2. allocate `input + overhead_margin` bytes of destination;
//! 3. hand source, destination, chunk size and workspace to the engine;
//! 4. lift a failing status into [`MamError::CompressionEngine`], otherwise
//!    truncate to the length the engine reports;
//! 5. frame the result with the input length as `uncompressedSize`.
//!
//! The workspace lives in a local and is dropped when the call returns,
//! whichever path it takes.

use super::options::CodecOptions;
use crate::container::{encode, Container};
use crate::displaylevel;
use crate::engine::{CompressionEngine, CompressionRequest, EngineError};
use crate::error::{MamError, Result};
use crate::workspace::{Workspace, WorkspaceManager};

/// Maps an engine failure during compression.
fn compression_error(e: EngineError) -> MamError {
    match e {
        EngineError::Unavailable(why) => MamError::EngineUnavailable(why),
        EngineError::Status(status) => MamError::CompressionEngine { status },
    }
}

/// Runs one engine compression call with a caller-provided workspace and
/// frames the result.
pub(crate) fn compress_with_workspace<E: CompressionEngine + ?Sized>(
    engine: &E,
    data: &[u8],
    options: &CodecOptions,
    workspace: &mut Workspace,
) -> Result<Container> {
    let declared = u32::try_from(data.len()).map_err(|_| MamError::InputTooLarge { len: data.len() })?;

    let mut compressed = vec![0u8; options.compress_capacity(data.len())];
    let written = engine
        .compress(CompressionRequest {
            format: options.format,
            chunk_size: options.chunk_size,
            source: data,
            destination: &mut compressed,
            workspace,
        })
        .map_err(compression_error)?;
    compressed.truncate(written);

    displaylevel!(
        3,
        "{}: compressed {} bytes into {} bytes ({})\n",
        engine.name(),
        data.len(),
        written,
        options.format
    );

    Ok(encode(&compressed, declared, options.format))
}

/// Compresses `data` with `engine` and returns the framed container.
///
/// Empty input is valid: the engine still runs against the margin-sized
/// destination and the header records a size of 0.
pub fn compress<E: CompressionEngine + ?Sized>(
    engine: &E,
    data: &[u8],
    options: &CodecOptions,
) -> Result<Container> {
    let manager = WorkspaceManager::new(engine);
    let size = manager.size_for(options.format)?;
    let mut workspace = manager.acquire(size.primary);
    compress_with_workspace(engine, data, options, &mut workspace)
}
