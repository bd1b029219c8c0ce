//! Container decompression.
//!
//! The destination is allocated at exactly the declared `uncompressedSize`;
//! the engine must fill all of it. An engine that reports success with a
//! different length means the header and payload disagree, which is reported
//! as [`MamError::SizeMismatch`] instead of returning a short or padded buffer.

use crate::container::{decode, ContainerView};
use crate::displaylevel;
use crate::engine::{CompressionEngine, DecompressionRequest, EngineError};
use crate::error::{MamError, Result};
use crate::workspace::{Workspace, WorkspaceManager};

fn decompression_error(e: EngineError) -> MamError {
    match e {
        EngineError::Unavailable(why) => MamError::EngineUnavailable(why),
        EngineError::Status(status) => MamError::DecompressionEngine { status },
    }
}

/// Zeroed destination for `view`, refusing sizes the payload cannot reach
/// and reporting allocation failure instead of aborting.
fn allocate_output<E: CompressionEngine + ?Sized>(
    engine: &E,
    view: &ContainerView<'_>,
) -> Result<Vec<u8>> {
    let declared = view.uncompressed_size;
    let len = declared as usize;
    if let Some(limit) = engine.max_decompressed_len(view.format, view.payload.len()) {
        if len > limit {
            return Err(MamError::ImplausibleSize {
                declared,
                payload: view.payload.len(),
                limit,
            });
        }
    }
    let mut output = Vec::new();
    output
        .try_reserve_exact(len)
        .map_err(|_| MamError::OutOfMemory { len })?;
    output.resize(len, 0);
    Ok(output)
}

/// Expands an already decoded container with a caller-provided workspace.
pub(crate) fn decompress_view_with_workspace<E: CompressionEngine + ?Sized>(
    engine: &E,
    view: &ContainerView<'_>,
    workspace: &mut Workspace,
) -> Result<Vec<u8>> {
    let declared = view.uncompressed_size;
    let mut output = allocate_output(engine, view)?;

    let produced = engine
        .decompress(DecompressionRequest {
            format: view.format,
            source: view.payload,
            destination: &mut output,
            workspace,
        })
        .map_err(decompression_error)?;

    if produced != declared as usize {
        displaylevel!(
            4,
            "{}: header declares {} bytes but payload expanded to {}\n",
            engine.name(),
            declared,
            produced
        );
        return Err(MamError::SizeMismatch {
            declared,
            actual: produced,
        });
    }

    displaylevel!(
        3,
        "{}: decompressed {} bytes into {} bytes ({})\n",
        engine.name(),
        view.payload.len(),
        produced,
        view.format
    );
    Ok(output)
}

/// Decodes `container` and expands its payload with `engine`.
///
/// The workspace is sized with the same query and format code compression
/// uses.
pub fn decompress<E: CompressionEngine + ?Sized>(engine: &E, container: &[u8]) -> Result<Vec<u8>> {
    let view = decode(container)?;
    let manager = WorkspaceManager::new(engine);
    let size = manager.size_for(view.format)?;
    let mut workspace = manager.acquire(size.primary);
    decompress_view_with_workspace(engine, &view, &mut workspace)
}
