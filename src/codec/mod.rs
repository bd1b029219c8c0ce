//! Workspace-assisted chunked compression and decompression.
//!
//! The free functions [`compress`] and [`decompress`] take the engine as an
//! argument and allocate a fresh workspace per call. [`ChunkedCodec`] bundles
//! an engine with [`CodecOptions`] and adds pool-backed variants for batches.

pub mod compress;
pub mod decompress;
pub mod options;

pub use compress::compress;
pub use decompress::decompress;
pub use options::CodecOptions;

use crate::container::{decode, Container};
use crate::engine::CompressionEngine;
use crate::error::Result;
use crate::workspace::WorkspacePool;

/// An engine plus the options every call made through it uses.
///
/// The engine is injected by the caller; nothing here reaches for a global.
pub struct ChunkedCodec<E: CompressionEngine> {
    engine: E,
    options: CodecOptions,
}

impl<E: CompressionEngine> ChunkedCodec<E> {
    pub fn new(engine: E, options: CodecOptions) -> Self {
        ChunkedCodec { engine, options }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn compress(&self, data: &[u8]) -> Result<Container> {
        compress::compress(&self.engine, data, &self.options)
    }

    pub fn decompress(&self, container: &[u8]) -> Result<Vec<u8>> {
        decompress::decompress(&self.engine, container)
    }

    /// Like [`compress`](Self::compress) with a workspace on loan from `pool`.
    pub fn compress_with_pool(
        &self,
        data: &[u8],
        pool: &WorkspacePool<'_, E>,
    ) -> Result<Container> {
        let mut workspace = pool.checkout(self.options.format)?;
        compress::compress_with_workspace(&self.engine, data, &self.options, &mut workspace)
    }

    /// Like [`decompress`](Self::decompress) with a workspace on loan from `pool`.
    pub fn decompress_with_pool(
        &self,
        container: &[u8],
        pool: &WorkspacePool<'_, E>,
    ) -> Result<Vec<u8>> {
        let view = decode(container)?;
        let mut workspace = pool.checkout(view.format)?;
        decompress::decompress_view_with_workspace(&self.engine, &view, &mut workspace)
    }

    /// A pool sized by this codec's engine.
    pub fn pool(&self, workspaces_per_format: usize) -> WorkspacePool<'_, E> {
        WorkspacePool::new(&self.engine, workspaces_per_format)
    }
}
