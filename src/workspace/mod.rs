//! Engine scratch memory.
//!
//! [`WorkspaceManager`] asks the engine how much scratch a format needs and
//! hands out zero-initialised [`Workspace`] regions of exactly that size. A
//! workspace belongs to one engine call: the codec acquires it right before
//! the call and lets it drop right after, on success and error paths alike.
//!
//! [`WorkspacePool`] is the batch variant: a fixed set of workspaces per
//! format code, checked out exclusively and returned (re-zeroed) on drop.

use std::fmt;

use crate::container::FormatCode;
use crate::displaylevel;
use crate::engine::{CompressionEngine, EngineError, WorkspaceSize};
use crate::error::{MamError, Result};

pub mod pool;

pub use pool::{PooledWorkspace, WorkspacePool};

// ─────────────────────────────────────────────────────────────────────────────
// Workspace
// ─────────────────────────────────────────────────────────────────────────────

/// Zero-initialised scratch region owned by a single engine call.
pub struct Workspace {
    data: Vec<u8>,
}

impl Workspace {
    /// Allocates `size` zeroed bytes.
    pub fn zeroed(size: usize) -> Self {
        Workspace {
            data: vec![0u8; size],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Zeroes the region again so the next user starts from a clean state.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

impl fmt::Debug for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workspace").field("len", &self.data.len()).finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WorkspaceManager
// ─────────────────────────────────────────────────────────────────────────────

/// Sizes and allocates workspaces for one engine.
pub struct WorkspaceManager<'e, E: CompressionEngine + ?Sized> {
    engine: &'e E,
}

impl<'e, E: CompressionEngine + ?Sized> WorkspaceManager<'e, E> {
    pub fn new(engine: &'e E) -> Self {
        WorkspaceManager { engine }
    }

    /// Primary and fragment scratch sizes for `format`.
    ///
    /// An unreachable engine maps to [`MamError::EngineUnavailable`], a
    /// failing query to [`MamError::EngineStatus`].
    pub fn size_for(&self, format: FormatCode) -> Result<WorkspaceSize> {
        let size = self.engine.workspace_size(format).map_err(|e| match e {
            EngineError::Unavailable(why) => MamError::EngineUnavailable(why),
            EngineError::Status(code) => MamError::EngineStatus { code },
        })?;
        displaylevel!(
            4,
            "{}: workspace for {} = {} bytes (fragment {} bytes)\n",
            self.engine.name(),
            format,
            size.primary,
            size.fragment
        );
        Ok(size)
    }

    /// A fresh zeroed workspace of exactly `primary_size` bytes.
    pub fn acquire(&self, primary_size: u32) -> Workspace {
        Workspace::zeroed(primary_size as usize)
    }

    /// `size_for` followed by `acquire`.
    pub fn acquire_for(&self, format: FormatCode) -> Result<Workspace> {
        let size = self.size_for(format)?;
        Ok(self.acquire(size.primary))
    }
}
