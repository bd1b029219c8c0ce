//! Per-format workspace pool for batch processing.
//!
//! Each format code gets a fixed number of workspaces, created on first use
//! and circulated through a `crossbeam_channel::bounded` channel.
//! [`WorkspacePool::checkout`] blocks until one is free, so at most `count`
//! calls per format are in flight and no workspace is ever held by two of them.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

use crossbeam_channel::{bounded, Receiver, Sender};

use super::{Workspace, WorkspaceManager};
use crate::config::POOL_WORKSPACES_DEFAULT;
use crate::container::FormatCode;
use crate::displaylevel;
use crate::engine::CompressionEngine;
use crate::error::Result;

struct Slot {
    sender: Sender<Workspace>,
    receiver: Receiver<Workspace>,
}

/// Workspaces kept per format code, sized by one engine.
pub struct WorkspacePool<'e, E: CompressionEngine + ?Sized> {
    manager: WorkspaceManager<'e, E>,
    count: usize,
    slots: Mutex<HashMap<FormatCode, Slot>>,
}

impl<'e, E: CompressionEngine + ?Sized> WorkspacePool<'e, E> {
    /// A pool holding `count` workspaces per format; `0` means one per CPU.
    pub fn new(engine: &'e E, count: usize) -> Self {
        let count = if count == 0 { num_cpus::get().max(1) } else { count };
        WorkspacePool {
            manager: WorkspaceManager::new(engine),
            count,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// A pool with the default per-format count.
    pub fn with_default_size(engine: &'e E) -> Self {
        Self::new(engine, POOL_WORKSPACES_DEFAULT)
    }

    /// Workspaces per format.
    pub fn capacity(&self) -> usize {
        self.count
    }

    /// Takes a workspace for `format`, blocking while all are in use.
    ///
    /// The first checkout for a format queries the engine and allocates the
    /// whole set; sizing failures are reported then and nothing is cached.
    pub fn checkout(&self, format: FormatCode) -> Result<PooledWorkspace<'_>> {
        let (sender, receiver) = {
            let mut slots = self.slots.lock().unwrap_or_else(|p| p.into_inner());
            if !slots.contains_key(&format) {
                let size = self.manager.size_for(format)?;
                let (sender, receiver) = bounded(self.count);
                for _ in 0..self.count {
                    sender
                        .send(self.manager.acquire(size.primary))
                        .expect("channel capacity matches loop count");
                }
                displaylevel!(
                    4,
                    "workspace pool: {} x {} bytes for {}\n",
                    self.count,
                    size.primary,
                    format
                );
                slots.insert(format, Slot { sender, receiver });
            }
            let slot = &slots[&format];
            (slot.sender.clone(), slot.receiver.clone())
        };
        // Block outside the lock so other formats stay available.
        let workspace = receiver
            .recv()
            .expect("workspace pool channel closed unexpectedly");
        Ok(PooledWorkspace {
            workspace: Some(workspace),
            home: sender,
            _pool: std::marker::PhantomData,
        })
    }
}

/// A workspace on loan from a [`WorkspacePool`]; returned zeroed on drop.
pub struct PooledWorkspace<'p> {
    workspace: Option<Workspace>,
    home: Sender<Workspace>,
    _pool: std::marker::PhantomData<&'p ()>,
}

impl Deref for PooledWorkspace<'_> {
    type Target = Workspace;

    fn deref(&self) -> &Workspace {
        self.workspace.as_ref().expect("workspace present until drop")
    }
}

impl DerefMut for PooledWorkspace<'_> {
    fn deref_mut(&mut self) -> &mut Workspace {
        self.workspace.as_mut().expect("workspace present until drop")
    }
}

impl Drop for PooledWorkspace<'_> {
    fn drop(&mut self) {
        if let Some(mut ws) = self.workspace.take() {
            ws.clear();
            // The pool owns a receiver for as long as it lives; a failed send
            // only means the pool is gone and the workspace can be freed.
            let _ = self.home.send(ws);
        }
    }
}
