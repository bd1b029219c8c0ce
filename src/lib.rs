// mam — MAM container framing, workspace-assisted chunked compression and
// round-trip verification.

pub mod config;
pub mod error;
pub mod container;
pub mod engine;
pub mod workspace;
pub mod codec;
pub mod io;
pub mod verify;
pub mod cli;

// ── Version constants ────────────────────────────────────────────────────────
pub const MAM_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    MAM_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use codec::{compress, decompress, ChunkedCodec, CodecOptions};
pub use container::{decode, encode, Container, ContainerView, FormatCode};
pub use engine::{default_engine, CompressionEngine, Lznt1Engine, NtStatus};
pub use error::{MamError, Result};
pub use verify::{verify, VerificationResult};
pub use workspace::{Workspace, WorkspaceManager, WorkspacePool};
