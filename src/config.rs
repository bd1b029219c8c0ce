// config.rs — Compile-time defaults.
//
// Every value here is a default only: `CodecOptions` overrides the codec
// parameters at runtime, and the `mam` command line overrides both.

use std::time::Duration;

// Length of the fixed container header: 3-byte tag, 1-byte format code,
// 4-byte little-endian uncompressed size.
pub const HEADER_SIZE: usize = 8;

// ASCII tag opening every container.
pub const MAGIC_TAG: &[u8; 3] = b"MAM";

// Chunk granularity handed to the engine. 4 KiB is the only size LZNT1
// accepts and the conventional size for the XPRESS family.
pub const CHUNK_SIZE_DEFAULT: u32 = 4096;

// Extra destination capacity reserved on top of the input length when
// compressing. A practical default, not a proven worst case: an
// incompressible input large enough to need more than this in per-chunk
// framing makes the engine report BUFFER_TOO_SMALL.
pub const OVERHEAD_MARGIN_DEFAULT: usize = 4096;

// Extension appended to the input name when `mam compress` gets no output name.
pub const EXTENSION: &str = ".mam";

// Deadline for an external decompressor run by the verifier.
pub const PROCESS_TIMEOUT_DEFAULT: Duration = Duration::from_secs(30);

// Polling step while waiting on an external decompressor.
pub const PROCESS_POLL_INTERVAL: Duration = Duration::from_millis(10);

// How long to wait for an external decompressor's captured stdout/stderr once
// it has exited or been killed. A descendant still holding the pipe open
// forfeits its output after this.
pub const PROCESS_DRAIN_GRACE: Duration = Duration::from_millis(500);

// Workspaces kept per format code by `WorkspacePool` when the caller does not
// size the pool explicitly; 0 means "one per logical CPU".
pub const POOL_WORKSPACES_DEFAULT: usize = 0;
