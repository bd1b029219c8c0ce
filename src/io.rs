//! File-level operations on containers.
//!
//! This module assembles the I/O sub-modules and re-exports the symbols the
//! CLI uses.

pub mod batch;
pub mod container_file;
pub mod file_io;

pub use batch::{compress_batch, BatchItem, BatchReport};
pub use container_file::{
    compress_file, container_file_info, decompress_file, ContainerFileInfo, FileStats,
};

// ── Special I/O sentinels ────────────────────────────────────────────────────
pub use file_io::{default_output_name, NUL_MARK, STDIN_MARK, STDOUT_MARK};
