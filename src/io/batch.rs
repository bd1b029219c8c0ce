//! Parallel compression of many files.
//!
//! Files are spread over a dedicated rayon pool of `threads` workers. Every
//! worker checks a workspace out of one shared [`WorkspacePool`] sized to the
//! thread count, so no two in-flight calls ever share scratch memory and no
//! worker allocates a fresh workspace per file.

use rayon::prelude::*;

use crate::codec::{compress::compress_with_workspace, CodecOptions};
use crate::displaylevel;
use crate::engine::CompressionEngine;
use crate::error::{MamError, Result};
use crate::io::container_file::FileStats;
use crate::io::file_io::{copy_mtime, default_output_name, read_src, write_dst};
use crate::workspace::WorkspacePool;

/// Outcome of one file in a batch.
#[derive(Debug)]
pub struct BatchItem {
    pub src: String,
    pub dst: String,
    pub result: Result<FileStats>,
}

/// Summary of a batch run; items keep the order of the input list.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn totals(&self) -> FileStats {
        self.items
            .iter()
            .filter_map(|i| i.result.as_ref().ok())
            .fold(FileStats::default(), |acc, s| FileStats {
                bytes_in: acc.bytes_in + s.bytes_in,
                bytes_out: acc.bytes_out + s.bytes_out,
            })
    }
}

fn compress_one<E: CompressionEngine + ?Sized>(
    engine: &E,
    pool: &WorkspacePool<'_, E>,
    src: &str,
    dst: &str,
    options: &CodecOptions,
    overwrite: bool,
) -> Result<FileStats> {
    let data = read_src(src)?;
    let container = {
        let mut workspace = pool.checkout(options.format)?;
        compress_with_workspace(engine, &data, options, &mut workspace)?
    };
    write_dst(dst, container.as_bytes(), overwrite)?;
    copy_mtime(src, dst)?;
    Ok(FileStats {
        bytes_in: data.len() as u64,
        bytes_out: container.len() as u64,
    })
}

/// Compresses every file in `files` to `<file>.mam` using `threads`
/// workers (`0` means one per CPU).
///
/// Per-file failures are collected in the report; only failing to build the
/// thread pool aborts the whole batch.
pub fn compress_batch<E: CompressionEngine + ?Sized>(
    engine: &E,
    files: &[String],
    options: &CodecOptions,
    threads: usize,
    overwrite: bool,
) -> Result<BatchReport> {
    let threads = if threads == 0 { num_cpus::get().max(1) } else { threads };
    let workers = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| MamError::Io(std::io::Error::other(e.to_string())))?;
    let pool = WorkspacePool::new(engine, threads);

    displaylevel!(
        3,
        "batch: {} file(s) on {} thread(s), format {}\n",
        files.len(),
        threads,
        options.format
    );

    let items = workers.install(|| {
        files
            .par_iter()
            .map(|src| {
                let dst = default_output_name(src);
                let result = compress_one(engine, &pool, src, &dst, options, overwrite);
                match &result {
                    Ok(stats) => displaylevel!(
                        2,
                        "{:<30} : {} bytes -> {} bytes\n",
                        src,
                        stats.bytes_in,
                        stats.bytes_out
                    ),
                    Err(e) => displaylevel!(1, "mam: {}: {}\n", src, e),
                }
                BatchItem {
                    src: src.clone(),
                    dst,
                    result,
                }
            })
            .collect()
    });

    Ok(BatchReport { items })
}
