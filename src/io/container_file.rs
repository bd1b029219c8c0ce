//! Whole-file compression, decompression and header inspection.
//!
//! Each call reads its source fully into memory, runs the codec once and
//! writes the result. Containers declare their size in a u32, so inputs above
//! 4 GiB are rejected by the codec rather than streamed.

use std::fs::File;

use crate::codec::{self, CodecOptions};
use crate::container::{peek_header, HeaderInfo};
use crate::displaylevel;
use crate::engine::CompressionEngine;
use crate::error::Result;
use crate::io::file_io::{copy_mtime, is_stdin, read_src, write_dst};

/// Byte counts of one completed file operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl FileStats {
    /// Output size as a percentage of input size.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        self.bytes_out as f64 / self.bytes_in as f64 * 100.0
    }
}

/// Compresses `src` into a container at `dst`.
pub fn compress_file<E: CompressionEngine + ?Sized>(
    engine: &E,
    src: &str,
    dst: &str,
    options: &CodecOptions,
    overwrite: bool,
) -> Result<FileStats> {
    let data = read_src(src)?;
    let container = codec::compress(engine, &data, options)?;
    write_dst(dst, container.as_bytes(), overwrite)?;
    copy_mtime(src, dst)?;

    let stats = FileStats {
        bytes_in: data.len() as u64,
        bytes_out: container.len() as u64,
    };
    displaylevel!(
        2,
        "{:<30} : {} bytes -> {} bytes ({:.2}%)\n",
        src,
        stats.bytes_in,
        stats.bytes_out,
        stats.ratio()
    );
    Ok(stats)
}

/// Expands the container at `src` into `dst`.
///
/// Nothing is written unless the payload expands to exactly the declared
/// size.
pub fn decompress_file<E: CompressionEngine + ?Sized>(
    engine: &E,
    src: &str,
    dst: &str,
    overwrite: bool,
) -> Result<FileStats> {
    let bytes = read_src(src)?;
    let data = codec::decompress(engine, &bytes)?;
    write_dst(dst, &data, overwrite)?;
    copy_mtime(src, dst)?;

    let stats = FileStats {
        bytes_in: bytes.len() as u64,
        bytes_out: data.len() as u64,
    };
    displaylevel!(
        2,
        "{:<30} : decoded {} bytes\n",
        src,
        stats.bytes_out
    );
    Ok(stats)
}

/// Header fields plus the on-disk size of one container file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerFileInfo {
    pub path: String,
    pub header: HeaderInfo,
    pub file_size: Option<u64>,
}

/// Reads only the header of the container at `path`.
pub fn container_file_info(path: &str) -> Result<ContainerFileInfo> {
    if is_stdin(path) {
        let header = peek_header(&mut std::io::stdin().lock())?;
        return Ok(ContainerFileInfo {
            path: path.to_owned(),
            header,
            file_size: None,
        });
    }
    let mut file = File::open(path)?;
    let file_size = file.metadata().ok().map(|m| m.len());
    let header = peek_header(&mut file)?;
    Ok(ContainerFileInfo {
        path: path.to_owned(),
        header,
        file_size,
    })
}
