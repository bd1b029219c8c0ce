//! Container header layout: encode, decode and header-only peeking.
//!
//! | Offset | Size | Field              |
//! |--------|------|--------------------|
//! | 0      | 3    | ASCII tag `MAM`    |
//! | 3      | 1    | format code        |
//! | 4      | 4    | uncompressed size, LE u32 |
//! | 8      | N    | compressed payload |

use std::io::{self, Read};

use super::types::{Container, FormatCode};
use crate::config::{HEADER_SIZE, MAGIC_TAG};
use crate::error::{MamError, Result};

const FORMAT_OFFSET: usize = 3;
const SIZE_OFFSET: usize = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Byte-order helpers
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
fn read_le32(src: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        src[offset],
        src[offset + 1],
        src[offset + 2],
        src[offset + 3],
    ])
}

#[inline]
fn write_le32(dst: &mut [u8], offset: usize, value: u32) {
    dst[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoded view
// ─────────────────────────────────────────────────────────────────────────────

/// Header fields of a container plus a borrowed view of its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerView<'a> {
    pub format: FormatCode,
    pub uncompressed_size: u32,
    /// Everything after the 8-byte header. Borrowed from the source buffer.
    pub payload: &'a [u8],
}

impl<'a> ContainerView<'a> {
    /// Splits bytes already known to hold a valid header.
    pub(super) fn from_validated(bytes: &'a [u8]) -> Self {
        let header = parse_header(&bytes[..HEADER_SIZE]);
        ContainerView {
            format: header.format,
            uncompressed_size: header.uncompressed_size,
            payload: &bytes[HEADER_SIZE..],
        }
    }
}

/// Header fields only, as returned by [`peek_header`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderInfo {
    pub format: FormatCode,
    pub uncompressed_size: u32,
}

fn parse_header(header: &[u8]) -> HeaderInfo {
    HeaderInfo {
        format: FormatCode(header[FORMAT_OFFSET]),
        uncompressed_size: read_le32(header, SIZE_OFFSET),
    }
}

fn check_header(bytes: &[u8]) -> Result<()> {
    if bytes.len() < HEADER_SIZE {
        return Err(MamError::TruncatedInput { len: bytes.len() });
    }
    if &bytes[..3] != MAGIC_TAG {
        return Err(MamError::Format {
            found: [bytes[0], bytes[1], bytes[2]],
        });
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Lays out `MAM` + format byte + LE size + payload.
///
/// Purely structural: the payload is not inspected and `uncompressed_size` is
/// taken on trust.
pub fn encode(payload: &[u8], uncompressed_size: u32, format: FormatCode) -> Container {
    let mut bytes = vec![0u8; HEADER_SIZE + payload.len()];
    bytes[..3].copy_from_slice(MAGIC_TAG);
    bytes[FORMAT_OFFSET] = format.as_u8();
    write_le32(&mut bytes, SIZE_OFFSET, uncompressed_size);
    bytes[HEADER_SIZE..].copy_from_slice(payload);
    Container::from_encoded(bytes)
}

/// Parses the header of `bytes` and returns a view of its fields.
///
/// Fails with [`MamError::TruncatedInput`] below 8 bytes and with
/// [`MamError::Format`] when the tag is not exactly `MAM`, whatever the format
/// byte says. The payload is a slice of `bytes`; nothing is copied.
pub fn decode(bytes: &[u8]) -> Result<ContainerView<'_>> {
    check_header(bytes)?;
    Ok(ContainerView::from_validated(bytes))
}

/// Reads and validates only the 8-byte header from `reader`.
///
/// A reader that ends early yields [`MamError::TruncatedInput`] with the
/// number of bytes that were available.
pub fn peek_header<R: Read>(reader: &mut R) -> Result<HeaderInfo> {
    let mut header = [0u8; HEADER_SIZE];
    let mut filled = 0usize;
    while filled < HEADER_SIZE {
        match reader.read(&mut header[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    check_header(&header[..filled])?;
    Ok(parse_header(&header))
}
