//! Format codes and the owned container value.

use std::fmt;
use std::str::FromStr;

use super::header::{decode, ContainerView};
use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// FormatCode
// ─────────────────────────────────────────────────────────────────────────────

/// Compression family identifier stored in byte 3 of the header.
///
/// The named constants follow the Windows `COMPRESSION_FORMAT_*` numbering.
/// Any byte is representable: decoding never rejects a container because of
/// its format code, only engines do when they are asked to handle one they do
/// not support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatCode(pub u8);

impl FormatCode {
    pub const NONE: FormatCode = FormatCode(0x00);
    pub const DEFAULT: FormatCode = FormatCode(0x01);
    /// LZNT1: 4 KiB chunks, LZ77 with position-dependent offset width.
    pub const LZNT1: FormatCode = FormatCode(0x02);
    /// Plain XPRESS (LZ77, no entropy stage).
    pub const XPRESS: FormatCode = FormatCode(0x03);
    /// XPRESS with Huffman coding; the code prefetch files carry.
    pub const XPRESS_HUFF: FormatCode = FormatCode(0x04);

    /// Format used when the caller does not choose one.
    ///
    /// XPRESS Huffman where the native engine exists, LZNT1 everywhere else
    /// since that is the family the portable engine implements.
    pub const fn platform_default() -> FormatCode {
        if cfg!(windows) {
            FormatCode::XPRESS_HUFF
        } else {
            FormatCode::LZNT1
        }
    }

    /// Raw byte value.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Human name for the known codes, `None` otherwise.
    pub fn name(self) -> Option<&'static str> {
        match self {
            FormatCode::NONE => Some("none"),
            FormatCode::DEFAULT => Some("default"),
            FormatCode::LZNT1 => Some("lznt1"),
            FormatCode::XPRESS => Some("xpress"),
            FormatCode::XPRESS_HUFF => Some("xpress-huff"),
            _ => None,
        }
    }
}

impl Default for FormatCode {
    fn default() -> Self {
        FormatCode::platform_default()
    }
}

impl From<u8> for FormatCode {
    fn from(b: u8) -> Self {
        FormatCode(b)
    }
}

impl fmt::Display for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:02X})", name, self.0),
            None => write!(f, "0x{:02X}", self.0),
        }
    }
}

impl FromStr for FormatCode {
    type Err = String;

    /// Accepts a known name (`lznt1`, `xpress`, `xpress-huff`, …) or a numeric
    /// byte in decimal or `0x` hex.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let named = match lower.as_str() {
            "none" => Some(FormatCode::NONE),
            "default" => Some(FormatCode::DEFAULT),
            "lznt1" => Some(FormatCode::LZNT1),
            "xpress" => Some(FormatCode::XPRESS),
            "xpress-huff" | "xpress_huff" | "xpresshuff" => Some(FormatCode::XPRESS_HUFF),
            _ => None,
        };
        if let Some(code) = named {
            return Ok(code);
        }
        let parsed = match lower.strip_prefix("0x") {
            Some(hex) => u8::from_str_radix(hex, 16),
            None => lower.parse::<u8>(),
        };
        parsed
            .map(FormatCode)
            .map_err(|_| format!("unknown format code: {s}"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Container
// ─────────────────────────────────────────────────────────────────────────────

/// An encoded container: header followed by the compressed payload.
///
/// Built once by [`encode`](super::encode) and read-only afterwards; there is
/// no API that mutates the bytes in place.
#[derive(Clone, PartialEq, Eq)]
pub struct Container {
    bytes: Vec<u8>,
}

impl Container {
    /// Wraps bytes that were just laid out by the encoder.
    pub(super) fn from_encoded(bytes: Vec<u8>) -> Self {
        Container { bytes }
    }

    /// Validates `bytes` as a container and takes ownership of them.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        decode(&bytes)?;
        Ok(Container { bytes })
    }

    /// Decoded view over the header fields and payload.
    pub fn view(&self) -> ContainerView<'_> {
        // The bytes were validated on construction.
        ContainerView::from_validated(&self.bytes)
    }

    pub fn format(&self) -> FormatCode {
        self.view().format
    }

    pub fn uncompressed_size(&self) -> u32 {
        self.view().uncompressed_size
    }

    pub fn payload(&self) -> &[u8] {
        self.view().payload
    }

    /// The full encoded byte sequence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total encoded length, header included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`: a container holds at least its 8-byte header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Container {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view();
        f.debug_struct("Container")
            .field("format", &view.format)
            .field("uncompressed_size", &view.uncompressed_size)
            .field("payload_len", &view.payload.len())
            .finish()
    }
}
