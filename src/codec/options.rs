//! Runtime codec parameters.

use crate::config::{CHUNK_SIZE_DEFAULT, OVERHEAD_MARGIN_DEFAULT};
use crate::container::FormatCode;

/// Parameters of one compression run.
///
/// `overhead_margin` is the destination capacity reserved beyond the input
/// length. It is a tunable default rather than a guaranteed bound: raise it
/// for large incompressible inputs if the engine reports `BUFFER_TOO_SMALL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecOptions {
    pub format: FormatCode,
    pub chunk_size: u32,
    pub overhead_margin: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            format: FormatCode::platform_default(),
            chunk_size: CHUNK_SIZE_DEFAULT,
            overhead_margin: OVERHEAD_MARGIN_DEFAULT,
        }
    }
}

impl CodecOptions {
    pub fn new(format: FormatCode) -> Self {
        CodecOptions {
            format,
            ..Self::default()
        }
    }

    pub fn format(mut self, format: FormatCode) -> Self {
        self.format = format;
        self
    }

    pub fn chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn overhead_margin(mut self, margin: usize) -> Self {
        self.overhead_margin = margin;
        self
    }

    /// Destination capacity for compressing `input_len` bytes.
    #[inline]
    pub fn compress_capacity(&self, input_len: usize) -> usize {
        input_len.saturating_add(self.overhead_margin)
    }
}
