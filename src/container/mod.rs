//! MAM container codec.
//!
//! A container is an 8-byte header (`MAM`, a format code, the little-endian
//! uncompressed size) followed by the compressed payload. This module is the
//! single place that knows the layout; the chunked codec, the verifier and the
//! command line all go through it.

pub mod header;
pub mod types;

pub use header::{decode, encode, peek_header, ContainerView, HeaderInfo};
pub use types::{Container, FormatCode};
