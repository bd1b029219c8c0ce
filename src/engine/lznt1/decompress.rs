//! LZNT1 decoder.
//!
//! Every bounds condition maps to `BAD_COMPRESSION_BUFFER`: a header or body
//! that runs past the input, a back-reference reaching before the chunk start,
//! a chunk expanding past 4 KiB, or output that would not fit the destination.
//! Malformed input must never panic.

use super::{
    split_for, CHUNK_HEADER_SIZE, HEADER_COMPRESSED, HEADER_LENGTH_MASK, HEADER_SIGNATURE,
    HEADER_SIGNATURE_MASK, LZNT1_CHUNK_SIZE, MIN_MATCH,
};
use crate::engine::NtStatus;

#[inline(always)]
fn corrupt<T>() -> Result<T, NtStatus> {
    Err(NtStatus::BAD_COMPRESSION_BUFFER)
}

/// Expands one compressed chunk body into `dst[op..]`; returns bytes produced.
fn decode_chunk_body(body: &[u8], dst: &mut [u8], op: usize) -> Result<usize, NtStatus> {
    let mut ip = 0usize;
    let mut pos = 0usize;

    while ip < body.len() {
        let flags = body[ip];
        ip += 1;

        for bit in 0..8 {
            if ip >= body.len() {
                break;
            }
            if flags & (1 << bit) == 0 {
                if pos >= LZNT1_CHUNK_SIZE || op + pos >= dst.len() {
                    return corrupt();
                }
                dst[op + pos] = body[ip];
                ip += 1;
                pos += 1;
                continue;
            }

            if ip + 2 > body.len() || pos == 0 {
                return corrupt();
            }
            let token = u16::from_le_bytes([body[ip], body[ip + 1]]);
            ip += 2;

            let (length_bits, length_mask) = split_for(pos);
            let distance = (token >> length_bits) as usize + 1;
            let len = (token & length_mask) as usize + MIN_MATCH;

            if distance > pos || pos + len > LZNT1_CHUNK_SIZE || op + pos + len > dst.len() {
                return corrupt();
            }
            // Byte by byte: overlapping references replicate recent output.
            let from = op + pos - distance;
            for i in 0..len {
                dst[op + pos + i] = dst[from + i];
            }
            pos += len;
        }
    }
    Ok(pos)
}

/// Decompresses the LZNT1 stream `src` into `dst`.
///
/// Returns how many bytes were produced, which may be fewer than `dst.len()`
/// when the stream is shorter than the destination; the caller decides
/// whether that is an error.
pub fn decompress_lznt1(src: &[u8], dst: &mut [u8]) -> Result<usize, NtStatus> {
    let mut ip = 0usize;
    let mut op = 0usize;

    while ip < src.len() {
        if ip + CHUNK_HEADER_SIZE > src.len() {
            return corrupt();
        }
        let header = u16::from_le_bytes([src[ip], src[ip + 1]]);
        if header == 0 {
            break;
        }
        if header & HEADER_SIGNATURE_MASK != HEADER_SIGNATURE {
            return corrupt();
        }
        let total = (header & HEADER_LENGTH_MASK) as usize + 3;
        if ip + total > src.len() {
            return corrupt();
        }
        let body = &src[ip + CHUNK_HEADER_SIZE..ip + total];

        let produced = if header & HEADER_COMPRESSED != 0 {
            decode_chunk_body(body, dst, op)?
        } else {
            if op + body.len() > dst.len() || body.len() > LZNT1_CHUNK_SIZE {
                return corrupt();
            }
            dst[op..op + body.len()].copy_from_slice(body);
            body.len()
        };

        op += produced;
        ip += total;
    }
    Ok(op)
}
