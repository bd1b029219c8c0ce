//! LZNT1 encoder.
//!
//! Input is cut into 4 KiB chunks, each encoded independently. Inside a chunk
//! a hash chain over 3-byte prefixes finds back-references; positions are
//! chunk-relative, so the tables are reset at every chunk boundary. A chunk
//! whose compressed body would not come out shorter than its input is stored
//! instead, which bounds expansion at 2 bytes per chunk.

use super::{
    split_for, CHUNK_HEADER_SIZE, HASH_BITS, HEADER_COMPRESSED, HEADER_SIGNATURE,
    HEAD_TABLE_BYTES, LZNT1_CHUNK_SIZE, LZNT1_WORKSPACE_SIZE, MIN_MATCH,
};
use crate::engine::NtStatus;

// ─────────────────────────────────────────────────────────────────────────────
// Match-finder tables
// ─────────────────────────────────────────────────────────────────────────────

/// Hash heads and chain links over a workspace slice. Entries hold
/// `position + 1`, so zero marks an empty slot.
struct MatchTables<'w> {
    head: &'w mut [u8],
    chain: &'w mut [u8],
}

impl<'w> MatchTables<'w> {
    fn new(workspace: &'w mut [u8]) -> Self {
        let (head, rest) = workspace[..LZNT1_WORKSPACE_SIZE as usize].split_at_mut(HEAD_TABLE_BYTES);
        MatchTables { head, chain: rest }
    }

    fn reset(&mut self) {
        self.head.fill(0);
    }

    #[inline]
    fn get(table: &[u8], index: usize) -> u16 {
        u16::from_le_bytes([table[index * 2], table[index * 2 + 1]])
    }

    #[inline]
    fn set(table: &mut [u8], index: usize, value: u16) {
        table[index * 2..index * 2 + 2].copy_from_slice(&value.to_le_bytes());
    }

    #[inline]
    fn hash(bytes: &[u8]) -> usize {
        let v = (bytes[0] as u32) << 16 | (bytes[1] as u32) << 8 | bytes[2] as u32;
        (v.wrapping_mul(2_654_435_761) >> (32 - HASH_BITS)) as usize
    }

    /// Records `pos` as the newest occurrence of its 3-byte prefix.
    fn insert(&mut self, chunk: &[u8], pos: usize) {
        if pos + MIN_MATCH > chunk.len() {
            return;
        }
        let h = Self::hash(&chunk[pos..]);
        let previous = Self::get(self.head, h);
        Self::set(self.chain, pos, previous);
        Self::set(self.head, h, (pos + 1) as u16);
    }

    /// Longest earlier match for `pos` as `(length, distance)`, if any
    /// reaches [`MIN_MATCH`].
    fn longest_match(
        &self,
        chunk: &[u8],
        pos: usize,
        max_len: usize,
        depth: usize,
    ) -> Option<(usize, usize)> {
        if pos == 0 || pos + MIN_MATCH > chunk.len() || depth == 0 {
            return None;
        }
        let limit = max_len.min(chunk.len() - pos);
        let mut best: Option<(usize, usize)> = None;
        let mut candidate = Self::get(self.head, Self::hash(&chunk[pos..]));
        let mut tries = 0usize;

        while candidate != 0 && tries < depth {
            let cpos = candidate as usize - 1;
            if cpos >= pos {
                // Stale entry from the current position itself; never valid.
                break;
            }
            let mut len = 0usize;
            while len < limit && chunk[cpos + len] == chunk[pos + len] {
                len += 1;
            }
            if len >= MIN_MATCH && best.map_or(true, |(l, _)| len > l) {
                best = Some((len, pos - cpos));
                if len == limit {
                    break;
                }
            }
            candidate = Self::get(self.chain, cpos);
            tries += 1;
        }
        best
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bounded output cursor
// ─────────────────────────────────────────────────────────────────────────────

/// Write cursor that refuses to grow a chunk body past `limit` bytes.
struct BodyWriter<'d> {
    out: &'d mut [u8],
    len: usize,
    limit: usize,
}

impl BodyWriter<'_> {
    #[inline]
    fn reserve(&mut self) -> Option<usize> {
        if self.len >= self.limit {
            return None;
        }
        self.len += 1;
        Some(self.len - 1)
    }

    #[inline]
    fn push(&mut self, byte: u8) -> Option<()> {
        let at = self.reserve()?;
        self.out[at] = byte;
        Some(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunk encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Tries to encode `chunk` as a compressed body into `out`, giving up as soon
/// as the body would reach `limit` bytes. Returns the body length.
fn encode_chunk_body(
    chunk: &[u8],
    out: &mut [u8],
    limit: usize,
    tables: &mut MatchTables<'_>,
    depth: usize,
) -> Option<usize> {
    tables.reset();
    let mut w = BodyWriter { out, len: 0, limit };
    let mut pos = 0usize;

    while pos < chunk.len() {
        let flag_at = w.reserve()?;
        let mut flags = 0u8;

        for bit in 0..8 {
            if pos >= chunk.len() {
                break;
            }
            let (length_bits, length_mask) = split_for(pos);
            let max_len = length_mask as usize + MIN_MATCH;

            match tables.longest_match(chunk, pos, max_len, depth) {
                Some((len, distance)) => {
                    let token = (((distance - 1) as u16) << length_bits)
                        | (len - MIN_MATCH) as u16;
                    let [lo, hi] = token.to_le_bytes();
                    w.push(lo)?;
                    w.push(hi)?;
                    flags |= 1 << bit;
                    for p in pos..pos + len {
                        tables.insert(chunk, p);
                    }
                    pos += len;
                }
                None => {
                    w.push(chunk[pos])?;
                    tables.insert(chunk, pos);
                    pos += 1;
                }
            }
        }
        w.out[flag_at] = flags;
    }
    Some(w.len)
}

#[inline]
fn chunk_header(total_len: usize, compressed: bool) -> [u8; 2] {
    let mut header = HEADER_SIGNATURE | ((total_len - 3) as u16);
    if compressed {
        header |= HEADER_COMPRESSED;
    }
    header.to_le_bytes()
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Compresses `src` into `dst` as an LZNT1 stream.
///
/// `workspace` must hold at least [`LZNT1_WORKSPACE_SIZE`] bytes. Returns the
/// number of bytes written, or `BUFFER_TOO_SMALL` when `dst` cannot hold the
/// stream. Empty input produces an empty stream.
pub fn compress_lznt1(
    src: &[u8],
    dst: &mut [u8],
    workspace: &mut [u8],
    chain_depth: usize,
) -> Result<usize, NtStatus> {
    if workspace.len() < LZNT1_WORKSPACE_SIZE as usize {
        return Err(NtStatus::BUFFER_TOO_SMALL);
    }
    let mut tables = MatchTables::new(workspace);
    let mut op = 0usize;

    for chunk in src.chunks(LZNT1_CHUNK_SIZE) {
        if dst.len() < op + CHUNK_HEADER_SIZE {
            return Err(NtStatus::BUFFER_TOO_SMALL);
        }
        let body_start = op + CHUNK_HEADER_SIZE;
        let room = dst.len() - body_start;
        // Compressed form is only kept when strictly shorter than the input.
        let limit = room.min(chunk.len() - 1);

        let encoded = if limit == 0 {
            None
        } else {
            encode_chunk_body(
                chunk,
                &mut dst[body_start..body_start + limit],
                limit,
                &mut tables,
                chain_depth,
            )
        };

        let (body_len, compressed) = match encoded {
            Some(n) => (n, true),
            None => {
                if room < chunk.len() {
                    return Err(NtStatus::BUFFER_TOO_SMALL);
                }
                dst[body_start..body_start + chunk.len()].copy_from_slice(chunk);
                (chunk.len(), false)
            }
        };

        dst[op..body_start].copy_from_slice(&chunk_header(body_len + CHUNK_HEADER_SIZE, compressed));
        op = body_start + body_len;
    }

    Ok(op)
}
