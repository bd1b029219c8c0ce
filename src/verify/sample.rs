//! Deterministic sample inputs for round-trip checks.
//!
//! Nothing here touches a randomness source; the same arguments always give
//! the same bytes.

/// `"Hello World! "` x 100 followed by `"Repeated Data "` x 50 (2000 bytes).
pub fn repeated_phrases() -> Vec<u8> {
    let mut out = b"Hello World! ".repeat(100);
    out.extend_from_slice(&b"Repeated Data ".repeat(50));
    out
}

/// `pattern` repeated and cut to exactly `len` bytes.
pub fn repeated_pattern(pattern: &[u8], len: usize) -> Vec<u8> {
    if pattern.is_empty() {
        return vec![0; len];
    }
    pattern.iter().copied().cycle().take(len).collect()
}

/// `len` bytes of xorshift64 noise seeded with `seed`.
pub fn pseudo_random(len: usize, seed: u64) -> Vec<u8> {
    // xorshift has a fixed point at zero.
    let mut state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
    let mut out = Vec::with_capacity(len + 8);
    while out.len() < len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        out.extend_from_slice(&state.to_le_bytes());
    }
    out.truncate(len);
    out
}

pub fn empty() -> Vec<u8> {
    Vec::new()
}
