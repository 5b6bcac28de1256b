//! chunking/split.rs
//! Unicode-scalar chunk splitting.

use crate::chunking::types::{Chunk, ChunkError};

/// Split `text` into chunks of at most `chunk_size` characters.
///
/// Chunk `i` covers characters `[i*chunk_size, min((i+1)*chunk_size, len))`.
/// Offsets count Unicode scalar values, so a multi-byte character is never cut.
/// Empty input yields no chunks; callers decide whether that is an error.
pub fn split_text(text: &str, chunk_size: usize) -> Result<Vec<Chunk>, ChunkError> {
    if chunk_size == 0 {
        return Err(ChunkError::ZeroChunkSize);
    }

    let mut chunks = Vec::with_capacity(chunk_count(text.chars().count(), chunk_size));
    let mut start = 0;
    let mut taken = 0;

    for (offset, _) in text.char_indices() {
        if taken == chunk_size {
            chunks.push(Chunk::new(chunks.len(), &text[start..offset]));
            start = offset;
            taken = 0;
        }
        taken += 1;
    }

    if taken > 0 {
        chunks.push(Chunk::new(chunks.len(), &text[start..]));
    }

    Ok(chunks)
}

/// Number of chunks `split_text` produces for `char_len` characters.
#[inline]
pub fn chunk_count(char_len: usize, chunk_size: usize) -> usize {
    if chunk_size == 0 {
        return 0;
    }
    char_len.div_ceil(chunk_size)
}
