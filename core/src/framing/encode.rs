//! framing/encode.rs
//! Frame tagging.

use crate::chunking::Chunk;
use crate::constants::{FIELD_SEPARATOR, FRAME_INDEX_WIDTH, FRAME_TAG, MAX_FRAME_INDEX};
use crate::framing::types::FrameError;

/// Encode a chunk into its current-format wire string.
///
/// Layout:
///
/// ```text
/// IDX:nnn:<chunk text>
/// ```
///
/// The index is zero-padded to exactly three digits, so indices above
/// `MAX_FRAME_INDEX` cannot be represented and fail with `IndexOverflow`.
pub fn encode_frame(chunk: &Chunk) -> Result<String, FrameError> {
    if chunk.index > MAX_FRAME_INDEX {
        return Err(FrameError::IndexOverflow {
            index: chunk.index,
            max: MAX_FRAME_INDEX,
        });
    }

    let mut out = String::with_capacity(FRAME_TAG.len() + FRAME_INDEX_WIDTH + 2 + chunk.text.len());
    out.push_str(FRAME_TAG);
    out.push(FIELD_SEPARATOR);
    out.push_str(&format!("{:0width$}", chunk.index, width = FRAME_INDEX_WIDTH));
    out.push(FIELD_SEPARATOR);
    out.push_str(&chunk.text);

    Ok(out)
}

/// Encode every chunk, stopping at the first failure.
pub fn encode_frames(chunks: &[Chunk]) -> Result<Vec<String>, FrameError> {
    chunks.iter().map(encode_frame).collect()
}
