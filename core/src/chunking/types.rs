//! chunking/types.rs
//! Chunk value and chunking errors.

use thiserror::Error;

/// A bounded slice of the payload text with its position index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Dense, 0-based position in split order. Sole ordering key on reassembly.
    pub index: usize,
    pub text: String,
}

impl Chunk {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self { index, text: text.into() }
    }

    /// Length in characters (the unit `chunk_size` is expressed in).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
}
