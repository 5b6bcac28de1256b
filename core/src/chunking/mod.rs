//! chunking/mod.rs
//! Payload chunking.
//!
//! Responsibilities:
//! - Split a payload into ordered, fixed-size chunks
//! - Assign dense 0-based indices in split order
//!
//! Non-responsibilities:
//! - Position markers (see `framing`)
//! - Rendering

pub mod types;
pub mod split;

pub use types::{Chunk, ChunkError};
pub use split::{chunk_count, split_text};
