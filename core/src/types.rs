//! types.rs
//! Crate-wide error type and error kinds.

use std::io;

use image::ImageError;
use thiserror::Error;

use crate::{
    chunking::ChunkError,
    codec::CodecError,
    config::ConfigError,
    envelope::EnvelopeError,
    framing::FrameError,
    layout::LayoutError,
    reassembly::ReassemblyError,
};

/// Coarse error classification; callers branch on this, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A chunk needs a symbol above the version cap; reduce `chunk_size`.
    ChunkTooLarge,
    /// More chunks than the current frame format can index.
    IndexOverflow,
    /// Scanned strings match no frame format and cannot be recovered.
    ParseFailure,
    /// No symbols recovered from the composite, or the composite could not be decoded.
    UnreadableImage,
    /// Binary envelope body is not valid base64.
    Base64Decode,
    /// Reassembled data carries neither envelope prefix.
    UnsupportedFileType,
    DuplicateIndex,
    Gap,
    EmptyPayload,
    /// Bad caller input: config, chunk size, grid dimensions, filename.
    InvalidInput,
    Codec,
    Io,
}

/// Unified error covering every encode and decode stage.
/// - `From<T>` impls enable `?` across the pipeline.
/// - `kind()` maps nested layer errors onto the stable taxonomy.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Nothing to encode.
    #[error("payload is empty")]
    EmptyPayload,

    /// Rendering chunk `index` exceeded the codec capacity cap.
    #[error("chunk {index} ({chars} chars) does not fit a symbol of version <= {version_cap}; reduce chunk_size")]
    ChunkTooLarge { index: usize, chars: usize, version_cap: u8 },

    /// Zero symbols recovered from the composite.
    #[error("no symbols recognized in image")]
    UnreadableImage,

    #[error("chunk error: {0}")]
    Chunk(#[from] ChunkError),

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("reassembly error: {0}")]
    Reassembly(#[from] ReassemblyError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("image error: {0}")]
    Image(#[from] ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Worker pool plumbing failed.
    #[error("pipeline error: {0}")]
    Pipeline(&'static str),
}

impl TransferError {
    pub fn kind(&self) -> ErrorKind {
        use TransferError::*;
        match self {
            EmptyPayload => ErrorKind::EmptyPayload,
            ChunkTooLarge { .. } => ErrorKind::ChunkTooLarge,
            UnreadableImage => ErrorKind::UnreadableImage,

            Frame(FrameError::IndexOverflow { .. }) => ErrorKind::IndexOverflow,
            Frame(FrameError::Unrecognized { .. }) => ErrorKind::ParseFailure,

            Envelope(EnvelopeError::Base64Decode(_)) => ErrorKind::Base64Decode,
            Envelope(EnvelopeError::UnsupportedFileType { .. })
            | Envelope(EnvelopeError::MissingFilenameSeparator) => ErrorKind::UnsupportedFileType,
            Envelope(EnvelopeError::InvalidFilename(_)) => ErrorKind::InvalidInput,

            Reassembly(ReassemblyError::Empty) => ErrorKind::UnreadableImage,
            Reassembly(ReassemblyError::ParseFailure { .. }) => ErrorKind::ParseFailure,
            Reassembly(ReassemblyError::DuplicateIndex { .. }) => ErrorKind::DuplicateIndex,
            Reassembly(ReassemblyError::Gap { .. }) => ErrorKind::Gap,

            Codec(CodecError::DataTooLarge { .. }) => ErrorKind::ChunkTooLarge,
            Codec(_) => ErrorKind::Codec,

            Chunk(_) | Layout(_) | Config(_) => ErrorKind::InvalidInput,
            Image(ImageError::IoError(_)) => ErrorKind::Io,
            Image(ImageError::Decoding(_)) => ErrorKind::UnreadableImage,
            // Caller picked a format or size the codec cannot handle.
            Image(ImageError::Unsupported(_))
            | Image(ImageError::Encoding(_))
            | Image(ImageError::Parameter(_))
            | Image(ImageError::Limits(_)) => ErrorKind::InvalidInput,
            Io(_) | Pipeline(_) => ErrorKind::Io,
        }
    }
}
