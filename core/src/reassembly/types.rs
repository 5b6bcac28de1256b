//! reassembly/types.rs
//! Parsed scan sets, reassembly stats and errors.

use thiserror::Error;

use crate::framing::{Frame, FrameFormat};

/// Output of the parsing stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedScan {
    /// Indexed frames in scan order.
    pub frames: Vec<Frame>,
    /// Strings no matcher (nor recovery) accepted.
    pub unparsed: Vec<String>,
    /// Single untagged string taken as the whole payload.
    pub verbatim: Option<String>,
    /// Raw strings seen.
    pub scanned: usize,
}

impl ParsedScan {
    pub fn count(&self, format: FrameFormat) -> usize {
        self.frames.iter().filter(|f| f.format == format).count()
    }
}

/// Per-call reassembly statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReassemblyStats {
    pub scanned: usize,
    pub frames_current: usize,
    pub frames_legacy: usize,
    pub frames_recovered: usize,
    pub unparsed: usize,
    pub duplicates: usize,
    /// Distinct indices concatenated into the payload.
    pub chunks: usize,
    pub verbatim: bool,
}

/// Reassembled payload string plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassembled {
    pub text: String,
    pub stats: ReassemblyStats,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReassemblyError {
    #[error("no scanned strings to reassemble")]
    Empty,

    #[error("none of {scanned} scanned strings is an indexed frame (first: {preview:?})")]
    ParseFailure { scanned: usize, preview: String },

    #[error("duplicate chunk index {index}")]
    DuplicateIndex { index: usize },

    #[error("recovered {found} of {span} chunks; the index set has gaps")]
    Gap { found: usize, span: usize },
}
