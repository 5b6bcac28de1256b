//! framing/types.rs
//! Frame values, formats and errors.

use std::fmt;
use thiserror::Error;

/// Which wire format a frame was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameFormat {
    /// `IDX:%03d:<text>`
    Current,
    /// `%d:<text>`
    Legacy,
    /// Tag literal present but strict match failed; split on the first two separators.
    Recovered,
}

impl fmt::Display for FrameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrameFormat::Current   => "current",
            FrameFormat::Legacy    => "legacy",
            FrameFormat::Recovered => "recovered",
        };
        f.write_str(name)
    }
}

/// A parsed frame: chunk index plus chunk text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub index: usize,
    pub text: String,
    pub format: FrameFormat,
}

impl Frame {
    pub fn new(index: usize, text: impl Into<String>, format: FrameFormat) -> Self {
        Self { index, text: text.into(), format }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("chunk index {index} exceeds frame capacity (max {max})")]
    IndexOverflow { index: usize, max: usize },

    #[error("unrecognized frame: {preview:?}")]
    Unrecognized { preview: String },
}
