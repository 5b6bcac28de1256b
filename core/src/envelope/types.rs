//! envelope/types.rs
//! Envelope kinds, parsed headers, recovered payloads and errors.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

use crate::constants::{ENVELOPE_FILE_PREFIX, ENVELOPE_TEXT_PREFIX};

/// Payload classification, decided by strict UTF-8 decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Text,
    Binary,
}

impl EnvelopeKind {
    /// Wire prefix including the trailing separator.
    pub const fn prefix(self) -> &'static str {
        match self {
            EnvelopeKind::Text   => ENVELOPE_TEXT_PREFIX,
            EnvelopeKind::Binary => ENVELOPE_FILE_PREFIX,
        }
    }

    /// Match a wire prefix at the start of `s`.
    pub fn detect(s: &str) -> Option<Self> {
        if s.starts_with(ENVELOPE_TEXT_PREFIX) {
            Some(EnvelopeKind::Text)
        } else if s.starts_with(ENVELOPE_FILE_PREFIX) {
            Some(EnvelopeKind::Binary)
        } else {
            None
        }
    }
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeKind::Text   => f.write_str("text"),
            EnvelopeKind::Binary => f.write_str("binary"),
        }
    }
}

/// Parsed envelope. `body` is raw text for `Text`, base64 for `Binary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub kind: EnvelopeKind,
    pub filename: String,
    pub body: String,
}

impl Envelope {
    /// Serialized wire form.
    pub fn to_wire(&self) -> String {
        let prefix = self.kind.prefix();
        let mut out = String::with_capacity(prefix.len() + self.filename.len() + 1 + self.body.len());
        out.push_str(prefix);
        out.push_str(&self.filename);
        out.push(':');
        out.push_str(&self.body);
        out
    }

    /// Decode the body back into the original bytes.
    ///
    /// Binary bodies tolerate ASCII whitespace (line breaks inserted by some
    /// scanners) but are otherwise decoded strictly.
    pub fn decode_body(&self) -> Result<Vec<u8>, EnvelopeError> {
        match self.kind {
            EnvelopeKind::Text => Ok(self.body.as_bytes().to_vec()),
            EnvelopeKind::Binary => {
                let compact: String = self
                    .body
                    .chars()
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect();
                Ok(STANDARD.decode(compact.as_bytes())?)
            }
        }
    }
}

/// Result of unwrapping: original filename and bytes, bit-for-bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredPayload {
    pub kind: EnvelopeKind,
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("invalid filename {0:?}: must be non-empty and contain no ':'")]
    InvalidFilename(String),

    #[error("unsupported file type, prefix: {preview:?}")]
    UnsupportedFileType { preview: String },

    #[error("missing separator between filename and content")]
    MissingFilenameSeparator,

    #[error("base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}
