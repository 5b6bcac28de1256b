//! envelope/decode.rs
//! Envelope parsing and payload recovery.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::constants::{FIELD_SEPARATOR, LOG_PREVIEW_CHARS};
use crate::envelope::types::{Envelope, EnvelopeError, EnvelopeKind, RecoveredPayload};
use crate::utils::preview;

static RESIDUAL_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[0-9]+:(?:QRTEXT:|QRFILE:)").expect("valid residual index pattern")
});

/// Strip a leftover legacy index (`"0:QRTEXT:..."`) that a single-chunk
/// frame may leave attached to the envelope.
pub fn strip_index_prefix(s: &str) -> &str {
    if RESIDUAL_INDEX.is_match(s) {
        if let Some(pos) = s.find(FIELD_SEPARATOR) {
            debug!(target: "envelope", "residual index prefix removed");
            return &s[pos + 1..];
        }
    }
    s
}

/// Parse the envelope header without decoding the body.
pub fn parse_envelope(s: &str) -> Result<Envelope, EnvelopeError> {
    let s = strip_index_prefix(s);

    let kind = EnvelopeKind::detect(s).ok_or_else(|| EnvelopeError::UnsupportedFileType {
        preview: preview(s, LOG_PREVIEW_CHARS),
    })?;

    let rest = &s[kind.prefix().len()..];
    let (filename, body) = rest
        .split_once(FIELD_SEPARATOR)
        .ok_or(EnvelopeError::MissingFilenameSeparator)?;

    Ok(Envelope {
        kind,
        filename: filename.to_string(),
        body: body.to_string(),
    })
}

/// Unwrap a reassembled envelope into the original filename and bytes.
///
/// Text bodies come back exactly as wrapped; byte-order markers for
/// downstream tools are added when the file is written, not here.
pub fn unwrap(s: &str) -> Result<RecoveredPayload, EnvelopeError> {
    let envelope = parse_envelope(s)?;
    let bytes = envelope.decode_body()?;

    debug!(
        target: "envelope",
        kind = %envelope.kind,
        filename = %envelope.filename,
        bytes = bytes.len(),
        "envelope unwrapped"
    );

    Ok(RecoveredPayload {
        kind: envelope.kind,
        filename: envelope.filename,
        bytes,
    })
}
