//! envelope/encode.rs
//! Envelope construction.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::constants::FIELD_SEPARATOR;
use crate::envelope::types::{Envelope, EnvelopeError, EnvelopeKind};

/// Text when the bytes decode as strict UTF-8, binary otherwise.
#[inline]
pub fn classify(bytes: &[u8]) -> EnvelopeKind {
    match std::str::from_utf8(bytes) {
        Ok(_) => EnvelopeKind::Text,
        Err(_) => EnvelopeKind::Binary,
    }
}

/// Wrap a payload in its envelope.
///
/// - text   → `QRTEXT:<filename>:<text>`
/// - binary → `QRFILE:<filename>:<base64(bytes)>`
///
/// The filename must be non-empty and free of separators; otherwise the
/// receiving side would split filename and body in the wrong place.
pub fn wrap(filename: &str, bytes: &[u8]) -> Result<String, EnvelopeError> {
    if filename.is_empty() || filename.contains(FIELD_SEPARATOR) {
        return Err(EnvelopeError::InvalidFilename(filename.to_string()));
    }

    let envelope = match std::str::from_utf8(bytes) {
        Ok(text) => Envelope {
            kind: EnvelopeKind::Text,
            filename: filename.to_string(),
            body: text.to_string(),
        },
        Err(_) => Envelope {
            kind: EnvelopeKind::Binary,
            filename: filename.to_string(),
            body: STANDARD.encode(bytes),
        },
    };

    Ok(envelope.to_wire())
}
