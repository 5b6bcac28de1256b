//! envelope/mod.rs
//! Payload envelope: kind + filename header around the whole payload.
//!
//! ```text
//! QRTEXT:<filename>:<utf-8 text>
//! QRFILE:<filename>:<base64 bytes>
//! ```
//!
//! Applied before chunking, removed after reassembly.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{Envelope, EnvelopeError, EnvelopeKind, RecoveredPayload};
pub use encode::{classify, wrap};
pub use decode::{parse_envelope, strip_index_prefix, unwrap};
