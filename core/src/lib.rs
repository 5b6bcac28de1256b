//! qrgrid-core
//!
//! Moves a text or binary payload through a single composite image holding
//! a grid of optical code symbols, and back.
//!
//! Symbol rendering and scanning are delegated to a [`codec::SymbolCodec`]
//! backend; this crate owns chunking, framing, the envelope, grid layout
//! and reassembly.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;
pub mod codec;
pub mod logging;
pub mod telemetry;

// Protocol layers
pub mod chunking;
pub mod framing;
pub mod envelope;
pub mod layout;
pub mod reassembly;

// Orchestration
pub mod pipeline;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::codec::{CodecError, EcLevel, ScanOptions, SymbolCodec};
    pub use crate::config::{DuplicatePolicy, GapPolicy, LayoutConfig, TransferConfig};
    pub use crate::envelope::{EnvelopeKind, RecoveredPayload};
    pub use crate::pipeline::{
        decode_file, decode_image_file, decode_payload, decode_text, encode_bytes, encode_file,
        encode_text, DecodeFailure, DecodeStage,
    };
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::{ErrorKind, TransferError};
}
