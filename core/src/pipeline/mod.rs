//! pipeline/mod.rs
//! Encode and decode orchestration over the chunking, framing, envelope,
//! layout and reassembly layers.
//!
//! Two modes:
//! - raw text: `encode_text` / `decode_text`, no envelope
//! - file: `encode_file` / `decode_file`, envelope carries kind + filename

pub mod parallelism;
pub mod scratch;
pub mod encode;
pub mod decode;

pub use parallelism::ParallelismProfile;
pub use scratch::ScratchArtifacts;
pub use encode::{encode_bytes, encode_file, encode_text, save_composite, EncodeOutcome, EncodedFile};
pub use decode::{
    decode_file, decode_image_file, decode_payload, decode_text, load_composite,
    DecodeFailure, DecodeStage, DecodedFile, DecodedPayload, DecodedText,
};
