//! framing/mod.rs
//! Frame codec: position markers on chunk text.
//!
//! Responsibilities:
//! - Tag chunks with the current `IDX:nnn:` marker
//! - Parse scanned strings through an ordered list of matchers
//!   (current format, then legacy `n:`)
//! - Bounded manual recovery for strings carrying the tag literal
//!   that the strict matcher rejects
//!
//! Non-responsibilities:
//! - Ordering, duplicates, gaps (see `reassembly`)
//! - Envelope headers

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{Frame, FrameError, FrameFormat};
pub use encode::{encode_frame, encode_frames};
pub use decode::{
    FrameMatcher,
    FRAME_MATCHERS,
    has_frame_tag,
    match_current,
    match_legacy,
    parse_frame,
    recover_frame,
};
