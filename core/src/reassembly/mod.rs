//! reassembly/mod.rs
//! Reassembly of scanned strings into the original payload.
//!
//! Two stages, matching the decode state machine:
//! - `classify` (parsing): every raw string through the frame matchers,
//!   the bounded recovery stage, and the single-chunk shortcut
//! - `assemble` (reassembling): a barrier over the full scan; applies the
//!   duplicate and gap policies, then concatenates in ascending index order
//!
//! Grid position never matters here; the embedded index is the only key.

pub mod types;
pub mod combine;

pub use types::{ParsedScan, Reassembled, ReassemblyError, ReassemblyStats};
pub use combine::{combine, Reassembler};
