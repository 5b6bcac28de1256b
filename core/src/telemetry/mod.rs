//! telemetry/mod.rs
//! Counters, stage timers and immutable snapshots for encode/decode calls.
//!
//! Counters and timers are mutated while a call runs, then frozen into a
//! `TelemetrySnapshot` that travels back with the outcome.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
