//! telemetry/counters.rs
//! Mutable counters collected during one encode or decode call.

use serde::{Deserialize, Serialize};

use crate::reassembly::ReassemblyStats;

/// Deterministic counters collected during a transfer.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub chunks: u64,
    pub symbols_rendered: u64,
    pub symbols_scanned: u64,
    pub frames_current: u64,
    pub frames_legacy: u64,
    pub frames_recovered: u64,
    pub frames_unparsed: u64,
    pub duplicate_indices: u64,
    /// Payload bytes before wrapping (encode) or after unwrapping (decode).
    pub bytes_payload: u64,
    /// Bytes of every tagged frame string.
    pub bytes_wire: u64,
    /// Tag + envelope bytes carried on top of the payload.
    pub bytes_overhead: u64,
}

impl TelemetryCounters {
    /// Record one tagged frame.
    ///
    /// - `text_len`: chunk text bytes
    /// - `wire_len`: full frame string bytes
    pub fn add_frame(&mut self, text_len: usize, wire_len: usize) {
        self.chunks += 1;
        self.bytes_wire += wire_len as u64;
        self.bytes_overhead += wire_len.saturating_sub(text_len) as u64;
    }

    /// Record envelope header bytes as overhead.
    pub fn add_envelope(&mut self, header_len: usize) {
        self.bytes_overhead += header_len as u64;
    }

    pub fn add_rendered(&mut self, count: usize) {
        self.symbols_rendered += count as u64;
    }

    pub fn add_scanned(&mut self, raw: &[String]) {
        self.symbols_scanned += raw.len() as u64;
        self.bytes_wire += raw.iter().map(|s| s.len() as u64).sum::<u64>();
    }

    /// Fold in what the reassembler saw.
    pub fn add_reassembly(&mut self, stats: &ReassemblyStats) {
        self.chunks += stats.chunks as u64;
        self.frames_current += stats.frames_current as u64;
        self.frames_legacy += stats.frames_legacy as u64;
        self.frames_recovered += stats.frames_recovered as u64;
        self.frames_unparsed += stats.unparsed as u64;
        self.duplicate_indices += stats.duplicates as u64;
    }

    /// Decode side: every scanned byte not in the reassembled text is overhead.
    pub fn add_reassembled(&mut self, text_len: usize) {
        self.bytes_overhead += self.bytes_wire.saturating_sub(text_len as u64);
    }

    pub fn add_payload(&mut self, len: usize) {
        self.bytes_payload += len as u64;
    }

    pub fn frames_total(&self) -> u64 {
        self.frames_current + self.frames_legacy + self.frames_recovered
    }
}
