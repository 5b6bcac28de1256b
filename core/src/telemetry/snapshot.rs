//! telemetry/snapshot.rs
//! Immutable snapshot returned with every encode/decode outcome.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: TelemetryCounters,
    /// `bytes_overhead / bytes_wire`; 0 when nothing went over the wire.
    pub framing_overhead_ratio: f64,
    pub throughput_payload_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let framing_overhead_ratio = if counters.bytes_wire > 0 {
            (counters.bytes_overhead as f64 / counters.bytes_wire as f64).min(1.0)
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_payload as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            framing_overhead_ratio,
            throughput_payload_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal invariants:
    /// - `framing_overhead_ratio` within `0.0..=1.0`
    /// - stage times never exceed the wall clock
    pub fn sanity_check(&self) -> bool {
        (0.0..=1.0).contains(&self.framing_overhead_ratio)
            && self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
