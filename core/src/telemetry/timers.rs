//! telemetry/timers.rs
//! Stage timers for encode and decode calls.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Read,
    Wrap,
    Split,
    Frame,
    Render,
    Compose,
    Write,
    Scan,
    Parse,
    Reassemble,
    Unwrap,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read       => "read",
            Stage::Wrap       => "wrap",
            Stage::Split      => "split",
            Stage::Frame      => "frame",
            Stage::Render     => "render",
            Stage::Compose    => "compose",
            Stage::Write      => "write",
            Stage::Scan       => "scan",
            Stage::Parse      => "parse",
            Stage::Reassemble => "reassemble",
            Stage::Unwrap     => "unwrap",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    times: HashMap<Stage, Duration>,
}

impl StageTimes {
    /// Add duration to a stage (accumulates if already present).
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        *self.times.entry(stage).or_insert(Duration::ZERO) += dur;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        self.times.get(&stage).copied().unwrap_or(Duration::ZERO)
    }

    pub fn total(&self) -> Duration {
        self.times.values().copied().sum()
    }

    /// True when every listed stage was recorded.
    pub fn has_all(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|s| self.times.contains_key(s))
    }
}

#[derive(Clone, Debug)]
pub struct TelemetryTimer {
    pub start_time: Instant,
    pub end_time: Option<Instant>,
    pub stage_times: StageTimes,
}

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryTimer {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            stage_times: StageTimes::default(),
        }
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Instant::now());
    }

    pub fn add_stage_time(&mut self, stage: Stage, dur: Duration) {
        self.stage_times.add(stage, dur);
    }

    /// Run `f`, charging its wall time to `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let t = Instant::now();
        let out = f();
        self.add_stage_time(stage, t.elapsed());
        out
    }

    pub fn elapsed(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => Instant::now().duration_since(self.start_time),
        }
    }
}
