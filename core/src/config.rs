//! config.rs
//! Immutable transfer configuration shared by layout, rendering and reassembly.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Build once, `validate()`, then pass by reference.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::EcLevel;
use crate::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MARGIN, DEFAULT_SPACING, DEFAULT_VERSION_CAP, MAX_SYMBOL_VERSION,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,

    #[error("{axis} must be greater than zero when given")]
    ZeroDimension { axis: &'static str },

    #[error("version_cap must be within 1..={max}, got {got}")]
    VersionCap { got: u8, max: u8 },

    #[error("workers must be greater than zero when given")]
    ZeroWorkers,

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pixel geometry of the composite grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between neighbouring cells.
    pub spacing: u32,
    /// Border around the whole grid.
    pub margin: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            margin: DEFAULT_MARGIN,
        }
    }
}

/// What to do when two scanned frames carry the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later-seen text replaces earlier text.
    #[default]
    LastWins,
    /// Keep the first text seen for an index.
    FirstWins,
    /// Fail reassembly.
    Reject,
}

/// What to do when the recovered index set has holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Fail reassembly.
    #[default]
    Reject,
    /// Concatenate whatever was recovered.
    Allow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Characters per chunk.
    pub chunk_size: usize,
    /// Grid rows; derived from `cols` (or both auto) when `None`.
    pub rows: Option<u32>,
    /// Grid columns; derived from `rows` (or both auto) when `None`.
    pub cols: Option<u32>,
    pub ec_level: EcLevel,
    /// Largest symbol version the codec may use.
    pub version_cap: u8,
    pub layout: LayoutConfig,
    /// Render workers; `None` uses the available CPUs.
    pub workers: Option<usize>,
    /// Where per-chunk symbol images are staged during an encode call.
    pub scratch_dir: Option<PathBuf>,
    pub duplicate_policy: DuplicatePolicy,
    pub gap_policy: GapPolicy,
    /// Prefix recovered text files with a UTF-8 byte-order marker.
    pub text_bom: bool,
    pub visual_debug: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            rows: None,
            cols: None,
            ec_level: EcLevel::L,
            version_cap: DEFAULT_VERSION_CAP,
            layout: LayoutConfig::default(),
            workers: None,
            scratch_dir: None,
            duplicate_policy: DuplicatePolicy::LastWins,
            gap_policy: GapPolicy::Reject,
            text_bom: true,
            visual_debug: false,
        }
    }
}

impl TransferConfig {
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.rows == Some(0) {
            return Err(ConfigError::ZeroDimension { axis: "rows" });
        }
        if self.cols == Some(0) {
            return Err(ConfigError::ZeroDimension { axis: "cols" });
        }
        if self.version_cap == 0 || self.version_cap > MAX_SYMBOL_VERSION {
            return Err(ConfigError::VersionCap {
                got: self.version_cap,
                max: MAX_SYMBOL_VERSION,
            });
        }
        if self.workers == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}
