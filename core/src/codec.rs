//! codec.rs
//! Optical code collaborator.
//!
//! The bit-level symbol encoder/decoder lives outside this crate. The
//! pipeline only needs to render a tagged string into a raster image and
//! to scan a composite back into raw strings; any backend implementing
//! [`SymbolCodec`] can be plugged in.

use std::fmt;

use image::RgbImage;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error-correction level requested from the codec.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TryFromPrimitive)]
pub enum EcLevel {
    /// ~7% recovery
    #[default]
    L = 0,
    /// ~15%
    M = 1,
    /// ~25%
    Q = 2,
    /// ~30%
    H = 3,
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        };
        f.write_str(name)
    }
}

/// Diagnostics switches forwarded to the scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Ask the backend for visual diagnostics. Never changes scan results.
    pub visual_debug: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The text needs a larger symbol than `version_cap` allows.
    #[error("data too large for symbol version cap {version_cap} ({len} bytes)")]
    DataTooLarge { len: usize, version_cap: u8 },

    #[error("render failed: {0}")]
    Render(String),

    #[error("scan failed: {0}")]
    Scan(String),
}

/// Render/scan contract for an optical code backend.
///
/// Implementations must be shareable across the render worker pool.
pub trait SymbolCodec: Send + Sync {
    /// Render one tagged string into a symbol image.
    ///
    /// Fails with [`CodecError::DataTooLarge`] when the text needs a symbol
    /// version above `version_cap`.
    fn render(&self, text: &str, ec_level: EcLevel, version_cap: u8) -> Result<RgbImage, CodecError>;

    /// Recover every symbol payload found in `image`. Order is undefined and
    /// the result may be empty.
    fn scan(&self, image: &RgbImage, options: &ScanOptions) -> Result<Vec<String>, CodecError>;
}
