//! layout/mod.rs
//! Grid layout for rendered symbols.
//!
//! Responsibilities:
//! - Resolve rows/cols for `n` symbols
//! - Normalize symbols of differing size onto uniform cells
//! - Place symbols row-major onto one blank canvas
//!
//! Spatial order is a scanning hint only; reassembly never depends on it.

pub mod grid;
pub mod compose;

pub use grid::{resolve_dimensions, GridSpec, LayoutError};
pub use compose::{compose, normalize, Composite, BACKGROUND};
