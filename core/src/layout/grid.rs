//! layout/grid.rs
//! Grid dimension resolution and geometry.

use thiserror::Error;

use crate::config::LayoutConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("no symbols to lay out")]
    Empty,

    #[error("{axis} must be greater than zero")]
    InvalidDimension { axis: &'static str },

    #[error("grid {rows}x{cols} holds {capacity} symbols, {needed} needed")]
    GridTooSmall { rows: u32, cols: u32, capacity: u64, needed: usize },

    #[error("canvas dimensions overflow")]
    CanvasTooLarge,
}

/// Smallest `c` with `c * c >= n`.
fn ceil_sqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut c = (n as f64).sqrt() as u64;
    while c * c < n {
        c += 1;
    }
    while c > 1 && (c - 1) * (c - 1) >= n {
        c -= 1;
    }
    c
}

fn to_u32(v: u64) -> Result<u32, LayoutError> {
    u32::try_from(v).map_err(|_| LayoutError::CanvasTooLarge)
}

/// Resolve grid rows and columns for `n` symbols.
///
/// - neither given: `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`
/// - one given: the other is `ceil(n / given)`
/// - both given: used as-is, but must hold all `n` symbols
pub fn resolve_dimensions(
    n: usize,
    rows: Option<u32>,
    cols: Option<u32>,
) -> Result<(u32, u32), LayoutError> {
    if n == 0 {
        return Err(LayoutError::Empty);
    }
    if rows == Some(0) {
        return Err(LayoutError::InvalidDimension { axis: "rows" });
    }
    if cols == Some(0) {
        return Err(LayoutError::InvalidDimension { axis: "cols" });
    }

    let n64 = n as u64;
    let (rows, cols) = match (rows, cols) {
        (None, None) => {
            let cols = ceil_sqrt(n64);
            (to_u32(n64.div_ceil(cols))?, to_u32(cols)?)
        }
        (Some(rows), None) => (rows, to_u32(n64.div_ceil(rows as u64))?),
        (None, Some(cols)) => (to_u32(n64.div_ceil(cols as u64))?, cols),
        (Some(rows), Some(cols)) => {
            let capacity = rows as u64 * cols as u64;
            if capacity < n64 {
                return Err(LayoutError::GridTooSmall { rows, cols, capacity, needed: n });
            }
            (rows, cols)
        }
    };

    Ok((rows, cols))
}

/// Derived grid geometry for one encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub spacing: u32,
    pub margin: u32,
}

impl GridSpec {
    pub fn compute(
        n: usize,
        rows: Option<u32>,
        cols: Option<u32>,
        cell_width: u32,
        cell_height: u32,
        layout: &LayoutConfig,
    ) -> Result<Self, LayoutError> {
        let (rows, cols) = resolve_dimensions(n, rows, cols)?;
        let spec = Self {
            rows,
            cols,
            cell_width,
            cell_height,
            spacing: layout.spacing,
            margin: layout.margin,
        };
        // Reject geometry that cannot be allocated before anything is drawn.
        spec.canvas_size()?;
        Ok(spec)
    }

    /// Number of cells (`rows * cols`).
    pub fn capacity(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }

    fn extent(count: u32, cell: u32, spacing: u32, margin: u32) -> Result<u32, LayoutError> {
        let count = count as u64;
        let total = count * cell as u64
            + count.saturating_sub(1) * spacing as u64
            + 2 * margin as u64;
        to_u32(total)
    }

    /// `(width, height)` of the composite canvas.
    ///
    /// `width = cols*cell_width + (cols-1)*spacing + 2*margin`, height alike.
    pub fn canvas_size(&self) -> Result<(u32, u32), LayoutError> {
        Ok((
            Self::extent(self.cols, self.cell_width, self.spacing, self.margin)?,
            Self::extent(self.rows, self.cell_height, self.spacing, self.margin)?,
        ))
    }

    /// `(row, col)` of the cell at row-major position `idx`.
    #[inline]
    pub fn cell_position(&self, idx: usize) -> (u32, u32) {
        let cols = self.cols as usize;
        ((idx / cols) as u32, (idx % cols) as u32)
    }

    /// Pixel origin of the cell at row-major position `idx`.
    pub fn cell_origin(&self, idx: usize) -> (u32, u32) {
        let (row, col) = self.cell_position(idx);
        (
            self.margin + col * (self.cell_width + self.spacing),
            self.margin + row * (self.cell_height + self.spacing),
        )
    }
}
