//! layout/compose.rs
//! Symbol normalization and composite assembly.

use image::{imageops, Rgb, RgbImage};
use tracing::debug;

use crate::config::LayoutConfig;
use crate::layout::grid::{GridSpec, LayoutError};

/// Blank canvas colour.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Composite image plus the geometry it was built with.
#[derive(Debug, Clone)]
pub struct Composite {
    pub canvas: RgbImage,
    pub spec: GridSpec,
}

/// Center `image` on a blank `width` x `height` canvas.
///
/// Symbols differ in size because chunk length changes the capacity tier;
/// normalizing keeps every cell the same size.
pub fn normalize(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.width() == width && image.height() == height {
        return image.clone();
    }

    let mut cell = RgbImage::from_pixel(width, height, BACKGROUND);
    let x = (width.saturating_sub(image.width()) / 2) as i64;
    let y = (height.saturating_sub(image.height()) / 2) as i64;
    imageops::replace(&mut cell, image, x, y);
    cell
}

/// Arrange symbols into one grid image.
///
/// `images[idx]` lands at row `idx / cols`, column `idx % cols`. Cells past
/// the last symbol stay blank.
pub fn compose(
    images: &[RgbImage],
    rows: Option<u32>,
    cols: Option<u32>,
    layout: &LayoutConfig,
) -> Result<Composite, LayoutError> {
    if images.is_empty() {
        return Err(LayoutError::Empty);
    }

    let cell_width = images.iter().map(RgbImage::width).max().unwrap_or(0);
    let cell_height = images.iter().map(RgbImage::height).max().unwrap_or(0);

    let spec = GridSpec::compute(images.len(), rows, cols, cell_width, cell_height, layout)?;
    let (width, height) = spec.canvas_size()?;

    debug!(
        target: "layout",
        symbols = images.len(),
        rows = spec.rows,
        cols = spec.cols,
        cell_width,
        cell_height,
        width,
        height,
        "composing grid"
    );

    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);
    for (idx, image) in images.iter().enumerate() {
        let cell = normalize(image, cell_width, cell_height);
        let (x, y) = spec.cell_origin(idx);
        imageops::replace(&mut canvas, &cell, x as i64, y as i64);
    }

    Ok(Composite { canvas, spec })
}
