#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use qrgrid_core::config::LayoutConfig;
    use qrgrid_core::layout::{compose, normalize, resolve_dimensions, GridSpec, LayoutError, BACKGROUND};

    const INK: Rgb<u8> = Rgb([0, 0, 0]);

    fn solid(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, INK)
    }

    // --- Dimensions ---

    #[test]
    fn seven_symbols_make_a_3x3_grid() {
        assert_eq!(resolve_dimensions(7, None, None).unwrap(), (3, 3));
    }

    #[test]
    fn auto_dimensions_for_small_counts() {
        assert_eq!(resolve_dimensions(1, None, None).unwrap(), (1, 1));
        assert_eq!(resolve_dimensions(2, None, None).unwrap(), (1, 2));
        assert_eq!(resolve_dimensions(4, None, None).unwrap(), (2, 2));
        assert_eq!(resolve_dimensions(5, None, None).unwrap(), (2, 3));
        assert_eq!(resolve_dimensions(10, None, None).unwrap(), (3, 4));
    }

    #[test]
    fn one_dimension_derives_the_other() {
        assert_eq!(resolve_dimensions(7, Some(2), None).unwrap(), (2, 4));
        assert_eq!(resolve_dimensions(7, None, Some(5)).unwrap(), (2, 5));
        assert_eq!(resolve_dimensions(7, None, Some(1)).unwrap(), (7, 1));
    }

    #[test]
    fn explicit_grid_too_small_fails() {
        assert_eq!(
            resolve_dimensions(7, Some(2), Some(3)),
            Err(LayoutError::GridTooSmall { rows: 2, cols: 3, capacity: 6, needed: 7 })
        );
    }

    #[test]
    fn zero_symbols_or_dimensions_fail() {
        assert_eq!(resolve_dimensions(0, None, None), Err(LayoutError::Empty));
        assert_eq!(
            resolve_dimensions(3, Some(0), None),
            Err(LayoutError::InvalidDimension { axis: "rows" })
        );
    }

    // --- Geometry ---

    #[test]
    fn canvas_size_formula() {
        let layout = LayoutConfig { spacing: 20, margin: 5 };
        let spec = GridSpec::compute(7, None, None, 50, 40, &layout).unwrap();
        // 3*50 + 2*20 + 2*5, 3*40 + 2*20 + 2*5
        assert_eq!(spec.canvas_size().unwrap(), (200, 170));
        assert_eq!(spec.capacity(), 9);
    }

    #[test]
    fn cell_origins_are_row_major() {
        let layout = LayoutConfig { spacing: 20, margin: 0 };
        let spec = GridSpec::compute(5, None, None, 10, 10, &layout).unwrap();
        assert_eq!((spec.rows, spec.cols), (2, 3));
        assert_eq!(spec.cell_position(4), (1, 1));
        assert_eq!(spec.cell_origin(0), (0, 0));
        assert_eq!(spec.cell_origin(2), (60, 0));
        assert_eq!(spec.cell_origin(4), (30, 30));
    }

    // --- Normalization and composition ---

    #[test]
    fn normalize_centers_smaller_images() {
        let cell = normalize(&solid(2, 2), 6, 4);
        assert_eq!(cell.dimensions(), (6, 4));
        assert_eq!(*cell.get_pixel(2, 1), INK);
        assert_eq!(*cell.get_pixel(3, 2), INK);
        assert_eq!(*cell.get_pixel(1, 1), BACKGROUND);
        assert_eq!(*cell.get_pixel(4, 1), BACKGROUND);
        assert_eq!(*cell.get_pixel(2, 0), BACKGROUND);
    }

    #[test]
    fn compose_places_symbols_and_leaves_spare_cells_blank() {
        let images = vec![solid(10, 10), solid(4, 4), solid(10, 10)];
        let layout = LayoutConfig { spacing: 2, margin: 1 };
        let composite = compose(&images, None, None, &layout).unwrap();

        assert_eq!((composite.spec.rows, composite.spec.cols), (2, 2));
        assert_eq!(composite.canvas.dimensions(), (24, 24));

        // Margin and spacing stay blank.
        assert_eq!(*composite.canvas.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*composite.canvas.get_pixel(11, 5), BACKGROUND);
        // First cell fully inked.
        assert_eq!(*composite.canvas.get_pixel(1, 1), INK);
        // Second cell: 4x4 centered inside a 10x10 cell at x=13.
        assert_eq!(*composite.canvas.get_pixel(13, 1), BACKGROUND);
        assert_eq!(*composite.canvas.get_pixel(16, 4), INK);
        // Third cell, second row.
        assert_eq!(*composite.canvas.get_pixel(1, 13), INK);
        // Fourth cell unused.
        assert_eq!(*composite.canvas.get_pixel(18, 18), BACKGROUND);
    }

    #[test]
    fn compose_rejects_empty_set_and_small_grids() {
        let layout = LayoutConfig::default();
        assert!(matches!(compose(&[], None, None, &layout), Err(LayoutError::Empty)));

        let images = vec![solid(3, 3); 5];
        assert!(matches!(
            compose(&images, Some(2), Some(2), &layout),
            Err(LayoutError::GridTooSmall { .. })
        ));
    }
}
