//! Two-row layout: character boxes on top, underline segments below.
//!
//! Both rows share one horizontal arrangement: `character_limit` equal-width
//! cells separated by `spacing`, so each underline sits exactly under its box.

use crate::options::CodeFieldOptions;
use codefield_graphics::{Rect, Size};

/// Distributes equal-width cells along an axis with a fixed gap between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpacedEvenly {
    pub count: usize,
    pub spacing: f32,
}

impl SpacedEvenly {
    /// Width of each cell when the row spans `total` px. Never negative.
    pub fn cell_size(&self, total: f32) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        let gaps = self.spacing * (self.count as f32 - 1.0);
        ((total - gaps) / self.count as f32).max(0.0)
    }

    /// Leading edge of every cell.
    pub fn arrange(&self, total: f32, out_positions: &mut [f32]) {
        debug_assert_eq!(out_positions.len(), self.count);
        let cell = self.cell_size(total);
        let mut cursor = 0.0;
        for position in out_positions.iter_mut() {
            *position = cursor;
            cursor += cell + self.spacing;
        }
    }
}

/// Resolved rectangles for one frame, in px.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FieldLayout {
    pub size: Size,
    pub boxes: Vec<Rect>,
    pub underlines: Vec<Rect>,
}

impl FieldLayout {
    /// Lays the field out in `size` px, converting dp options with `density`.
    ///
    /// The underline row is pinned to the bottom edge. The box row fills the
    /// height above it minus the underline margin. A density that is not a
    /// positive finite number is treated as 1.0.
    pub fn compute(options: &CodeFieldOptions, size: Size, density: f32) -> Self {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            log::debug!("invalid layout density {density}, using 1.0");
            1.0
        };
        let count = options.character_limit;
        let arrangement = SpacedEvenly {
            count,
            spacing: options.spacing.to_px(density),
        };
        let mut positions = vec![0.0; count];
        arrangement.arrange(size.width, &mut positions);
        let cell = arrangement.cell_size(size.width);

        let underline_height = options.underline_height.to_px(density).min(size.height);
        let underline_y = size.height - underline_height;
        let box_height = (underline_y - options.underline_margin.to_px(density)).max(0.0);

        let boxes = positions
            .iter()
            .map(|&x| Rect::new(x, 0.0, cell, box_height))
            .collect();
        let underlines = positions
            .iter()
            .map(|&x| Rect::new(x, underline_y, cell, underline_height))
            .collect();

        Self {
            size,
            boxes,
            underlines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codefield_graphics::Dp;

    fn options(count: usize) -> CodeFieldOptions {
        CodeFieldOptions::default()
            .with_character_limit(count)
            .with_spacing(Dp(10.0))
            .with_underline_height(Dp(3.0))
            .with_underline_margin(Dp(4.0))
    }

    #[test]
    fn cells_are_equal_and_spaced() {
        let layout = FieldLayout::compute(&options(5), Size::new(290.0, 50.0), 1.0);
        assert_eq!(layout.boxes.len(), 5);
        for (index, rect) in layout.boxes.iter().enumerate() {
            assert_eq!(rect.width, 50.0);
            assert_eq!(rect.x, index as f32 * 60.0);
        }
        assert_eq!(layout.boxes[4].right(), 290.0);
    }

    #[test]
    fn underline_row_matches_box_row_horizontally() {
        let layout = FieldLayout::compute(&options(4), Size::new(200.0, 40.0), 2.0);
        for (cell, line) in layout.boxes.iter().zip(&layout.underlines) {
            assert_eq!(cell.x, line.x);
            assert_eq!(cell.width, line.width);
        }
        // 3 dp at density 2
        assert_eq!(layout.underlines[0].height, 6.0);
        assert_eq!(layout.underlines[0].bottom(), 40.0);
        // 40 - 6 - 8
        assert_eq!(layout.boxes[0].height, 26.0);
    }

    #[test]
    fn too_narrow_collapses_to_zero_width() {
        let layout = FieldLayout::compute(&options(6), Size::new(20.0, 10.0), 1.0);
        assert!(layout.boxes.iter().all(|rect| rect.width == 0.0));
    }

    #[test]
    fn invalid_density_falls_back_to_one() {
        let size = Size::new(100.0, 20.0);
        let expected = FieldLayout::compute(&options(3), size, 1.0);
        for density in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let layout = FieldLayout::compute(&options(3), size, density);
            assert_eq!(layout, expected, "density {density}");
            assert!(layout.boxes.iter().all(|rect| rect.height >= 0.0 && rect.bottom() <= 20.0));
            assert!(layout.underlines.iter().all(|rect| rect.height >= 0.0 && rect.bottom() <= 20.0));
        }
    }

    #[test]
    fn single_cell_spans_full_width() {
        let layout = FieldLayout::compute(&options(1), Size::new(33.0, 10.0), 1.0);
        assert_eq!(layout.boxes[0], Rect::new(0.0, 0.0, 33.0, 3.0));
        assert_eq!(layout.underlines[0], Rect::new(0.0, 7.0, 33.0, 3.0));
    }
}
