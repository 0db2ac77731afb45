//! Mapping between logical grid coordinates and pixel space.
//!
//! The arena's logical origin is bottom-left; the drawing surface's origin is
//! top-left, so the y axis flips. Each logical cell maps to the pixel center
//! of its rendered square (the offset term is exactly half a step).

use tui_cycles_types::{GridCell, PixelPoint, SurfaceSize};

/// Derived mapping constants between grid units and pixel space.
///
/// Computed once from the first snapshot's grid dimensions and the fixed
/// surface size; every position within one frame must come from the same
/// instance. Recomputed only when the grid dimensions change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub step_x: f32,
    pub step_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub surface_w: f32,
    pub surface_h: f32,
}

impl Layout {
    pub fn for_grid(surface: SurfaceSize, cols: u32, rows: u32) -> Self {
        let step_x = surface.width / cols as f32;
        let step_y = surface.height / rows as f32;
        Self {
            step_x,
            step_y,
            offset_x: step_x / 2.0,
            offset_y: step_y / 2.0,
            surface_w: surface.width,
            surface_h: surface.height,
        }
    }

    /// Map a logical cell to its pixel center.
    ///
    /// Out-of-range cells extrapolate linearly; callers own validity.
    pub fn map_cell(&self, cell: GridCell) -> PixelPoint {
        PixelPoint::new(
            cell.col as f32 * self.step_x + self.offset_x,
            self.surface_h - (cell.row as f32 * self.step_y + self.offset_y),
        )
    }

    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.surface_w, self.surface_h)
    }
}

/// Per-axis arithmetic mean: the shared boundary point between two
/// consecutive drawing cells.
pub fn midpoint(a: PixelPoint, b: PixelPoint) -> PixelPoint {
    PixelPoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_500_10() -> Layout {
        Layout::for_grid(SurfaceSize::new(500.0, 500.0), 10, 10)
    }

    #[test]
    fn derives_steps_and_offsets_from_grid() {
        let l = layout_500_10();
        assert_eq!(l.step_x, 50.0);
        assert_eq!(l.step_y, 50.0);
        assert_eq!(l.offset_x, 25.0);
        assert_eq!(l.offset_y, 25.0);
    }

    #[test]
    fn origin_cell_maps_to_bottom_left_center() {
        let l = layout_500_10();
        let p = l.map_cell(GridCell::new(0, 0));
        assert_eq!(p, PixelPoint::new(l.offset_x, l.surface_h - l.offset_y));
        assert_eq!(p, PixelPoint::new(25.0, 475.0));
    }

    #[test]
    fn far_corner_maps_to_top_right_center() {
        let l = layout_500_10();
        assert_eq!(l.map_cell(GridCell::new(9, 9)), PixelPoint::new(475.0, 25.0));
    }

    #[test]
    fn pixel_y_decreases_as_row_increases() {
        let l = Layout::for_grid(SurfaceSize::new(320.0, 200.0), 16, 25);
        let mut prev = l.map_cell(GridCell::new(3, 0)).y;
        for row in 1..25 {
            let y = l.map_cell(GridCell::new(3, row)).y;
            assert!(y < prev, "row {row}: {y} !< {prev}");
            prev = y;
        }
    }

    #[test]
    fn out_of_range_cells_extrapolate_without_clamping() {
        let l = layout_500_10();
        assert_eq!(l.map_cell(GridCell::new(-1, 0)), PixelPoint::new(-25.0, 475.0));
        assert_eq!(l.map_cell(GridCell::new(10, 0)), PixelPoint::new(525.0, 475.0));
    }

    #[test]
    fn midpoint_is_per_axis_mean() {
        let m = midpoint(PixelPoint::new(25.0, 475.0), PixelPoint::new(75.0, 425.0));
        assert_eq!(m, PixelPoint::new(50.0, 450.0));
    }
}
