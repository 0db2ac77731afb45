//! Trail geometry helpers: cell sequences to pixel sequences, and the
//! 3-point-window turn predicate used when stroking a trail.

use tui_cycles_types::{GridCell, PixelPoint};

use crate::layout::Layout;

/// Map a trail, order-preserving and one-to-one, into pixel space.
///
/// No deduplication and no smoothing here; whether a segment curves is a
/// drawing-stroke decision made while connecting the points.
pub fn trail_pixels(trail: &[GridCell], layout: &Layout) -> Vec<PixelPoint> {
    trail.iter().map(|&cell| layout.map_cell(cell)).collect()
}

/// Turn predicate over the two outer points of a 3-point window.
///
/// True iff `prev` and `next` differ on both axes, i.e. neither coordinate
/// stayed constant across the triple. Collinear travel never turns; a 90°
/// corner always does.
pub fn turned(prev: PixelPoint, next: PixelPoint) -> bool {
    prev.x != next.x && prev.y != next.y
}
