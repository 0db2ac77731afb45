//! SceneDrawer: paints one complete frame from a state snapshot.
//!
//! This module is pure relative to the [`Surface`] it draws on: given the
//! same snapshot, roster, layout, and dash phase it issues the same calls.
//! A frame always completes; the only locally-recovered oddity is a bike
//! without a usable heading, which keeps its trail but gets no head.

use tracing::warn;

use tui_cycles_types::{
    Bike, GridCell, Heading, PixelPoint, Player, Rgb, Snapshot, DEFAULT_BIKE_COLOR, SPAWN_COLOR,
};

use crate::layout::{midpoint, Layout};
use crate::surface::{Dash, FillStyle, StrokeStyle, Surface};
use crate::trail::{trail_pixels, turned};

/// Draws snapshots onto a surface.
#[derive(Debug, Clone)]
pub struct SceneDrawer {
    default_color: Rgb,
}

impl Default for SceneDrawer {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_BIKE_COLOR,
        }
    }
}

impl SceneDrawer {
    pub fn new(default_color: Rgb) -> Self {
        Self { default_color }
    }

    /// Paint one frame: clear, every bike (head + trail), every spawn.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        snapshot: &Snapshot,
        players: &[Player],
        layout: &Layout,
        dash_phase: f32,
    ) {
        surface.clear();

        let stroke = frame_stroke_style(layout, dash_phase);
        for bike in &snapshot.bikes {
            let color = self.resolve_color(players, bike.player_id);
            self.draw_bike(surface, bike, color, layout, &stroke);
        }

        for &spawn in &snapshot.spawns {
            draw_spawn(surface, spawn, layout);
        }
    }

    /// Roster lookup by owner id; unknown ids fall back to the default color.
    fn resolve_color(&self, players: &[Player], player_id: u32) -> Rgb {
        players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.color)
            .unwrap_or(self.default_color)
    }

    fn draw_bike(
        &self,
        surface: &mut dyn Surface,
        bike: &Bike,
        color: Rgb,
        layout: &Layout,
        stroke: &StrokeStyle,
    ) {
        let head_px = layout.map_cell(bike.at);

        match bike.heading {
            Some(heading) => draw_head(surface, heading, head_px, layout, color),
            None => warn!(player_id = bike.player_id, "bike has no usable heading, head not drawn"),
        }

        let trail = trail_pixels(&bike.trail, layout);
        if trail.is_empty() {
            return;
        }

        surface.begin_path();
        surface.move_to(head_px);
        surface.line_to(midpoint(head_px, trail[0]));

        // 3-point window: the previously drawn point, the current trail
        // point, and the lookahead decide curve vs line. The head-to-first
        // segment above is therefore never smoothed.
        let mut prev = head_px;
        for (i, &cur) in trail.iter().enumerate() {
            match trail.get(i + 1) {
                Some(&next) if turned(prev, next) => {
                    surface.quad_to(cur, midpoint(cur, next));
                }
                Some(&next) => {
                    surface.line_to(midpoint(cur, next));
                }
                None => {
                    // Oldest recorded end: run to the point itself, then one
                    // offset further outward to fill the originating cell.
                    surface.line_to(cur);
                    if let Some(ext) = extend_outward(cur, prev, layout) {
                        surface.line_to(ext);
                    }
                }
            }
            prev = cur;
        }

        surface.stroke(&StrokeStyle { color, ..*stroke });
    }
}

/// Frame-wide trail stroke parameters derived from the layout.
fn frame_stroke_style(layout: &Layout, dash_phase: f32) -> StrokeStyle {
    let dash = layout.step_x / 4.0;
    StrokeStyle {
        color: DEFAULT_BIKE_COLOR,
        width: layout.step_x / 2.0,
        dash: Some(Dash { len: dash, gap: dash }),
        dash_offset: -dash_phase,
        glow: layout.step_x / 2.0,
    }
}

/// Filled triangle pointing along the heading: base perpendicular to travel
/// spanning one step, apex one half-step ahead.
fn draw_head(
    surface: &mut dyn Surface,
    heading: Heading,
    p: PixelPoint,
    layout: &Layout,
    color: Rgb,
) {
    let (ox, oy) = (layout.offset_x, layout.offset_y);
    let (apex, base_a, base_b) = match heading {
        Heading::North => (
            PixelPoint::new(p.x, p.y - oy),
            PixelPoint::new(p.x + ox, p.y),
            PixelPoint::new(p.x - ox, p.y),
        ),
        Heading::South => (
            PixelPoint::new(p.x, p.y + oy),
            PixelPoint::new(p.x + ox, p.y),
            PixelPoint::new(p.x - ox, p.y),
        ),
        Heading::East => (
            PixelPoint::new(p.x + ox, p.y),
            PixelPoint::new(p.x, p.y + oy),
            PixelPoint::new(p.x, p.y - oy),
        ),
        Heading::West => (
            PixelPoint::new(p.x - ox, p.y),
            PixelPoint::new(p.x, p.y + oy),
            PixelPoint::new(p.x, p.y - oy),
        ),
    };
    let style = FillStyle {
        color,
        glow: layout.step_x / 2.0,
    };
    surface.fill_triangle(apex, base_a, base_b, &style);
}

/// Extension past the trail's oldest point, away from its predecessor.
///
/// The four cases are tested in order: column-greater, column-less,
/// row-greater, row-less. A degenerate single-cell trail (both axes equal)
/// extends nothing.
fn extend_outward(last: PixelPoint, pre_last: PixelPoint, layout: &Layout) -> Option<PixelPoint> {
    if pre_last.x < last.x {
        Some(PixelPoint::new(last.x + layout.offset_x, last.y))
    } else if pre_last.x > last.x {
        Some(PixelPoint::new(last.x - layout.offset_x, last.y))
    } else if pre_last.y > last.y {
        Some(PixelPoint::new(last.x, last.y - layout.offset_y))
    } else if pre_last.y < last.y {
        Some(PixelPoint::new(last.x, last.y + layout.offset_y))
    } else {
        None
    }
}

fn draw_spawn(surface: &mut dyn Surface, spawn: GridCell, layout: &Layout) {
    let style = FillStyle {
        color: SPAWN_COLOR,
        glow: layout.step_x / 2.0,
    };
    surface.fill_circle(layout.map_cell(spawn), layout.step_x / 3.0, &style);
}
