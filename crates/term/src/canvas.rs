//! RasterCanvas: rasterizes the core's canvas-style calls into a
//! framebuffer of styled characters.
//!
//! One logical pixel is two terminal columns by one row. Strokes are sampled
//! along their arc length so dash patterns (and the dash offset that
//! animates them) fall where they would on a real canvas; glow renders as a
//! dim halo ring around painted cells. A separate backdrop buffer holds the
//! static grid background and is restored by `clear`.

use std::collections::HashSet;

use tui_cycles_core::layout::Layout;
use tui_cycles_core::surface::{Dash, FillStyle, StrokeStyle, Surface};
use tui_cycles_types::{PixelPoint, Rgb, SurfaceSize, GRID_LINE_COLOR};

use crate::fb::{Cell, CellStyle, FrameBuffer};

/// Terminal columns covered by one logical pixel.
pub const CHARS_PER_PIXEL: u16 = 2;

/// Segments a quadratic curve is flattened into.
const QUAD_SEGMENTS: u32 = 8;

/// Arc-length sampling step when stroking, in pixels.
const SAMPLE_STEP: f32 = 0.5;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// The pixel-space surface this terminal can show.
    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::new((self.width / CHARS_PER_PIXEL) as f32, self.height as f32)
    }
}

/// A drawing surface backed by two framebuffers (frame + backdrop).
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    size: SurfaceSize,
    frame: FrameBuffer,
    backdrop: FrameBuffer,
    subpaths: Vec<Vec<PixelPoint>>,
}

impl RasterCanvas {
    pub fn new(size: SurfaceSize) -> Self {
        let (w, h) = char_dims(size);
        Self {
            size,
            frame: FrameBuffer::new(w, h),
            backdrop: FrameBuffer::new(w, h),
            subpaths: Vec::new(),
        }
    }

    /// The finished frame, ready to flush.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    fn current_point(&self) -> Option<PixelPoint> {
        self.subpaths.last().and_then(|sub| sub.last().copied())
    }

    /// Paint one logical pixel (two adjacent character cells).
    fn plot(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || y > u16::MAX as i32 || x >= (u16::MAX / CHARS_PER_PIXEL) as i32 {
            return;
        }
        let cx = x as u16 * CHARS_PER_PIXEL;
        self.frame.put_char(cx, y as u16, ch, style);
        self.frame.put_char(cx + 1, y as u16, ch, style);
    }

    /// Halo variant: never overwrites solid cells.
    fn plot_halo(&mut self, x: i32, y: i32, style: CellStyle) {
        if x < 0 || y < 0 || y > u16::MAX as i32 || x >= (u16::MAX / CHARS_PER_PIXEL) as i32 {
            return;
        }
        let cx = x as u16 * CHARS_PER_PIXEL;
        if let Some(cell) = self.frame.get(cx, y as u16) {
            if cell.ch != '█' {
                self.plot(x, y, '░', style);
            }
        }
    }

    /// Paint a set of pixels solid, then its one-pixel halo ring when the
    /// style asks for glow.
    fn paint(&mut self, pixels: &HashSet<(i32, i32)>, color: Rgb, glow: f32) {
        let solid = CellStyle {
            fg: color,
            bold: true,
            ..CellStyle::default()
        };
        for &(x, y) in pixels {
            self.plot(x, y, '█', solid);
        }
        if glow <= 0.0 {
            return;
        }
        let halo = CellStyle {
            fg: color,
            dim: true,
            ..CellStyle::default()
        };
        for &(x, y) in pixels {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if !pixels.contains(&(x + dx, y + dy)) {
                        self.plot_halo(x + dx, y + dy, halo);
                    }
                }
            }
        }
    }

    /// Pixel-space extent of the framebuffer, for clamping fill scans.
    fn pixel_bounds(&self) -> (i32, i32) {
        (
            (self.frame.width() / CHARS_PER_PIXEL) as i32,
            self.frame.height() as i32,
        )
    }

    fn grid_line_pixel(&mut self, x: i32, y: i32) {
        let style = CellStyle {
            fg: GRID_LINE_COLOR,
            dim: true,
            ..CellStyle::default()
        };
        if x < 0 || y < 0 {
            return;
        }
        let cx = x as u16 * CHARS_PER_PIXEL;
        self.backdrop.put_char(cx, y as u16, '·', style);
        self.backdrop.put_char(cx + 1, y as u16, '·', style);
    }
}

impl Surface for RasterCanvas {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        let (w, h) = char_dims(size);
        self.frame.resize(w, h);
        self.backdrop.resize(w, h);
        self.backdrop.fill(Cell::default());
        self.frame.fill(Cell::default());
    }

    fn set_backdrop(&mut self, layout: &Layout) {
        self.backdrop.fill(Cell::default());

        let w = self.size.width.round() as i32;
        let h = self.size.height.round() as i32;

        // Vertical grid lines every step, plus the far edge.
        let mut x = 0.0;
        while x < self.size.width {
            for y in 0..h {
                self.grid_line_pixel(x.round() as i32, y);
            }
            x += layout.step_x;
        }
        for y in 0..h {
            self.grid_line_pixel(w - 1, y);
        }

        // Horizontal grid lines every step, plus the far edge.
        let mut y = 0.0;
        while y < self.size.height {
            for x in 0..w {
                self.grid_line_pixel(x, y.round() as i32);
            }
            y += layout.step_y;
        }
        for x in 0..w {
            self.grid_line_pixel(x, h - 1);
        }

        self.frame.clone_from(&self.backdrop);
    }

    fn clear(&mut self) {
        self.frame.clone_from(&self.backdrop);
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, p: PixelPoint) {
        self.subpaths.push(vec![p]);
    }

    fn line_to(&mut self, p: PixelPoint) {
        match self.subpaths.last_mut() {
            Some(sub) => sub.push(p),
            None => self.subpaths.push(vec![p]),
        }
    }

    fn quad_to(&mut self, ctrl: PixelPoint, end: PixelPoint) {
        let Some(start) = self.current_point() else {
            self.move_to(end);
            return;
        };
        let sub = self.subpaths.last_mut().unwrap();
        for i in 1..=QUAD_SEGMENTS {
            let t = i as f32 / QUAD_SEGMENTS as f32;
            let u = 1.0 - t;
            sub.push(PixelPoint::new(
                u * u * start.x + 2.0 * u * t * ctrl.x + t * t * end.x,
                u * u * start.y + 2.0 * u * t * ctrl.y + t * t * end.y,
            ));
        }
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        let radius = (style.width / 2.0).max(0.5);
        let bounds = self.pixel_bounds();
        let mut pixels: HashSet<(i32, i32)> = HashSet::new();

        for sub in &self.subpaths {
            let mut travelled = 0.0f32;
            for seg in sub.windows(2) {
                let (a, b) = (seg[0], seg[1]);
                let (dx, dy) = (b.x - a.x, b.y - a.y);
                let len = (dx * dx + dy * dy).sqrt();
                if len == 0.0 {
                    continue;
                }
                let steps = (len / SAMPLE_STEP).ceil() as u32;
                for i in 0..=steps {
                    let t = i as f32 / steps as f32;
                    if dash_on(style, travelled + t * len) {
                        disc(&mut pixels, a.x + t * dx, a.y + t * dy, radius, bounds);
                    }
                }
                travelled += len;
            }
        }

        self.paint(&pixels, style.color, style.glow);
    }

    fn fill_triangle(&mut self, a: PixelPoint, b: PixelPoint, c: PixelPoint, style: &FillStyle) {
        let (bw, bh) = self.pixel_bounds();
        let min_x = (a.x.min(b.x).min(c.x).floor() as i32).max(0);
        let max_x = (a.x.max(b.x).max(c.x).ceil() as i32).min(bw - 1);
        let min_y = (a.y.min(b.y).min(c.y).floor() as i32).max(0);
        let max_y = (a.y.max(b.y).max(c.y).ceil() as i32).min(bh - 1);

        let mut pixels = HashSet::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = PixelPoint::new(x as f32, y as f32);
                if inside_triangle(p, a, b, c) {
                    pixels.insert((x, y));
                }
            }
        }
        self.paint(&pixels, style.color, style.glow);
    }

    fn fill_circle(&mut self, center: PixelPoint, radius: f32, style: &FillStyle) {
        let r = radius.max(0.5);
        let mut pixels = HashSet::new();
        disc(&mut pixels, center.x, center.y, r, self.pixel_bounds());
        self.paint(&pixels, style.color, style.glow);
    }
}

fn char_dims(size: SurfaceSize) -> (u16, u16) {
    let w = (size.width.round().max(0.0) as u16).saturating_mul(CHARS_PER_PIXEL);
    let h = size.height.round().max(0.0) as u16;
    (w, h)
}

/// Is position `s` along the path inside an "on" dash?
fn dash_on(style: &StrokeStyle, s: f32) -> bool {
    match style.dash {
        None => true,
        Some(Dash { len, gap }) => {
            let period = len + gap;
            if period <= 0.0 {
                return true;
            }
            (s + style.dash_offset).rem_euclid(period) < len
        }
    }
}

/// Collect all integer pixels within `radius` of `(cx, cy)`.
///
/// The scan is clamped to the `(width, height)` pixel bounds so off-surface
/// centers and oversized radii (a degenerate layout yields infinite steps)
/// stay bounded.
fn disc(pixels: &mut HashSet<(i32, i32)>, cx: f32, cy: f32, radius: f32, bounds: (i32, i32)) {
    let (bw, bh) = bounds;
    let min_x = ((cx - radius).floor() as i32).max(0);
    let max_x = ((cx + radius).ceil() as i32).min(bw - 1);
    let min_y = ((cy - radius).floor() as i32).max(0);
    let max_y = ((cy + radius).ceil() as i32).min(bh - 1);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (dx, dy) = (x as f32 - cx, y as f32 - cy);
            if dx * dx + dy * dy <= radius * radius {
                pixels.insert((x, y));
            }
        }
    }
}

fn inside_triangle(p: PixelPoint, a: PixelPoint, b: PixelPoint, c: PixelPoint) -> bool {
    let edge = |p0: PixelPoint, p1: PixelPoint| (p.x - p0.x) * (p1.y - p0.y) - (p.y - p0.y) * (p1.x - p0.x);
    let (e0, e1, e2) = (edge(a, b), edge(b, c), edge(c, a));
    (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: f32, h: f32) -> RasterCanvas {
        RasterCanvas::new(SurfaceSize::new(w, h))
    }

    fn solid_at(canvas: &RasterCanvas, x: u16, y: u16) -> bool {
        canvas.frame().get(x, y).map(|c| c.ch == '█').unwrap_or(false)
    }

    #[test]
    fn viewport_maps_columns_two_to_one() {
        let vp = Viewport::new(100, 40);
        assert_eq!(vp.surface_size(), SurfaceSize::new(50.0, 40.0));
    }

    #[test]
    fn horizontal_stroke_paints_cells_along_the_line() {
        let mut c = canvas(20.0, 10.0);
        c.begin_path();
        c.move_to(PixelPoint::new(2.0, 3.0));
        c.line_to(PixelPoint::new(8.0, 3.0));
        c.stroke(&StrokeStyle {
            color: Rgb::new(255, 0, 0),
            width: 1.0,
            dash: None,
            dash_offset: 0.0,
            glow: 0.0,
        });

        for px in 2..=8 {
            assert!(solid_at(&c, px * CHARS_PER_PIXEL, 3), "pixel {px}");
            assert!(solid_at(&c, px * CHARS_PER_PIXEL + 1, 3), "pixel {px}+1");
        }
        assert!(!solid_at(&c, 0, 3));
    }

    #[test]
    fn dashed_stroke_leaves_gaps() {
        let mut c = canvas(40.0, 10.0);
        c.begin_path();
        c.move_to(PixelPoint::new(0.0, 5.0));
        c.line_to(PixelPoint::new(39.0, 5.0));
        c.stroke(&StrokeStyle {
            color: Rgb::new(255, 0, 0),
            width: 1.0,
            dash: Some(Dash { len: 4.0, gap: 4.0 }),
            dash_offset: 0.0,
            glow: 0.0,
        });

        let on: Vec<bool> = (0..40u16).map(|px| solid_at(&c, px * CHARS_PER_PIXEL, 5)).collect();
        assert!(on.iter().any(|&b| b));
        assert!(on.iter().any(|&b| !b));
        // The start of the line is inside the first "on" dash.
        assert!(on[0]);
    }

    #[test]
    fn glow_adds_dim_halo_next_to_solid_cells() {
        let mut c = canvas(20.0, 10.0);
        c.fill_circle(
            PixelPoint::new(10.0, 5.0),
            1.0,
            &FillStyle {
                color: Rgb::new(0, 255, 0),
                glow: 2.0,
            },
        );

        assert!(solid_at(&c, 10 * CHARS_PER_PIXEL, 5));
        // One pixel past the circle edge: halo, not solid.
        let halo = c.frame().get(8 * CHARS_PER_PIXEL, 5).unwrap();
        assert_eq!(halo.ch, '░');
        assert!(halo.style.dim);
    }

    #[test]
    fn filled_triangle_covers_its_centroid() {
        let mut c = canvas(20.0, 20.0);
        c.fill_triangle(
            PixelPoint::new(10.0, 4.0),
            PixelPoint::new(6.0, 12.0),
            PixelPoint::new(14.0, 12.0),
            &FillStyle {
                color: Rgb::new(0, 0, 255),
                glow: 0.0,
            },
        );
        assert!(solid_at(&c, 10 * CHARS_PER_PIXEL, 9));
        assert!(!solid_at(&c, 1 * CHARS_PER_PIXEL, 4));
    }

    #[test]
    fn far_off_surface_glow_paints_nothing() {
        let mut c = canvas(20.0, 10.0);
        c.fill_circle(
            PixelPoint::new(40000.0, 5.0),
            1.0,
            &FillStyle {
                color: Rgb::new(0, 255, 0),
                glow: 2.0,
            },
        );

        for y in 0..10 {
            for x in 0..40 {
                assert_eq!(c.frame().get(x, y).unwrap().ch, ' ', "({x},{y})");
            }
        }
    }

    #[test]
    fn degenerate_layout_stroke_terminates_inside_the_canvas() {
        // A zero-cell grid derives infinite steps, so the frame stroke width
        // is infinite; the scan must clamp to the framebuffer and return.
        let mut c = canvas(20.0, 10.0);
        let width = Layout::for_grid(SurfaceSize::new(20.0, 10.0), 0, 0).step_x / 2.0;
        assert!(width.is_infinite());

        c.begin_path();
        c.move_to(PixelPoint::new(2.0, 3.0));
        c.line_to(PixelPoint::new(8.0, 3.0));
        c.stroke(&StrokeStyle {
            color: Rgb::new(255, 0, 0),
            width,
            dash: None,
            dash_offset: 0.0,
            glow: 0.0,
        });

        assert!(solid_at(&c, 0, 0));
        assert!(solid_at(&c, 19 * CHARS_PER_PIXEL, 9));
    }

    #[test]
    fn clear_restores_the_backdrop() {
        let mut c = canvas(20.0, 10.0);
        let layout = Layout::for_grid(SurfaceSize::new(20.0, 10.0), 4, 2);
        c.set_backdrop(&layout);
        let pristine = c.frame().clone();

        c.fill_circle(
            PixelPoint::new(10.0, 5.0),
            2.0,
            &FillStyle {
                color: Rgb::new(0, 255, 0),
                glow: 0.0,
            },
        );
        assert_ne!(*c.frame(), pristine);

        c.clear();
        assert_eq!(*c.frame(), pristine);
    }

    #[test]
    fn backdrop_has_grid_lines_at_step_multiples() {
        let mut c = canvas(20.0, 10.0);
        let layout = Layout::for_grid(SurfaceSize::new(20.0, 10.0), 4, 2);
        c.set_backdrop(&layout);

        // step_x = 5: vertical lines at pixel x = 0, 5, 10, 15.
        for px in [0u16, 5, 10, 15] {
            assert_eq!(c.frame().get(px * CHARS_PER_PIXEL, 2).unwrap().ch, '·', "x={px}");
        }
        assert_eq!(c.frame().get(1 * CHARS_PER_PIXEL, 2).unwrap().ch, ' ');
    }
}
