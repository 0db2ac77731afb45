//! The drawing surface abstraction.
//!
//! The scene drawer speaks a small canvas-style vocabulary: build a path out
//! of lines and quadratic curves, then stroke it; fill triangles and circles
//! directly. Backends rasterize however they like (the terminal backend
//! paints character cells). All operations are infallible; flushing pixels
//! anywhere fallible is the backend's own concern, outside this trait.

use tui_cycles_types::{PixelPoint, Rgb, SurfaceSize};

use crate::layout::Layout;

/// Dash pattern: `len` pixels on, `gap` pixels off, repeating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub len: f32,
    pub gap: f32,
}

/// Stroke parameters for a committed path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgb,
    pub width: f32,
    pub dash: Option<Dash>,
    /// Shifts the dash pattern along the path; animating this marches the
    /// dashes along the trail.
    pub dash_offset: f32,
    /// Halo radius around the stroke (shadow-blur analogue).
    pub glow: f32,
}

/// Fill parameters for solid shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillStyle {
    pub color: Rgb,
    pub glow: f32,
}

/// A drawing surface accepting canvas-style calls.
pub trait Surface {
    fn size(&self) -> SurfaceSize;

    /// Resize the surface. Performed once, before the first frame.
    fn resize(&mut self, size: SurfaceSize);

    /// Paint the static grid background kept underneath every frame.
    fn set_backdrop(&mut self, layout: &Layout);

    /// Reset the frame to the backdrop.
    fn clear(&mut self);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: PixelPoint);
    fn line_to(&mut self, p: PixelPoint);
    /// Quadratic curve through control point `ctrl` ending at `end`.
    fn quad_to(&mut self, ctrl: PixelPoint, end: PixelPoint);
    /// Commit the current path.
    fn stroke(&mut self, style: &StrokeStyle);

    fn fill_triangle(&mut self, a: PixelPoint, b: PixelPoint, c: PixelPoint, style: &FillStyle);
    fn fill_circle(&mut self, center: PixelPoint, radius: f32, style: &FillStyle);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Resize(SurfaceSize),
    SetBackdrop,
    Clear,
    BeginPath,
    MoveTo(PixelPoint),
    LineTo(PixelPoint),
    QuadTo { ctrl: PixelPoint, end: PixelPoint },
    Stroke(StrokeStyle),
    FillTriangle {
        a: PixelPoint,
        b: PixelPoint,
        c: PixelPoint,
        style: FillStyle,
    },
    FillCircle {
        center: PixelPoint,
        radius: f32,
        style: FillStyle,
    },
}

/// Headless surface that records every call.
///
/// Backs tests and benchmarks, and doubles as a trace of exactly what a
/// frame painted.
#[derive(Debug, Clone)]
pub struct Recorder {
    size: SurfaceSize,
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new(size: SurfaceSize) -> Self {
        Self { size, ops: Vec::new() }
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for Recorder {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.ops.push(DrawOp::Resize(size));
    }

    fn set_backdrop(&mut self, _layout: &Layout) {
        self.ops.push(DrawOp::SetBackdrop);
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, p: PixelPoint) {
        self.ops.push(DrawOp::MoveTo(p));
    }

    fn line_to(&mut self, p: PixelPoint) {
        self.ops.push(DrawOp::LineTo(p));
    }

    fn quad_to(&mut self, ctrl: PixelPoint, end: PixelPoint) {
        self.ops.push(DrawOp::QuadTo { ctrl, end });
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        self.ops.push(DrawOp::Stroke(*style));
    }

    fn fill_triangle(&mut self, a: PixelPoint, b: PixelPoint, c: PixelPoint, style: &FillStyle) {
        self.ops.push(DrawOp::FillTriangle { a, b, c, style: *style });
    }

    fn fill_circle(&mut self, center: PixelPoint, radius: f32, style: &FillStyle) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            style: *style,
        });
    }
}
