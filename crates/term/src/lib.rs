//! Terminal backend for the spectator.
//!
//! Renders the pixel-space scene into a framebuffer of styled characters and
//! flushes it to a real terminal. One logical pixel covers two terminal
//! columns and one row to compensate for the usual glyph aspect ratio.

pub mod canvas;
pub mod fb;
pub mod renderer;

pub use tui_cycles_core as core;
pub use tui_cycles_types as types;

pub use canvas::{RasterCanvas, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer};
pub use renderer::TerminalRenderer;
