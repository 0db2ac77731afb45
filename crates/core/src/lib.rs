//! Rendering and geometry core - pure, deterministic, and testable
//!
//! Everything needed to turn a state snapshot into draw calls, with **zero**
//! terminal, network, or I/O dependencies:
//!
//! - [`layout`]: logical grid (cell) space to pixel space mapping
//! - [`trail`]: trail cell sequences to pixel sequences, turn detection
//! - [`surface`]: the canvas-style drawing abstraction backends implement
//! - [`scene`]: one full frame (bikes, heads, trails, spawns) per snapshot
//! - [`controller`]: the tick-driven render loop state machine
//!
//! The core never blocks and never fails: malformed state is rejected at the
//! feed boundary before it gets here, and drawing onto an in-memory surface
//! has no error path. Every tick redraws the most recently known snapshot in
//! full; rendering cadence is decoupled from state-update cadence.

pub mod controller;
pub mod layout;
pub mod scene;
pub mod surface;
pub mod trail;

pub use tui_cycles_types as types;

pub use controller::{Controller, DashPolicy, StateSource};
pub use layout::{midpoint, Layout};
pub use scene::SceneDrawer;
pub use surface::{DrawOp, FillStyle, Recorder, StrokeStyle, Surface};
pub use trail::{trail_pixels, turned};
