//! Render loop controller: the tick-driven state machine that owns the
//! layout and turns "a tick happened" into "a frame was painted".
//!
//! Ticks come from an external fixed-interval source and never block on the
//! feed: every tick redraws the most recently known snapshot, so the same
//! snapshot may paint repeatedly and a superseded one may never paint at all.

use std::sync::Arc;

use tracing::{debug, info};

use tui_cycles_types::{Player, Snapshot, SurfaceSize};

use crate::layout::Layout;
use crate::scene::SceneDrawer;
use crate::surface::Surface;

/// Read access to the latest externally-maintained state.
///
/// Implementations must hand out complete values only; replacements are
/// atomic reference swaps, never partial in-place mutation.
pub trait StateSource {
    /// Latest known game state, absent before the first feed update.
    fn snapshot(&self) -> Option<Arc<Snapshot>>;
    /// Latest known player roster, possibly empty.
    fn players(&self) -> Arc<Vec<Player>>;
}

/// How the trail dash phase moves between ticks.
///
/// The observed upstream never advanced its phase, so `Static` is the
/// default; `Marching` animates the dashes along the trails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashPolicy {
    Static,
    Marching { px_per_tick: f32 },
}

impl DashPolicy {
    fn advance(&self, phase: f32) -> f32 {
        match *self {
            DashPolicy::Static => phase,
            DashPolicy::Marching { px_per_tick } => phase + px_per_tick,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Uninitialized,
    Running,
}

/// Owns the layout and drives the scene drawer once per tick.
#[derive(Debug)]
pub struct Controller {
    surface_size: SurfaceSize,
    drawer: SceneDrawer,
    policy: DashPolicy,
    state: LoopState,
    layout: Option<Layout>,
    grid_dims: Option<(u32, u32)>,
    dash_phase: f32,
}

impl Controller {
    pub fn new(surface_size: SurfaceSize, policy: DashPolicy) -> Self {
        Self {
            surface_size,
            drawer: SceneDrawer::default(),
            policy,
            state: LoopState::Uninitialized,
            layout: None,
            grid_dims: None,
            dash_phase: 0.0,
        }
    }

    /// The layout in effect, once the first snapshot has been seen.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Render one frame if possible. Idempotent and safe on every tick.
    ///
    /// Without a snapshot this does nothing: a normal transient condition
    /// before the first update, and a skipped (not fatal) draw afterwards.
    pub fn tick(&mut self, surface: &mut dyn Surface, state: &dyn StateSource) {
        let Some(snapshot) = state.snapshot() else {
            debug!("no snapshot yet, skipping draw");
            return;
        };

        let dims = (snapshot.cols, snapshot.rows);
        match self.state {
            LoopState::Uninitialized => {
                self.init_layout(surface, dims);
                self.state = LoopState::Running;
            }
            // The one permitted recomputation: the grid itself changed.
            LoopState::Running if self.grid_dims != Some(dims) => {
                self.init_layout(surface, dims);
            }
            LoopState::Running => {}
        }

        let Some(layout) = self.layout else { return };
        let players = state.players();
        self.drawer
            .draw(surface, &snapshot, &players, &layout, self.dash_phase);
        self.dash_phase = self.policy.advance(self.dash_phase);
    }

    fn init_layout(&mut self, surface: &mut dyn Surface, (cols, rows): (u32, u32)) {
        let layout = Layout::for_grid(self.surface_size, cols, rows);
        surface.resize(layout.surface_size());
        surface.set_backdrop(&layout);
        info!(cols, rows, step_x = layout.step_x, step_y = layout.step_y, "layout initialized");
        self.layout = Some(layout);
        self.grid_dims = Some((cols, rows));
    }
}
