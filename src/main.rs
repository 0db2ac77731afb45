//! Terminal spectator runner (default binary).
//!
//! Starts the feed server, enters the alternate screen, and runs the fixed
//! tick loop. The renderer only ever reads state: all updates come in over
//! the feed and land in the shared holder as atomic swaps.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use tui_cycles::core::{Controller, DashPolicy};
use tui_cycles::feed::{Feed, SharedGridState};
use tui_cycles::term::{RasterCanvas, TerminalRenderer, Viewport};
use tui_cycles::types::TICK_MS;

fn main() -> Result<()> {
    init_tracing();

    let state = SharedGridState::new();
    let _feed = Feed::start_from_env(state.clone())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &state);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_tracing() {
    // Stderr stays off-screen while the alternate screen is active and is
    // readable after exit.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(term: &mut TerminalRenderer, state: &SharedGridState) -> Result<()> {
    // The surface size is fixed for the process lifetime.
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 40));
    let viewport = Viewport::new(w, h);
    let mut canvas = RasterCanvas::new(viewport.surface_size());
    let mut controller = Controller::new(viewport.surface_size(), dash_policy_from_env());

    let mut gate = TickGate::new(Duration::from_millis(TICK_MS as u64));

    loop {
        // Input arrival wakes the loop early; only the gate renders.
        if gate.due(Instant::now()) {
            controller.tick(&mut canvas, state);
            if let Err(err) = term.draw(canvas.frame()) {
                // Lose the frame, not the process.
                warn!(%err, "frame flush failed");
                term.invalidate();
            }
        }

        if event::poll(gate.timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && should_quit(key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Paces rendering at one frame per period, however often input events wake
/// the loop in between.
struct TickGate {
    period: Duration,
    last: Option<Instant>,
}

impl TickGate {
    fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// True when the next frame is due; arms the following period when it is.
    fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.period => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// How long input polling may block before the next frame is due.
    fn timeout(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self.period.saturating_sub(now.duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

/// Marching dashes are opt-in; the default keeps the phase static.
fn dash_policy_from_env() -> DashPolicy {
    match std::env::var("CYCLES_DASH_MARCH")
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
    {
        Some(px_per_tick) if px_per_tick > 0.0 => DashPolicy::Marching { px_per_tick },
        _ => DashPolicy::Static,
    }
}

fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
