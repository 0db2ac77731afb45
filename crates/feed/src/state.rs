//! Shared grid state: the injected holder both the feed (writer) and the
//! render loop (reader) are handed.
//!
//! Replacement is an atomic reference swap under a short-lived lock; readers
//! get `Arc`s to complete values and can never observe a snapshot mid-update.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use tui_cycles_core::StateSource;
use tui_cycles_types::{Player, Snapshot};

use crate::payload::{FeedMessage, PlayerPayload};

#[derive(Debug, Default)]
struct Inner {
    snapshot: Option<Arc<Snapshot>>,
    players: Arc<Vec<Player>>,
}

/// Cloneable handle to the latest snapshot and roster.
#[derive(Debug, Clone, Default)]
pub struct SharedGridState {
    inner: Arc<Mutex<Inner>>,
}

impl SharedGridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_snapshot(&self, snapshot: Snapshot) {
        self.lock().snapshot = Some(Arc::new(snapshot));
    }

    pub fn set_players(&self, players: Vec<Player>) {
        self.lock().players = Arc::new(players);
    }

    /// Apply one decoded feed message.
    pub fn apply(&self, message: FeedMessage) {
        match message {
            FeedMessage::Grid(grid) => self.set_snapshot(grid.into_snapshot()),
            FeedMessage::Players(players) => self.set_players(
                players
                    .players
                    .into_iter()
                    .map(PlayerPayload::into_player)
                    .collect(),
            ),
            FeedMessage::Ticker(tick) => {
                info!(fragger = ?tick.fragger, casulty = ?tick.casulty, "frag");
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a writer panicked between two complete
        // states; the stored values are still whole.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateSource for SharedGridState {
    fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.lock().snapshot.clone()
    }

    fn players(&self) -> Arc<Vec<Player>> {
        self.lock().players.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_cycles_types::GridCell;

    fn snapshot(cols: u32) -> Snapshot {
        Snapshot {
            cols,
            rows: 10,
            bikes: vec![],
            spawns: vec![GridCell::new(0, 0)],
        }
    }

    #[test]
    fn starts_empty() {
        let state = SharedGridState::new();
        assert!(state.snapshot().is_none());
        assert!(state.players().is_empty());
    }

    #[test]
    fn snapshot_replacement_is_wholesale() {
        let state = SharedGridState::new();
        state.set_snapshot(snapshot(10));

        // A reader holding the old Arc keeps a consistent old view.
        let before = state.snapshot().unwrap();
        state.set_snapshot(snapshot(20));
        let after = state.snapshot().unwrap();

        assert_eq!(before.cols, 10);
        assert_eq!(after.cols, 20);
    }

    #[test]
    fn handles_are_shared() {
        let state = SharedGridState::new();
        let other = state.clone();
        other.set_snapshot(snapshot(10));
        assert_eq!(state.snapshot().unwrap().cols, 10);
    }
}
