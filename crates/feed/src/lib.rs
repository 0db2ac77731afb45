//! Feed layer: everything between the wire and the renderer.
//!
//! The renderer core never sees this crate's wire formats; it reads finished
//! [`Snapshot`](tui_cycles_types::Snapshot)s and rosters through the shared
//! state holder, which both this layer (writer) and the render loop (reader)
//! receive by injection.

pub mod payload;
pub mod server;
pub mod state;

pub use payload::{BikePayload, FeedMessage, GridPayload, PlayerPayload};
pub use server::{Feed, FeedConfig};
pub use state::SharedGridState;
