//! tui-cycles (workspace facade crate).
//!
//! This package keeps a single `tui_cycles::{core,feed,term,types}` public
//! API while the implementation lives in dedicated crates under `crates/`.

pub use tui_cycles_core as core;
pub use tui_cycles_feed as feed;
pub use tui_cycles_term as term;
pub use tui_cycles_types as types;
