//! TUI match-3 (workspace facade crate).
//!
//! This package keeps the `tui_match3::{core,term,input,types}` public API
//! stable while the implementation lives in dedicated crates under `crates/`.

pub use tui_match3_core as core;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
