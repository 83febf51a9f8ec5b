//! Scoring rules.
//!
//! Each resolution round awards points proportional to the number of cells
//! cleared: 30 points per three cells, i.e. 10 points per cell. An L-shaped
//! overlap that clears five cells scores 50.

use tui_match3_types::{MATCH_RUN_LEN, RUN_POINTS};

/// Points for one resolution round that cleared `cells` cells.
pub fn round_points(cells: usize) -> u32 {
    (RUN_POINTS * cells as u32) / MATCH_RUN_LEN as u32
}
