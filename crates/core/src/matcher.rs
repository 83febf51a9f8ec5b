//! Match detection - runs of 3+ identical tokens in rows and columns.
//!
//! A single pass over the grid checks, for every cell, whether it anchors a
//! run of three to the right or three downward. All implicated cells land in
//! a [`MatchSet`]; overlapping runs merge naturally via set semantics, so a
//! cell shared by an L-shaped pair of runs is counted once.

use tui_match3_types::{BOARD_WIDTH, CELL_COUNT, MATCH_RUN_LEN};

use crate::board::Board;

/// The set of cell indices implicated in one detection pass.
///
/// Fixed-size mask, no allocation; computed fresh per resolution round and
/// consumed immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    mask: [bool; CELL_COUNT],
    len: usize,
}

impl MatchSet {
    pub fn new() -> Self {
        Self {
            mask: [false; CELL_COUNT],
            len: 0,
        }
    }

    /// Insert an index; returns true if it was newly added.
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= CELL_COUNT || self.mask[index] {
            return false;
        }
        self.mask[index] = true;
        self.len += 1;
        true
    }

    pub fn contains(&self, index: usize) -> bool {
        index < CELL_COUNT && self.mask[index]
    }

    /// Number of distinct implicated cells.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate implicated indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, hit)| **hit)
            .map(|(i, _)| i)
    }
}

impl Default for MatchSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan the whole board for matches.
///
/// Every anchor of a horizontal or vertical run of [`MATCH_RUN_LEN`] adds
/// itself and the two following cells; maximal runs longer than 3 are covered
/// by their overlapping anchors. Read-only.
pub fn find_matches(board: &Board) -> MatchSet {
    let mut matched = MatchSet::new();

    for i in 0..CELL_COUNT {
        let Some(token) = board.token_at(i) else {
            continue;
        };

        // Horizontal run: anchor must not sit in the last two columns.
        if Board::col(i) + MATCH_RUN_LEN <= BOARD_WIDTH
            && board.token_at(i + 1) == Some(token)
            && board.token_at(i + 2) == Some(token)
        {
            matched.insert(i);
            matched.insert(i + 1);
            matched.insert(i + 2);
        }

        // Vertical run: anchor must not sit in the last two rows.
        if i < BOARD_WIDTH * (BOARD_WIDTH - 2)
            && board.token_at(i + BOARD_WIDTH) == Some(token)
            && board.token_at(i + 2 * BOARD_WIDTH) == Some(token)
        {
            matched.insert(i);
            matched.insert(i + BOARD_WIDTH);
            matched.insert(i + 2 * BOARD_WIDTH);
        }
    }

    matched
}

/// Localized probe: does `index` anchor a run of three rightward or downward?
///
/// This is the cheap check the generator uses while trial-swapping; it does
/// not look for runs that merely pass through `index`.
pub fn has_match_at(board: &Board, index: usize) -> bool {
    let Some(token) = board.token_at(index) else {
        return false;
    };

    if Board::col(index) + MATCH_RUN_LEN <= BOARD_WIDTH
        && board.token_at(index + 1) == Some(token)
        && board.token_at(index + 2) == Some(token)
    {
        return true;
    }

    index < BOARD_WIDTH * (BOARD_WIDTH - 2)
        && board.token_at(index + BOARD_WIDTH) == Some(token)
        && board.token_at(index + 2 * BOARD_WIDTH) == Some(token)
}
