//! Board generation - solvable starting boards.
//!
//! A starting board must satisfy two constraints: no pre-existing match, and
//! at least one adjacent swap that would create a match. Generation is
//! rejection sampling: fill uniformly at random, test, retry up to
//! [`MAX_BOARD_ATTEMPTS`]. Exhaustion is a defined end-of-session condition
//! for the caller, not an error.

use tui_match3_types::{BOARD_WIDTH, CELL_COUNT, MAX_BOARD_ATTEMPTS};

use crate::board::Board;
use crate::matcher::{find_matches, has_match_at};
use crate::moves::neighbors;
use crate::rng::TokenSource;

/// Produce a board with no pre-existing match and at least one legal move.
///
/// Returns `None` if no candidate satisfied both conditions within the
/// attempt cap.
pub fn generate(source: &mut impl TokenSource) -> Option<Board> {
    for _ in 0..MAX_BOARD_ATTEMPTS {
        let mut board = Board::random(source);
        if find_matches(&board).is_empty() && has_possible_move(&mut board) {
            return Some(board);
        }
    }
    None
}

/// Whether any adjacent swap would create a match.
///
/// Trial-swaps every cell with each orthogonal neighbor, probes both ends,
/// and swaps back; takes `&mut` for the trials but the board is unchanged on
/// return.
pub fn has_possible_move(board: &mut Board) -> bool {
    for i in 0..CELL_COUNT {
        for j in neighbors(i, BOARD_WIDTH) {
            board.swap(i, j);
            let found = has_match_at(board, i) || has_match_at(board, j);
            board.swap(i, j);
            if found {
                return true;
            }
        }
    }
    false
}
