//! Read-only session snapshots for render and observation layers.
//!
//! A snapshot is a plain-data copy of everything a frame needs, taken once
//! per tick with [`snapshot_into`] so the renderer never borrows live game
//! state. Board cells are flattened to small integer codes.

use tui_match3_types::{Grade, Token, CELL_COUNT, SESSION_SECONDS};

use crate::board::Board;
use crate::session::GameSession;

/// Cell code for an empty cell; tokens use `1..=6`.
pub const EMPTY_CODE: u8 = 0;

/// Code for a cell value.
pub fn token_code(cell: Option<Token>) -> u8 {
    match cell {
        None => EMPTY_CODE,
        Some(token) => {
            // Position in the palette, 1-based.
            Token::ALL.iter().position(|t| *t == token).unwrap_or(0) as u8 + 1
        }
    }
}

/// Inverse of [`token_code`]; unknown codes read as empty.
pub fn token_from_code(code: u8) -> Option<Token> {
    if code == EMPTY_CODE {
        return None;
    }
    Token::ALL.get(code as usize - 1).copied()
}

/// Plain-data view of one session at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Cell codes in flat row-major order.
    pub board: [u8; CELL_COUNT],
    pub score: u32,
    pub time_left: u32,
    pub started: bool,
    pub ended: bool,
    pub resolving: bool,
    pub cursor: usize,
    pub grabbed: bool,
    pub grade: Option<Grade>,
}

impl GameSnapshot {
    pub fn new() -> Self {
        Self {
            board: [EMPTY_CODE; CELL_COUNT],
            score: 0,
            time_left: SESSION_SECONDS,
            started: false,
            ended: false,
            resolving: false,
            cursor: 0,
            grabbed: false,
            grade: None,
        }
    }

    /// Token at a flat index, decoded.
    pub fn token_at(&self, index: usize) -> Option<Token> {
        self.board.get(index).copied().and_then(token_from_code)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy the session's visible state into `out`, reusing its storage.
pub fn snapshot_into(session: &GameSession, out: &mut GameSnapshot) {
    encode_board(session.board(), &mut out.board);
    out.score = session.score();
    out.time_left = session.time_left();
    out.started = session.started();
    out.ended = session.ended();
    out.resolving = session.is_resolving();
    out.cursor = session.cursor();
    out.grabbed = session.grabbed();
    out.grade = session.grade();
}

fn encode_board(board: &Board, out: &mut [u8; CELL_COUNT]) {
    for (code, cell) in out.iter_mut().zip(board.cells().iter()) {
        *code = token_code(*cell);
    }
}
