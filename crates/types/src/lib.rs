//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making
//! them usable in any context (core logic, input mapping, terminal rendering).
//!
//! # Board Dimensions
//!
//! The board is a fixed square grid:
//!
//! - **Width**: 8 columns and 8 rows (indexed 0-7)
//! - **Cells**: 64, addressed by flat index `i = row * 8 + col`
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds unless noted:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `STAGE_MS` | 300 | Delay between cascade stages (blast / settle) |
//! | `SESSION_SECONDS` | 60 | Session length, 1-second timer granularity |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Token, Direction, BOARD_WIDTH, CELL_COUNT};
//!
//! let token = Token::Red;
//! let parsed = Token::from_str("red").unwrap();
//! assert_eq!(token, parsed);
//!
//! assert_eq!(Direction::Left.delta(), (-1, 0));
//! assert_eq!(BOARD_WIDTH, 8);
//! assert_eq!(CELL_COUNT, 64);
//! ```

/// Board width (and height) in cells; the board is square.
pub const BOARD_WIDTH: usize = 8;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = BOARD_WIDTH * BOARD_WIDTH;

/// Number of token kinds in the palette.
pub const TOKEN_COUNT: usize = 6;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Delay between cascade stages (blast, then settle) in milliseconds.
pub const STAGE_MS: u32 = 300;

/// Session length in seconds; the timer ticks at 1-second granularity.
pub const SESSION_SECONDS: u32 = 60;

/// Maximum number of cascade rounds per resolution before the board is
/// accepted as-is. A termination safeguard, not a normal exit path.
pub const MAX_CASCADE_ROUNDS: u32 = 100;

/// Maximum number of random fills the board generator tries before giving up.
pub const MAX_BOARD_ATTEMPTS: u32 = 100;

/// Minimum run length that counts as a match.
pub const MATCH_RUN_LEN: usize = 3;

/// Points awarded per full run of [`MATCH_RUN_LEN`] matched cells.
pub const RUN_POINTS: u32 = 30;

/// Pointer displacement (in gesture units) a swipe must exceed to register.
pub const SWIPE_MIN_DISTANCE: i32 = 10;

/// Gesture units per board cell of pointer travel. Terminals have no pixel
/// coordinates, so cell-sized travel must clear [`SWIPE_MIN_DISTANCE`].
pub const GESTURE_UNITS_PER_CELL: i32 = 16;

/// Candy token kinds (the fixed palette).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Red,
    Yellow,
    Blue,
    Green,
    Purple,
    Orange,
}

impl Token {
    /// Every palette token, in a fixed order.
    pub const ALL: [Token; TOKEN_COUNT] = [
        Token::Red,
        Token::Yellow,
        Token::Blue,
        Token::Green,
        Token::Purple,
        Token::Orange,
    ];

    /// Parse a token from a string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Token::Red),
            "yellow" => Some(Token::Yellow),
            "blue" => Some(Token::Blue),
            "green" => Some(Token::Green),
            "purple" => Some(Token::Purple),
            "orange" => Some(Token::Orange),
            _ => None,
        }
    }

    /// Convert to a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Token::Red => "red",
            Token::Yellow => "yellow",
            Token::Blue => "blue",
            Token::Green => "green",
            Token::Purple => "purple",
            Token::Orange => "orange",
        }
    }
}

/// Cell on the board (`None` = empty, `Some` = holds a token).
///
/// Empty cells exist only transiently while a resolution is settling.
pub type Cell = Option<Token>;

/// Orthogonal direction on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Column/row delta for this direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A proposed exchange of two cells' tokens, identified by flat index.
///
/// Produced by input interpretation, consumed by the session within one
/// interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRequest {
    pub source: usize,
    pub target: usize,
}

impl SwapRequest {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }
}

/// Game actions (keyboard play surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start the session (no-op if already started).
    Start,
    /// Move the keyboard cursor one cell.
    MoveCursor(Direction),
    /// Pick up the cell under the cursor, or drop onto it if one is held.
    Grab,
    /// Swap the cell under the cursor with its neighbor in a direction.
    SwapToward(Direction),
    /// Discard the session and reinitialize.
    Restart,
}

/// End-of-session grade, from the cumulative score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    Good,
    Okay,
    Poor,
}

impl Grade {
    /// Grade thresholds: Excellent ≥ 500, Good ≥ 300, Okay ≥ 100.
    pub fn for_score(score: u32) -> Self {
        if score >= 500 {
            Grade::Excellent
        } else if score >= 300 {
            Grade::Good
        } else if score >= 100 {
            Grade::Okay
        } else {
            Grade::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent!",
            Grade::Good => "Good!",
            Grade::Okay => "Okay!",
            Grade::Poor => "Poor!",
        }
    }
}

/// Notifications emitted by the core for external collaborators.
///
/// Each event is emitted exactly once per occurrence, in order. The render
/// collaborator consumes the per-cell events, the audio collaborator the
/// per-round `MatchRound`, and the score display every `ScoreChanged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A cell was implicated in a match this round and has been cleared.
    CellMatched { index: usize },
    /// A cell's value changed during gravity/refill.
    CellRefilled { index: usize, token: Token },
    /// Matches were found this resolution round (`cells` implicated total).
    MatchRound { cells: usize },
    /// The cumulative score changed.
    ScoreChanged { total: u32 },
    /// The session ended; the board is frozen.
    SessionEnded { score: u32, grade: Grade },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip() {
        for token in Token::ALL {
            assert_eq!(Token::from_str(token.as_str()), Some(token));
        }
        assert_eq!(Token::from_str("RED"), Some(Token::Red));
        assert_eq!(Token::from_str("candy"), None);
    }

    #[test]
    fn palette_has_no_duplicates() {
        for (i, a) in Token::ALL.iter().enumerate() {
            for b in &Token::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn direction_deltas() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn grade_thresholds() {
        assert_eq!(Grade::for_score(0), Grade::Poor);
        assert_eq!(Grade::for_score(99), Grade::Poor);
        assert_eq!(Grade::for_score(100), Grade::Okay);
        assert_eq!(Grade::for_score(300), Grade::Good);
        assert_eq!(Grade::for_score(499), Grade::Good);
        assert_eq!(Grade::for_score(500), Grade::Excellent);
    }

    #[test]
    fn cell_size_is_one_byte_niche() {
        // Option<Token> packs into a single byte; the board stays 64 bytes.
        assert_eq!(std::mem::size_of::<Cell>(), 1);
    }
}
