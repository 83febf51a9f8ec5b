//! Cascade resolution - the staged blast / settle loop.
//!
//! Resolving a board after a legal swap repeats rounds of:
//!
//! 1. **Blast**: detect matches, clear every implicated cell, award points.
//! 2. **Settle**: per-column gravity; surviving tokens keep their relative
//!    order and compact toward the bottom, fresh tokens refill from the top.
//!
//! The resolver is an explicit state machine advanced one stage per
//! [`CascadeResolver::step`] call. The driver owns the cadence (the session
//! steps it from its stage timer), which guarantees round N+1 cannot begin
//! before round N's blast and settle have both completed. A hard round cap
//! guarantees termination even on adversarial boards.

use tui_match3_types::{GameEvent, BOARD_WIDTH, MAX_CASCADE_ROUNDS};

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::matcher::find_matches;
use crate::rng::TokenSource;
use crate::scoring::round_points;

/// Which stage the resolver performs on its next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Blast,
    Settle,
}

/// Outcome of one resolver step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Points earned by this step (non-zero only for blast stages).
    pub points: u32,
    /// True when the resolution has reached a stable board (or the cap).
    pub done: bool,
}

/// Staged cascade resolver. One live resolution at a time.
#[derive(Debug, Clone)]
pub struct CascadeResolver {
    phase: Phase,
    rounds: u32,
    total_points: u32,
    round_matched: bool,
}

impl CascadeResolver {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            rounds: 0,
            total_points: 0,
            round_matched: false,
        }
    }

    /// Whether a resolution is in flight.
    pub fn is_resolving(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Points accumulated across all rounds of the current/last resolution.
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Begin a new resolution. Any previous state is discarded.
    pub fn begin(&mut self) {
        self.phase = Phase::Blast;
        self.rounds = 0;
        self.total_points = 0;
        self.round_matched = false;
    }

    /// Abandon the current resolution (session end mid-cascade).
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Advance one stage. Call [`CascadeResolver::begin`] first.
    ///
    /// Events are appended in emission order: one `CellMatched` per cleared
    /// cell and one `MatchRound` per round with matches, one `CellRefilled`
    /// per cell changed by gravity/refill.
    pub fn step(
        &mut self,
        board: &mut Board,
        source: &mut impl TokenSource,
        events: &mut Vec<GameEvent>,
    ) -> StepResult {
        match self.phase {
            Phase::Idle => StepResult {
                points: 0,
                done: true,
            },
            Phase::Blast => {
                let matched = find_matches(board);
                let mut points = 0;
                if !matched.is_empty() {
                    for index in matched.iter() {
                        board.set(index, None);
                        events.push(GameEvent::CellMatched { index });
                    }
                    events.push(GameEvent::MatchRound {
                        cells: matched.len(),
                    });
                    points = round_points(matched.len());
                    self.total_points += points;
                }
                self.round_matched = !matched.is_empty();
                self.phase = Phase::Settle;
                StepResult {
                    points,
                    done: false,
                }
            }
            Phase::Settle => {
                let moved = settle_columns(board, source, events);

                // Refill leaves no blanks; the blank check keeps the loop
                // going if a settle ever falls short.
                let changed = self.round_matched || moved || board.has_blanks();
                if changed && self.rounds < MAX_CASCADE_ROUNDS {
                    self.rounds += 1;
                    self.phase = Phase::Blast;
                    StepResult {
                        points: 0,
                        done: false,
                    }
                } else {
                    self.phase = Phase::Idle;
                    StepResult {
                        points: 0,
                        done: true,
                    }
                }
            }
        }
    }

    /// Run a full resolution synchronously and return the points earned.
    ///
    /// For tests, benches, and headless use; gameplay drives `step` on the
    /// stage cadence instead.
    pub fn resolve_now(board: &mut Board, source: &mut impl TokenSource) -> u32 {
        let mut resolver = CascadeResolver::new();
        let mut events = Vec::new();
        resolver.begin();
        loop {
            let result = resolver.step(board, source, &mut events);
            if result.done {
                return resolver.total_points();
            }
        }
    }
}

impl Default for CascadeResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply gravity and refill to every column.
///
/// Within a column, token-holding cells keep their relative order and
/// compact to the bottom; the vacancy above is filled with fresh tokens.
/// Emits `CellRefilled` for each cell whose value changed and returns
/// whether anything changed.
fn settle_columns(
    board: &mut Board,
    source: &mut impl TokenSource,
    events: &mut Vec<GameEvent>,
) -> bool {
    let mut moved = false;

    for col in 0..BOARD_WIDTH {
        // Survivors, top to bottom.
        let mut survivors: ArrayVec<_, BOARD_WIDTH> = ArrayVec::new();
        for row in 0..BOARD_WIDTH {
            if let Some(token) = board.token_at(row * BOARD_WIDTH + col) {
                survivors.push(token);
            }
        }

        let missing = BOARD_WIDTH - survivors.len();
        let mut settled: ArrayVec<_, BOARD_WIDTH> = ArrayVec::new();
        for _ in 0..missing {
            settled.push(source.next_token());
        }
        settled.extend(survivors);

        for (row, token) in settled.into_iter().enumerate() {
            let index = row * BOARD_WIDTH + col;
            if board.token_at(index) != Some(token) {
                board.set(index, Some(token));
                events.push(GameEvent::CellRefilled { index, token });
                moved = true;
            }
        }
    }

    moved
}
