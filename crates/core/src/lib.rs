//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the match-3 rules and state management. It has
//! **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Token sources are pluggable, so every cascade is scriptable
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 8x8 flat-array grid of candy tokens
//! - [`matcher`]: run-of-3 match detection over rows and columns
//! - [`moves`]: adjacency rules for legal swaps (no row wraparound)
//! - [`generator`]: retry-capped construction of solvable starting boards
//! - [`cascade`]: the staged blast / settle resolution loop
//! - [`scoring`]: points per resolution round
//! - [`session`]: game session lifecycle, input application, event queue
//! - [`rng`]: seedable LCG and the pluggable [`rng::TokenSource`] seam
//!
//! # Game Rules
//!
//! - A match is a horizontal or vertical run of 3+ identical tokens.
//! - Swaps must be orthogonally adjacent; an accepted swap commits even when
//!   it creates no match (its resolution simply finds nothing).
//! - Resolution repeats {blast matched cells, settle columns with fresh
//!   tokens} until the board is stable, capped at 100 rounds.
//! - Each round scores 30 points per 3 implicated cells (overlapping runs
//!   share cells but still count each implicated cell once).
//!
//! # Example
//!
//! ```
//! use tui_match3_core::GameSession;
//! use tui_match3_types::TICK_MS;
//!
//! let mut session = GameSession::new(12345);
//! session.start();
//! assert!(session.started());
//! assert_eq!(session.score(), 0);
//!
//! // Drive the fixed timestep; cascade stages advance on a 300ms cadence.
//! session.tick(TICK_MS);
//! ```

pub mod board;
pub mod cascade;
pub mod generator;
pub mod matcher;
pub mod moves;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tui_match3_types as types;

pub use board::Board;
pub use cascade::{CascadeResolver, StepResult};
pub use generator::{generate, has_possible_move};
pub use matcher::{find_matches, has_match_at, MatchSet};
pub use moves::{is_adjacent_swap, neighbors};
pub use rng::{ScriptedTokens, SimpleRng, TokenRng, TokenSource};
pub use scoring::round_points;
pub use session::GameSession;
pub use snapshot::{snapshot_into, GameSnapshot};
