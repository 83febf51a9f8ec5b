//! RNG module - seedable token generation
//!
//! Randomness is a pure dependency of the core: the board generator and the
//! cascade refill both draw through the [`TokenSource`] trait, so tests can
//! substitute a scripted sequence and get fully deterministic cascades.
//!
//! The default source is a simple LCG, uniform over the palette.

use tui_match3_types::{Token, TOKEN_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Current internal state (for deriving restart seeds).
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Source of candy tokens for board fills and column refills.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// The default token source: uniform random draw over the palette.
#[derive(Debug, Clone)]
pub struct TokenRng {
    rng: SimpleRng,
}

impl TokenRng {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Current RNG state (for restarting with a fresh, derived seed).
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl TokenSource for TokenRng {
    fn next_token(&mut self) -> Token {
        let i = self.rng.next_range(TOKEN_COUNT as u32) as usize;
        Token::ALL[i]
    }
}

/// A scripted token source for deterministic tests and fixtures.
///
/// Yields the given sequence; [`ScriptedTokens::cycling`] repeats it forever,
/// the plain constructor panics when the script runs dry (so a test that
/// consumes more tokens than it budgeted fails loudly).
#[derive(Debug, Clone)]
pub struct ScriptedTokens {
    script: Vec<Token>,
    cursor: usize,
    cycle: bool,
}

impl ScriptedTokens {
    pub fn new(script: &[Token]) -> Self {
        Self {
            script: script.to_vec(),
            cursor: 0,
            cycle: false,
        }
    }

    pub fn cycling(script: &[Token]) -> Self {
        Self {
            script: script.to_vec(),
            cursor: 0,
            cycle: true,
        }
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl TokenSource for ScriptedTokens {
    fn next_token(&mut self) -> Token {
        let len = self.script.len();
        assert!(len > 0, "empty token script");
        if !self.cycle {
            assert!(self.cursor < len, "token script exhausted at {}", self.cursor);
        }
        let token = self.script[self.cursor % len];
        self.cursor += 1;
        token
    }
}
