//! Board module - manages the candy grid
//!
//! The board is an 8x8 grid where each cell holds a candy token or is empty.
//! Uses a flat array for better cache locality and zero-allocation.
//! Cells are addressed by flat index `i = row * width + col`, with row 0 at
//! the top; gravity settles tokens toward higher rows.
//! Empty cells (`None`) appear only transiently while a cascade is settling.

use tui_match3_types::{Cell, Token, BOARD_WIDTH, CELL_COUNT};

use crate::rng::TokenSource;

/// The game board - 8x8 candy cells using flat array storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * width + col).
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a new board with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// Create a board filled with tokens drawn from `source`.
    ///
    /// No validity checks; see [`crate::generator::generate`] for boards
    /// that satisfy the start-of-game constraints.
    pub fn random(source: &mut impl TokenSource) -> Self {
        let mut board = Self::empty();
        board.refill_all(source);
        board
    }

    /// Overwrite every cell with a fresh token from `source`.
    pub fn refill_all(&mut self, source: &mut impl TokenSource) {
        for cell in &mut self.cells {
            *cell = Some(source.next_token());
        }
    }

    /// Board width (the board is square).
    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    /// Calculate flat index from (col, row) coordinates.
    #[inline(always)]
    pub fn index(col: usize, row: usize) -> Option<usize> {
        if col >= BOARD_WIDTH || row >= BOARD_WIDTH {
            return None;
        }
        Some(row * BOARD_WIDTH + col)
    }

    /// Column of a flat index.
    #[inline(always)]
    pub fn col(index: usize) -> usize {
        index % BOARD_WIDTH
    }

    /// Row of a flat index.
    #[inline(always)]
    pub fn row(index: usize) -> usize {
        index / BOARD_WIDTH
    }

    /// Get the cell at a flat index. Returns `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Get the token at a flat index, if the index is in bounds and the cell
    /// holds one.
    pub fn token_at(&self, index: usize) -> Option<Token> {
        self.cells.get(index).copied().flatten()
    }

    /// Set the cell at a flat index. Returns false if out of bounds.
    pub fn set(&mut self, index: usize, cell: Cell) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange the contents of two cells. Out-of-bounds indices are a no-op.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < CELL_COUNT && b < CELL_COUNT {
            self.cells.swap(a, b);
        }
    }

    /// Whether any cell is empty.
    pub fn has_blanks(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_none())
    }

    /// Get a reference to the internal cells array.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Create from per-row cell vectors.
    ///
    /// Intended for tests and fixtures; panics on wrong dimensions.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert_eq!(rows.len(), BOARD_WIDTH);
        assert!(rows.iter().all(|row| row.len() == BOARD_WIDTH));

        let mut cells = [None; CELL_COUNT];
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                cells[r * BOARD_WIDTH + c] = *cell;
            }
        }
        Self { cells }
    }

    /// Convert to per-row cell vectors (for tests/display).
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        (0..BOARD_WIDTH)
            .map(|r| {
                let start = r * BOARD_WIDTH;
                self.cells[start..start + BOARD_WIDTH].to_vec()
            })
            .collect()
    }
}
