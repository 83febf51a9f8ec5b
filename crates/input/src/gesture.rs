//! Drag and swipe interpretation for pointer input.
//!
//! A gesture is a press on a board cell followed by a release. A release
//! over a different cell is a drag: the request targets the released cell
//! as-is, and the session decides whether the pair is adjacent. A release
//! on the press cell (or off the board) is read as a swipe: the
//! displacement between press and release, measured in gesture units,
//! selects the neighbor to swap with. Unless it exceeds the minimum
//! distance on some axis nothing happens, otherwise the dominant axis wins
//! (ties go vertical) and the sign picks the neighbor.
//!
//! Coordinates here are abstract gesture units, not terminal cells; the
//! render layer scales screen positions so that one cell of travel clears
//! the minimum distance.

use crate::types::{SwapRequest, SWIPE_MIN_DISTANCE};

/// The swap target selected by a swipe of `(dx, dy)` starting on `origin`.
///
/// Returns `None` for sub-threshold movement or a swipe off the edge of the
/// `width`-wide grid.
pub fn swipe_target(origin: usize, dx: i32, dy: i32, width: usize) -> Option<usize> {
    if origin >= width * width {
        return None;
    }
    if dx.abs().max(dy.abs()) <= SWIPE_MIN_DISTANCE {
        return None;
    }

    let col = origin % width;
    let row = origin / width;
    if dx.abs() > dy.abs() {
        if dx > 0 {
            (col + 1 < width).then(|| origin + 1)
        } else {
            (col > 0).then(|| origin - 1)
        }
    } else if dy > 0 {
        (row + 1 < width).then(|| origin + width)
    } else {
        (row > 0).then(|| origin - width)
    }
}

/// Tracks one press/release pair and turns it into a [`SwapRequest`].
///
/// The driver feeds it the pressed cell plus press and release positions in
/// gesture units. Presses outside the board never start a gesture.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    pressed: Option<Press>,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    cell: usize,
    x: i32,
    y: i32,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self { pressed: None }
    }

    /// Begin a gesture on `cell` at position `(x, y)`.
    pub fn press(&mut self, cell: usize, x: i32, y: i32) {
        self.pressed = Some(Press { cell, x, y });
    }

    /// Whether a press is waiting for its release.
    pub fn is_tracking(&self) -> bool {
        self.pressed.is_some()
    }

    /// Drop the current gesture without producing a swap.
    pub fn cancel(&mut self) {
        self.pressed = None;
    }

    /// Finish the gesture at position `(x, y)`, released over `cell`.
    ///
    /// A release over a different cell requests a swap with that cell,
    /// whatever the distance; adjacency is for the session to judge. A
    /// release on the press cell or off the board falls back to swipe
    /// interpretation. The tracker is reset either way.
    pub fn release(
        &mut self,
        cell: Option<usize>,
        x: i32,
        y: i32,
        width: usize,
    ) -> Option<SwapRequest> {
        let press = self.pressed.take()?;
        match cell {
            Some(target) if target != press.cell => Some(SwapRequest::new(press.cell, target)),
            _ => {
                let target = swipe_target(press.cell, x - press.x, y - press.y, width)?;
                Some(SwapRequest::new(press.cell, target))
            }
        }
    }
}
