//! Move validation - which cell pairs are legal swap candidates.
//!
//! Adjacency is purely positional: a swap candidate must be one of the up to
//! four orthogonal neighbors, and horizontal neighbors must share a row.
//! Index 7 and index 8 differ by one but sit on different rows of an 8-wide
//! grid, so they are NOT adjacent.

use arrayvec::ArrayVec;

/// Whether `a` and `b` are orthogonally adjacent cells of a `width`-wide
/// square grid (a legal swap candidate pair).
pub fn is_adjacent_swap(a: usize, b: usize, width: usize) -> bool {
    let cells = width * width;
    if a >= cells || b >= cells {
        return false;
    }

    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    match hi - lo {
        // Horizontal: must not wrap across a row boundary.
        1 => lo / width == hi / width,
        // Vertical.
        d => d == width,
    }
}

/// The orthogonal neighbors of `index`, honoring grid edges and excluding
/// row-wraparound "neighbors".
pub fn neighbors(index: usize, width: usize) -> ArrayVec<usize, 4> {
    let mut out = ArrayVec::new();
    let cells = width * width;
    if index >= cells {
        return out;
    }

    let col = index % width;
    if col > 0 {
        out.push(index - 1);
    }
    if col + 1 < width {
        out.push(index + 1);
    }
    if index >= width {
        out.push(index - width);
    }
    if index + width < cells {
        out.push(index + width);
    }
    out
}
