//! The "42" glyph drawn with permanently closed cells

use std::collections::BTreeSet;

use crate::error::GridError;
use crate::maze::{CellKind, Grid, Position};

/// Cells reserved for the glyph, ordered row-major.
pub type PatternMask = BTreeSet<Position>;

/// Height of the glyph outline in strokes.
pub const GLYPH_ROWS: u16 = 5;
/// Width of the glyph outline in strokes.
pub const GLYPH_COLS: u16 = 7;
/// Free cells required between the glyph and each edge of the grid.
const MARGIN: u16 = 2;
/// The glyph never takes more than roughly this fraction of either dimension (as 1/n).
const MAX_COVERAGE_DIVISOR: u16 = 3;

/// Closed strokes of the outline as (row, col) offsets.
///
/// ```text
/// #.#.###
/// #.#...#
/// ###.###
/// ..#.#..
/// ..#.###
/// ```
const STROKES: [(u16, u16); 20] = [
    // "4"
    (0, 0),
    (1, 0),
    (2, 0),
    (2, 1),
    (2, 2),
    (0, 2),
    (1, 2),
    (3, 2),
    (4, 2),
    // "2"
    (0, 4),
    (0, 5),
    (0, 6),
    (1, 6),
    (2, 4),
    (2, 5),
    (2, 6),
    (3, 4),
    (4, 4),
    (4, 5),
    (4, 6),
];

/// Integer scale applied to each stroke so the glyph grows with the grid.
pub fn glyph_scale(rows: u16, cols: u16) -> u16 {
    let by_rows = rows.saturating_sub(2 * MARGIN) / (GLYPH_ROWS * MAX_COVERAGE_DIVISOR);
    let by_cols = cols.saturating_sub(2 * MARGIN) / (GLYPH_COLS * MAX_COVERAGE_DIVISOR);
    by_rows.min(by_cols).max(1)
}

/// Whether a `rows` x `cols` grid is large enough to hold the glyph with its margin.
pub fn fits(rows: u16, cols: u16) -> bool {
    let scale = glyph_scale(rows, cols);
    u32::from(rows) >= u32::from(GLYPH_ROWS * scale + 2 * MARGIN)
        && u32::from(cols) >= u32::from(GLYPH_COLS * scale + 2 * MARGIN)
}

/// Computes the glyph cells for a grid of the given size, centered.
///
/// Pure function of the dimensions. Returns an empty mask when the grid is too small.
pub fn compute_pattern_mask(rows: u16, cols: u16) -> PatternMask {
    if !fits(rows, cols) {
        return PatternMask::new();
    }
    let scale = glyph_scale(rows, cols);
    let top = (rows - GLYPH_ROWS * scale) / 2;
    let left = (cols - GLYPH_COLS * scale) / 2;

    STROKES
        .iter()
        .flat_map(|&(dr, dc)| {
            (0..scale).flat_map(move |i| {
                (0..scale).map(move |j| Position::new(top + dr * scale + i, left + dc * scale + j))
            })
        })
        .collect()
}

/// Reserves the glyph cells in `grid`, leaving `entry` and `exit` untouched.
///
/// Must run before any wall is opened. Returns the mask that was actually applied.
pub(crate) fn embed_pattern(
    grid: &mut Grid,
    entry: Position,
    exit: Position,
) -> Result<PatternMask, GridError> {
    let mut mask = compute_pattern_mask(grid.rows(), grid.cols());
    if mask.is_empty() {
        tracing::warn!(
            "[pattern] Maze {}x{} is too small to display the 42 pattern, skipping",
            grid.rows(),
            grid.cols()
        );
        return Ok(mask);
    }

    for endpoint in [entry, exit] {
        if mask.remove(&endpoint) {
            tracing::debug!("[pattern] Dropping glyph cell {} for endpoint", endpoint);
        }
    }
    for &pos in &mask {
        grid.set_kind(pos, CellKind::Reserved)?;
    }
    tracing::debug!("[pattern] Reserved {} cells", mask.len());
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_small_grid_has_no_pattern() {
        assert!(compute_pattern_mask(4, 4).is_empty());
        assert!(compute_pattern_mask(8, 20).is_empty());
        assert!(compute_pattern_mask(20, 10).is_empty());
    }

    #[test]
    fn test_minimum_grid_fits_unscaled_glyph() {
        let mask = compute_pattern_mask(9, 11);
        assert_eq!(mask.len(), STROKES.len());
        // Centered with a two-cell margin
        assert!(mask.contains(&Position::new(2, 2)));
        assert!(mask.contains(&Position::new(6, 8)));
        assert!(mask.iter().all(|p| p.row >= 2 && p.row <= 6));
        assert!(mask.iter().all(|p| p.col >= 2 && p.col <= 8));
    }

    #[test]
    fn test_mask_is_deterministic() {
        assert_eq!(compute_pattern_mask(10, 20), compute_pattern_mask(10, 20));
        assert_eq!(compute_pattern_mask(73, 91), compute_pattern_mask(73, 91));
    }

    #[test]
    fn test_scaled_glyph() {
        assert_eq!(glyph_scale(10, 20), 1);
        assert_eq!(glyph_scale(49, 67), 3);
        let mask = compute_pattern_mask(49, 67);
        assert_eq!(mask.len(), STROKES.len() * 9);
        assert!(mask.iter().all(|p| p.row >= MARGIN && p.row < 49 - MARGIN));
        assert!(mask.iter().all(|p| p.col >= MARGIN && p.col < 67 - MARGIN));
    }

    #[test]
    fn test_embed_drops_endpoints() {
        let mask = compute_pattern_mask(9, 11);
        let entry = *mask.first().unwrap();
        let exit = Position::new(8, 10);

        let mut grid = Grid::new(9, 11).unwrap();
        let applied = embed_pattern(&mut grid, entry, exit).unwrap();
        assert_eq!(applied.len(), mask.len() - 1);
        assert!(!applied.contains(&entry));
        assert!(!grid[entry].is_reserved());
        assert_eq!(grid.reserved_count(), applied.len());
        assert!(applied.iter().all(|&p| grid[p].is_reserved()));
    }

    #[test]
    fn test_embed_skips_small_grid() {
        let mut grid = Grid::new(4, 4).unwrap();
        let applied =
            embed_pattern(&mut grid, Position::new(0, 0), Position::new(3, 3)).unwrap();
        assert!(applied.is_empty());
        assert_eq!(grid.reserved_count(), 0);
    }
}
