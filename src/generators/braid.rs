use rand::{Rng, seq::SliceRandom};

use crate::{
    error::GridError,
    generators::StepLog,
    maze::{Direction, Grid, Position},
};

/// Number of walls to remove out of `candidates` for the given fraction.
/// At least one wall goes as soon as the fraction is positive and a candidate exists.
fn removal_count(candidates: usize, fraction: f64) -> usize {
    if candidates == 0 || fraction <= 0.0 {
        return 0;
    }
    ((candidates as f64 * fraction).floor() as usize).clamp(1, candidates)
}

/// Turns a perfect maze into a braided one by removing a fraction of the remaining walls.
///
/// Only walls between two non-reserved cells are candidates, so the glyph stays intact. Removing
/// walls never disconnects anything. Returns the number of walls removed.
pub(super) fn braid(
    grid: &mut Grid,
    fraction: f64,
    rng: &mut impl Rng,
    steps: &mut StepLog,
) -> Result<usize, GridError> {
    let mut candidates = grid
        .positions()
        .flat_map(|pos| {
            [Direction::East, Direction::South]
                .into_iter()
                .filter_map(move |dir| pos.step(dir).map(|n| (pos, n)))
        })
        .filter(|&(a, b)| {
            grid.contains(b)
                && !grid[a].is_reserved()
                && !grid[b].is_reserved()
                && !grid.is_open(a, b)
        })
        .collect::<Vec<(Position, Position)>>();

    let count = removal_count(candidates.len(), fraction);
    candidates.shuffle(rng);
    for &(a, b) in &candidates[..count] {
        grid.open_wall(a, b)?;
        steps.record(a, b);
    }
    Ok(count)
}
