use rand::Rng;

use crate::{
    error::GridError,
    generators::StepLog,
    maze::{Grid, Position},
};

/// Carves a spanning tree over every non-reserved cell reachable from `start`.
///
/// Depth-first with an explicit stack of carved cells.
pub(super) fn recursive_backtrack(
    grid: &mut Grid,
    start: Position,
    rng: &mut impl Rng,
    steps: &mut StepLog,
) -> Result<(), GridError> {
    let mut visited = vec![false; grid.cell_count()];
    visited[grid.ravel_index(start)] = true;

    // Initialize the stack with the starting point
    // The stack will keep only carved cells
    let mut stack = vec![start];

    while let Some(cell) = stack.pop() {
        let neighbors = grid
            .neighbors(cell)
            .filter(|&c| !visited[grid.ravel_index(c)] && !grid[c].is_reserved())
            .collect::<Vec<_>>();

        if !neighbors.is_empty() {
            let neighbor = neighbors[rng.random_range(0..neighbors.len())];
            grid.open_wall(cell, neighbor)?;
            visited[grid.ravel_index(neighbor)] = true;
            steps.record(cell, neighbor);

            // Put the cell back first so we can look at another neighbor of this cell later
            stack.push(cell);
            // Put the neighbor to carve the maze in that neighbor's direction
            stack.push(neighbor);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    use crate::maze::CellKind;

    #[test]
    fn test_visits_every_cell_once() {
        let mut grid = Grid::new(7, 9).unwrap();
        let mut steps = StepLog::default();
        let mut rng = StdRng::seed_from_u64(7);
        recursive_backtrack(&mut grid, Position::new(3, 4), &mut rng, &mut steps).unwrap();

        assert_eq!(steps.len(), 7 * 9 - 1);
        assert_eq!(grid.open_edge_count(), 7 * 9 - 1);
        // Every cell except the start is the target of exactly one step
        let mut targets = steps.iter().map(|s| s.to).collect::<Vec<_>>();
        targets.sort();
        targets.dedup();
        assert_eq!(targets.len(), 7 * 9 - 1);
        assert!(!targets.contains(&Position::new(3, 4)));
    }

    #[test]
    fn test_skips_reserved_cells() {
        let mut grid = Grid::new(4, 4).unwrap();
        let reserved = Position::new(1, 1);
        grid.set_kind(reserved, CellKind::Reserved).unwrap();
        let mut steps = StepLog::default();
        let mut rng = StdRng::seed_from_u64(1);
        recursive_backtrack(&mut grid, Position::new(0, 0), &mut rng, &mut steps).unwrap();

        assert_eq!(steps.len(), 16 - 1 - 1);
        assert!(grid[reserved].walls().is_closed());
        assert!(steps.iter().all(|s| s.from != reserved && s.to != reserved));
    }

    #[test]
    fn test_same_seed_same_log() {
        let carve = |seed| {
            let mut grid = Grid::new(6, 6).unwrap();
            let mut steps = StepLog::default();
            let mut rng = StdRng::seed_from_u64(seed);
            recursive_backtrack(&mut grid, Position::new(0, 0), &mut rng, &mut steps).unwrap();
            (grid, steps)
        };
        assert_eq!(carve(3), carve(3));
    }
}
