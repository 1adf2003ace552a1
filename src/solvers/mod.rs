mod bfs;

use bfs::solve_bfs;

use crate::{
    error::SolveError,
    maze::{Direction, Grid, Position},
};

/// Ordered positions from entry to exit, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    positions: Vec<Position>,
}

impl Path {
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of positions on the path, endpoints included.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of moves, one less than the number of positions.
    pub fn moves(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// The path as compass letters, one per move, e.g. `"SSEEN"`.
    pub fn directions(&self) -> String {
        self.positions
            .windows(2)
            .filter_map(|pair| Direction::between(pair[0], pair[1]))
            .map(Direction::letter)
            .collect()
    }
}

/// Finds the shortest path from `entry` to `exit` through open walls.
///
/// Neighbors are explored in N, E, S, W order, so among equally short paths the result is always
/// the same for a given grid.
pub fn solve(grid: &Grid, entry: Position, exit: Position) -> Result<Path, SolveError> {
    for position in [entry, exit] {
        if !grid.contains(position) {
            return Err(SolveError::OutOfBounds { position });
        }
    }
    match solve_bfs(grid, entry, exit) {
        Some(positions) => {
            tracing::debug!("[solve] Found path of {} moves", positions.len() - 1);
            Ok(Path { positions })
        }
        None => {
            tracing::warn!("[solve] No path found from {} to {}", entry, exit);
            Err(SolveError::NoPath { entry, exit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x3 grid with a single corridor: (0,0) -> (0,1) -> (0,2) -> (1,2) -> (1,1) -> (1,0)
    fn corridor() -> Grid {
        let mut grid = Grid::new(2, 3).unwrap();
        let cells = [(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0)].map(|(r, c)| Position::new(r, c));
        for pair in cells.windows(2) {
            grid.open_wall(pair[0], pair[1]).unwrap();
        }
        grid
    }

    #[test]
    fn test_solve_corridor() {
        let grid = corridor();
        let path = solve(&grid, Position::new(0, 0), Position::new(1, 0)).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.moves(), 5);
        assert_eq!(path.directions(), "EESWW");
        assert_eq!(path.positions().first(), Some(&Position::new(0, 0)));
        assert_eq!(path.positions().last(), Some(&Position::new(1, 0)));
    }

    #[test]
    fn test_solve_same_endpoint() {
        let grid = corridor();
        let path = solve(&grid, Position::new(1, 1), Position::new(1, 1)).unwrap();
        assert_eq!(path.positions(), &[Position::new(1, 1)]);
        assert_eq!(path.directions(), "");
    }

    #[test]
    fn test_solve_no_path() {
        let grid = Grid::new(3, 3).unwrap();
        let (entry, exit) = (Position::new(0, 0), Position::new(2, 2));
        assert_eq!(
            solve(&grid, entry, exit),
            Err(SolveError::NoPath { entry, exit })
        );
    }

    #[test]
    fn test_solve_out_of_bounds() {
        let grid = corridor();
        let outside = Position::new(2, 0);
        assert_eq!(
            solve(&grid, Position::new(0, 0), outside),
            Err(SolveError::OutOfBounds { position: outside })
        );
    }

    #[test]
    fn test_solve_prefers_exploration_order_on_ties() {
        // Fully open 2x2: both (0,0)->(0,1)->(1,1) and (0,0)->(1,0)->(1,1) are shortest.
        // East is explored before South, so the path goes east first.
        let mut grid = Grid::new(2, 2).unwrap();
        let [a, b, c, d] = [(0, 0), (0, 1), (1, 0), (1, 1)].map(|(r, c)| Position::new(r, c));
        grid.open_wall(a, b).unwrap();
        grid.open_wall(a, c).unwrap();
        grid.open_wall(b, d).unwrap();
        grid.open_wall(c, d).unwrap();
        let path = solve(&grid, a, d).unwrap();
        assert_eq!(path.directions(), "ES");
    }
}
