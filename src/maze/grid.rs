use crate::error::GridError;

use super::cell::{Cell, CellKind, Direction, Position, Walls};

/// Rectangular maze grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Box<[Cell]>,
    rows: u16,
    cols: u16,
}

impl Grid {
    /// Smallest accepted number of rows or columns.
    pub const MIN_SIZE: u16 = 2;

    /// Creates a fully walled grid of `rows` x `cols` normal cells.
    pub fn new(rows: u16, cols: u16) -> Result<Self, GridError> {
        if rows < Grid::MIN_SIZE || cols < Grid::MIN_SIZE {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let cells = vec![Cell::WALLED; rows as usize * cols as usize].into_boxed_slice();
        Ok(Grid { cells, rows, cols })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub(crate) fn ravel_index(&self, pos: Position) -> usize {
        // Overflow-safe since rows and cols are u16 (assuming usize is at least 32 bits)
        pos.row as usize * self.cols as usize + pos.col as usize
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if self.contains(pos) {
            self.cells.get(self.ravel_index(pos))
        } else {
            None
        }
    }

    fn check_bounds(&self, pos: Position) -> Result<(), GridError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                position: pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// In-bounds orthogonal neighbors of `pos`, in N, E, S, W order.
    /// Yields nothing when `pos` itself is out of bounds.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        let valid = self.contains(pos);
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| pos.step(dir))
            .filter(move |&n| valid && self.contains(n))
    }

    /// Neighbors of `pos` reachable through an open wall, in N, E, S, W order.
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        let walls = self.cell(pos).map_or(Walls::ALL, Cell::walls);
        Direction::ALL
            .into_iter()
            .filter(move |&dir| !walls.contains(dir))
            .filter_map(move |dir| pos.step(dir))
            .filter(move |&n| self.contains(n))
    }

    /// Whether `a` and `b` are adjacent and joined by an open wall.
    pub fn is_open(&self, a: Position, b: Position) -> bool {
        match (self.cell(a), self.cell(b), Direction::between(a, b)) {
            (Some(cell), Some(_), Some(dir)) => !cell.walls.contains(dir),
            _ => false,
        }
    }

    /// Removes the shared wall between two adjacent cells on both sides.
    ///
    /// Fails without touching the grid if either position is out of bounds, the positions are
    /// not adjacent, or either cell is reserved. Opening an already open wall is a no-op.
    pub fn open_wall(&mut self, a: Position, b: Position) -> Result<(), GridError> {
        self.check_bounds(a)?;
        self.check_bounds(b)?;
        let dir = Direction::between(a, b).ok_or(GridError::NotAdjacent { a, b })?;
        for pos in [a, b] {
            if self[pos].is_reserved() {
                return Err(GridError::ReservedCell { position: pos });
            }
        }

        let (idx_a, idx_b) = (self.ravel_index(a), self.ravel_index(b));
        self.cells[idx_a].walls.remove(dir);
        self.cells[idx_b].walls.remove(dir.opposite());
        Ok(())
    }

    /// Opens every wall of `pos` that faces outside the grid. Interior cells are left untouched.
    pub fn open_exterior(&mut self, pos: Position) -> Result<(), GridError> {
        self.check_bounds(pos)?;
        if self[pos].is_reserved() {
            return Err(GridError::ReservedCell { position: pos });
        }
        let idx = self.ravel_index(pos);
        for dir in Direction::ALL {
            let outside = pos.step(dir).is_none_or(|n| !self.contains(n));
            if outside {
                self.cells[idx].walls.remove(dir);
            }
        }
        Ok(())
    }

    /// Tags the cell at `pos`.
    ///
    /// A reserved cell keeps its tag for good, and only a fully walled cell may become reserved.
    pub(crate) fn set_kind(&mut self, pos: Position, kind: CellKind) -> Result<(), GridError> {
        self.check_bounds(pos)?;
        let cell = self[pos];
        if cell.is_reserved() && kind != CellKind::Reserved {
            return Err(GridError::ReservedCell { position: pos });
        }
        if kind == CellKind::Reserved && !cell.walls.is_closed() {
            return Err(GridError::AlreadyCarved { position: pos });
        }
        let idx = self.ravel_index(pos);
        self.cells[idx].kind = kind;
        Ok(())
    }

    /// Overwrites the walls of a single cell. Only used to rebuild a parsed grid, which checks
    /// wall symmetry itself.
    pub(crate) fn set_walls(&mut self, pos: Position, walls: Walls) -> Result<(), GridError> {
        self.check_bounds(pos)?;
        let idx = self.ravel_index(pos);
        self.cells[idx].walls = walls;
        Ok(())
    }

    /// Number of open passages between pairs of cells inside the grid.
    pub fn open_edge_count(&self) -> usize {
        self.positions()
            .flat_map(|pos| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter_map(move |dir| pos.step(dir).map(|n| (pos, n)))
            })
            .filter(|&(a, b)| self.is_open(a, b))
            .count()
    }

    pub fn reserved_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_reserved()).count()
    }
}

impl std::ops::Index<Position> for Grid {
    type Output = Cell;

    /// # Panics
    /// If `pos` is out of bounds.
    fn index(&self, pos: Position) -> &Self::Output {
        if !self.contains(pos) {
            panic!("Position {pos} is out of bounds");
        }
        &self.cells[self.ravel_index(pos)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_small_dimensions() {
        assert_eq!(
            Grid::new(1, 5),
            Err(GridError::InvalidDimensions { rows: 1, cols: 5 })
        );
        assert_eq!(
            Grid::new(5, 0),
            Err(GridError::InvalidDimensions { rows: 5, cols: 0 })
        );
        assert!(Grid::new(2, 2).is_ok());
    }

    #[test]
    fn test_new_is_fully_walled() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.cell_count(), 12);
        assert!(grid.positions().all(|pos| grid[pos] == Cell::WALLED));
        assert_eq!(grid.open_edge_count(), 0);
    }

    #[test]
    fn test_positions_are_row_major() {
        let grid = Grid::new(2, 3).unwrap();
        let positions = grid.positions().collect::<Vec<_>>();
        assert_eq!(positions.first(), Some(&Position::new(0, 0)));
        assert_eq!(positions.get(1), Some(&Position::new(0, 1)));
        assert_eq!(positions.get(3), Some(&Position::new(1, 0)));
        assert_eq!(positions.len(), 6);
    }

    #[test]
    fn test_neighbors_order_and_bounds() {
        let grid = Grid::new(5, 5).unwrap();
        let neighbors = grid.neighbors(Position::new(2, 2)).collect::<Vec<_>>();
        assert_eq!(
            neighbors,
            vec![
                Position::new(1, 2),
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(2, 1),
            ]
        );

        let corner = grid.neighbors(Position::new(0, 4)).collect::<Vec<_>>();
        assert_eq!(corner, vec![Position::new(1, 4), Position::new(0, 3)]);

        assert_eq!(grid.neighbors(Position::new(5, 5)).count(), 0);
    }

    #[test]
    fn test_open_wall_is_symmetric() {
        let mut grid = Grid::new(3, 3).unwrap();
        let (a, b) = (Position::new(1, 1), Position::new(1, 2));
        grid.open_wall(a, b).unwrap();
        assert!(!grid[a].walls().contains(Direction::East));
        assert!(!grid[b].walls().contains(Direction::West));
        assert!(grid.is_open(a, b));
        assert!(grid.is_open(b, a));
        assert_eq!(grid.open_edge_count(), 1);
        assert_eq!(grid.open_neighbors(a).collect::<Vec<_>>(), vec![b]);

        // Opening again changes nothing
        grid.open_wall(b, a).unwrap();
        assert_eq!(grid.open_edge_count(), 1);
    }

    #[test]
    fn test_open_wall_rejects_non_adjacent() {
        let mut grid = Grid::new(3, 3).unwrap();
        let before = grid.clone();
        let (a, b) = (Position::new(0, 0), Position::new(1, 1));
        assert_eq!(grid.open_wall(a, b), Err(GridError::NotAdjacent { a, b }));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_open_wall_rejects_out_of_bounds() {
        let mut grid = Grid::new(3, 3).unwrap();
        let outside = Position::new(0, 3);
        assert_eq!(
            grid.open_wall(Position::new(0, 2), outside),
            Err(GridError::OutOfBounds {
                position: outside,
                rows: 3,
                cols: 3
            })
        );
    }

    #[test]
    fn test_reserved_cells_cannot_be_opened() {
        let mut grid = Grid::new(3, 3).unwrap();
        let reserved = Position::new(1, 1);
        grid.set_kind(reserved, CellKind::Reserved).unwrap();
        let before = grid.clone();

        assert_eq!(
            grid.open_wall(Position::new(0, 1), reserved),
            Err(GridError::ReservedCell { position: reserved })
        );
        assert_eq!(
            grid.open_exterior(reserved),
            Err(GridError::ReservedCell { position: reserved })
        );
        assert_eq!(
            grid.set_kind(reserved, CellKind::Normal),
            Err(GridError::ReservedCell { position: reserved })
        );
        assert_eq!(grid, before);
        assert_eq!(grid.reserved_count(), 1);
    }

    #[test]
    fn test_carved_cell_cannot_become_reserved() {
        let mut grid = Grid::new(3, 3).unwrap();
        let (a, b) = (Position::new(0, 0), Position::new(0, 1));
        grid.open_wall(a, b).unwrap();
        assert_eq!(
            grid.set_kind(a, CellKind::Reserved),
            Err(GridError::AlreadyCarved { position: a })
        );
    }

    #[test]
    fn test_open_exterior_only_touches_boundary_walls() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.open_exterior(Position::new(0, 0)).unwrap();
        let corner = grid[Position::new(0, 0)].walls();
        assert!(!corner.contains(Direction::North));
        assert!(!corner.contains(Direction::West));
        assert!(corner.contains(Direction::East));
        assert!(corner.contains(Direction::South));

        grid.open_exterior(Position::new(1, 1)).unwrap();
        assert!(grid[Position::new(1, 1)].walls().is_closed());
        // Exterior openings are not passages between cells
        assert_eq!(grid.open_edge_count(), 0);
        assert_eq!(grid.open_neighbors(Position::new(0, 0)).count(), 0);
    }
}
