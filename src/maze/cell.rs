use std::fmt;

/// One of the four cardinal directions a cell can have a wall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Fixed exploration order. Carving and solving both iterate neighbors in this order,
    /// so changing it changes every seeded maze.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Bit used for this direction in the serialized wall mask.
    pub const fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::East => 0b0010,
            Direction::South => 0b0100,
            Direction::West => 0b1000,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Letter used in solution strings.
    pub const fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// Direction leading from `from` to `to`, or `None` if they are not orthogonally adjacent.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| from.step(dir) == Some(to))
    }
}

/// A (row, col) coordinate, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    pub const fn new(row: u16, col: u16) -> Self {
        Position { row, col }
    }

    /// The adjacent position in `dir`, without any bounds check against a grid.
    /// Returns `None` only when the coordinate would leave the `u16` range.
    pub fn step(self, dir: Direction) -> Option<Position> {
        match dir {
            Direction::North => self.row.checked_sub(1).map(|row| Position { row, ..self }),
            Direction::East => self.col.checked_add(1).map(|col| Position { col, ..self }),
            Direction::South => self.row.checked_add(1).map(|row| Position { row, ..self }),
            Direction::West => self.col.checked_sub(1).map(|col| Position { col, ..self }),
        }
    }

    pub fn manhattan_distance(self, other: Position) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Set of closed walls around a cell. A set bit means the cell is impassable in that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Walls(u8);

impl Walls {
    pub const NONE: Walls = Walls(0);
    pub const ALL: Walls = Walls(0b1111);

    /// Builds a wall set from its 4-bit mask. Returns `None` if any higher bit is set.
    pub const fn from_bits(bits: u8) -> Option<Walls> {
        if bits & !Walls::ALL.0 == 0 {
            Some(Walls(bits))
        } else {
            None
        }
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    pub const fn is_closed(self) -> bool {
        self.0 == Walls::ALL.0
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::ALL
    }
}

/// Role of a cell in the maze.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[default]
    Normal,
    Entry,
    Exit,
    /// Part of the "42" glyph. Never carved, never traversed.
    Reserved,
}

/// A single maze cell: its walls and its role.
///
/// Fields are only writable from within the `maze` module so that the wall-clearing rules in
/// [`Grid`](super::Grid) cannot be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub(super) walls: Walls,
    pub(super) kind: CellKind,
}

impl Cell {
    pub const WALLED: Cell = Cell {
        walls: Walls::ALL,
        kind: CellKind::Normal,
    };

    pub fn walls(&self) -> Walls {
        self.walls
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn is_reserved(&self) -> bool {
        self.kind == CellKind::Reserved
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::WALLED
    }
}
