pub mod cell;
mod grid;

pub use cell::{Cell, CellKind, Direction, Position, Walls};
pub use grid::Grid;
