//! Hexadecimal wall-mask format
//!
//! One uppercase hex digit per cell, rows separated by `\n`. Each digit is the cell's closed
//! walls: bit 0 north, bit 1 east, bit 2 south, bit 3 west. Cell kinds are not stored, so a
//! reserved cell reads back as a fully walled normal cell (`F`).

use crate::error::ParseError;
use crate::maze::{Direction, Grid, Position, Walls};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Number of bytes [`serialize`] produces for a grid of the given size.
pub fn serialized_len(rows: u16, cols: u16) -> usize {
    rows as usize * (cols as usize + 1)
}

/// Encodes the wall topology of `grid`, row-major, each row terminated by `\n`.
pub fn serialize(grid: &Grid) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(serialized_len(grid.rows(), grid.cols()));
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let bits = grid[Position::new(row, col)].walls().bits();
            bytes.push(HEX_DIGITS[bits as usize]);
        }
        bytes.push(b'\n');
    }
    bytes
}

fn decode_digit(byte: u8) -> Option<Walls> {
    let bits = char::from(byte).to_digit(16)?;
    Walls::from_bits(bits as u8)
}

/// Rebuilds a grid from bytes produced by [`serialize`].
///
/// Lowercase digits and a missing final newline are accepted. Adjacent cells must agree on
/// their shared wall.
pub fn parse(bytes: &[u8], rows: u16, cols: u16) -> Result<Grid, ParseError> {
    let mut grid =
        Grid::new(rows, cols).map_err(|_| ParseError::InvalidDimensions { rows, cols })?;

    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let lines = body.split(|&b| b == b'\n').collect::<Vec<_>>();
    if lines.len() != rows as usize {
        return Err(ParseError::RowCount {
            expected: rows,
            actual: lines.len(),
        });
    }

    for (row, line) in lines.iter().enumerate() {
        if line.len() != cols as usize {
            return Err(ParseError::RowLength {
                row,
                expected: cols,
                actual: line.len(),
            });
        }
        for (col, &byte) in line.iter().enumerate() {
            let walls = decode_digit(byte).ok_or(ParseError::InvalidDigit { row, col, byte })?;
            // Indices are bounded by rows and cols, both u16
            let pos = Position::new(row as u16, col as u16);
            grid.set_walls(pos, walls)
                .map_err(|_| ParseError::InvalidDimensions { rows, cols })?;
        }
    }

    check_symmetry(&grid)?;
    Ok(grid)
}

fn check_symmetry(grid: &Grid) -> Result<(), ParseError> {
    for a in grid.positions() {
        for dir in [Direction::East, Direction::South] {
            let Some(b) = a.step(dir).filter(|&b| grid.contains(b)) else {
                continue;
            };
            if grid[a].walls().contains(dir) != grid[b].walls().contains(dir.opposite()) {
                return Err(ParseError::AsymmetricWall { a, b });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_walled_grid() {
        let grid = Grid::new(2, 3).unwrap();
        assert_eq!(serialize(&grid), b"FFF\nFFF\n");
        assert_eq!(serialize(&grid).len(), serialized_len(2, 3));
    }

    #[test]
    fn test_serialize_bits() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.open_wall(Position::new(0, 0), Position::new(0, 1))
            .unwrap();
        grid.open_wall(Position::new(0, 0), Position::new(1, 0))
            .unwrap();
        // (0,0) keeps N and W: 1 + 8 = 9
        // (0,1) loses W: 1 + 2 + 4 = 7
        // (1,0) loses N: 2 + 4 + 8 = E
        assert_eq!(serialize(&grid), b"97\nEF\n");
    }

    #[test]
    fn test_parse_round_trip() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.open_wall(Position::new(1, 1), Position::new(1, 2))
            .unwrap();
        grid.open_wall(Position::new(1, 1), Position::new(2, 1))
            .unwrap();
        grid.open_exterior(Position::new(0, 0)).unwrap();
        let parsed = parse(&serialize(&grid), 3, 3).unwrap();
        assert_eq!(parsed, grid);
    }

    #[test]
    fn test_parse_accepts_lowercase_without_trailing_newline() {
        let grid = parse(b"97\nef", 2, 2).unwrap();
        assert!(grid.is_open(Position::new(0, 0), Position::new(0, 1)));
        assert!(grid.is_open(Position::new(0, 0), Position::new(1, 0)));
        assert!(!grid.is_open(Position::new(1, 0), Position::new(1, 1)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse(b"F\n", 1, 1),
            Err(ParseError::InvalidDimensions { rows: 1, cols: 1 })
        );
        assert_eq!(
            parse(b"FF\n", 2, 2),
            Err(ParseError::RowCount {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            parse(b"FF\nFFF\n", 2, 2),
            Err(ParseError::RowLength {
                row: 1,
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(
            parse(b"FF\nFG\n", 2, 2),
            Err(ParseError::InvalidDigit {
                row: 1,
                col: 1,
                byte: b'G'
            })
        );
        // (0,0) says east is open, (0,1) says west is closed
        assert_eq!(
            parse(b"DF\nFF\n", 2, 2),
            Err(ParseError::AsymmetricWall {
                a: Position::new(0, 0),
                b: Position::new(0, 1)
            })
        );
    }
}
