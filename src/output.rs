//! The persisted maze file
//!
//! Layout: the serialized hex grid, an empty line, the entry as `col,row`, the exit as
//! `col,row`, and the solution as compass letters, each on its own line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path as FsPath;

use crate::error::AppError;
use crate::maze::{Grid, Position};
use crate::serialize::serialize;
use crate::solvers::Path;

/// Writes the maze file to `writer`.
pub fn write_maze<W: Write>(
    mut writer: W,
    grid: &Grid,
    entry: Position,
    exit: Position,
    solution: &Path,
) -> std::io::Result<()> {
    writer.write_all(&serialize(grid))?;
    writeln!(writer)?;
    writeln!(writer, "{},{}", entry.col, entry.row)?;
    writeln!(writer, "{},{}", exit.col, exit.row)?;
    writeln!(writer, "{}", solution.directions())?;
    writer.flush()
}

/// Writes the maze file to `path`, replacing any existing file.
pub fn save_maze(
    path: &FsPath,
    grid: &Grid,
    entry: Position,
    exit: Position,
    solution: &Path,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::Io {
        operation: "create output file",
        source,
    })?;
    write_maze(BufWriter::new(file), grid, entry, exit, solution).map_err(|source| {
        AppError::Io {
            operation: "write output file",
            source,
        }
    })?;
    tracing::info!("[output] Maze written to {}", path.display());
    Ok(())
}
