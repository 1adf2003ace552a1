//! Error types for every fallible layer of the crate

use std::fmt;
use std::path::PathBuf;

use crate::maze::Position;

/// Contract violations on the grid model.
///
/// These indicate a bug in the carving code when they surface from [`generate`](crate::generate);
/// they are not expected at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Grid smaller than 2x2
    InvalidDimensions { rows: u16, cols: u16 },
    /// Position outside the grid
    OutOfBounds {
        position: Position,
        rows: u16,
        cols: u16,
    },
    /// The two positions do not share a wall
    NotAdjacent { a: Position, b: Position },
    /// Attempted to modify a reserved (glyph) cell
    ReservedCell { position: Position },
    /// Attempted to reserve a cell after one of its walls was opened
    AlreadyCarved { position: Position },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "Invalid grid dimensions {rows}x{cols} (minimum is 2x2)")
            }
            Self::OutOfBounds {
                position,
                rows,
                cols,
            } => write!(f, "Position {position} is outside the {rows}x{cols} grid"),
            Self::NotAdjacent { a, b } => write!(f, "Positions {a} and {b} are not adjacent"),
            Self::ReservedCell { position } => {
                write!(f, "Cell {position} is reserved and cannot be modified")
            }
            Self::AlreadyCarved { position } => {
                write!(f, "Cell {position} has open walls and cannot be reserved")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Errors returned by [`generate`](crate::generate).
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Requested grid is smaller than 2x2
    InvalidDimensions { rows: u16, cols: u16 },
    /// Entry or exit lies outside the grid
    EndpointOutOfBounds {
        position: Position,
        rows: u16,
        cols: u16,
    },
    /// Braid fraction is not a finite number in `0.0..=1.0`
    InvalidBraidFraction { fraction: f64 },
    /// Reserved cells cut the endpoint off from the rest of the maze
    UnreachableEndpoint { position: Position },
    /// Internal invariant break while carving
    Grid(GridError),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "Invalid maze dimensions {rows}x{cols} (minimum is 2x2)")
            }
            Self::EndpointOutOfBounds {
                position,
                rows,
                cols,
            } => write!(f, "Endpoint {position} is outside the {rows}x{cols} maze"),
            Self::InvalidBraidFraction { fraction } => {
                write!(f, "Braid fraction {fraction} must be between 0.0 and 1.0")
            }
            Self::UnreachableEndpoint { position } => write!(
                f,
                "Endpoint {position} is enclosed by the 42 pattern and cannot be reached"
            ),
            Self::Grid(source) => write!(f, "Internal carving error: {source}"),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(source) => Some(source),
            _ => None,
        }
    }
}

impl From<GridError> for GenerationError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

/// Errors returned by [`solve`](crate::solve).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Entry and exit are not connected by open passages
    NoPath { entry: Position, exit: Position },
    /// Entry or exit lies outside the grid
    OutOfBounds { position: Position },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPath { entry, exit } => {
                write!(f, "No path between entry {entry} and exit {exit}")
            }
            Self::OutOfBounds { position } => {
                write!(f, "Position {position} is outside the maze")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Errors returned by [`parse`](crate::serialize::parse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Declared dimensions are smaller than 2x2
    InvalidDimensions { rows: u16, cols: u16 },
    /// Wrong number of rows in the input
    RowCount { expected: u16, actual: usize },
    /// A row does not have exactly one digit per column
    RowLength {
        row: usize,
        expected: u16,
        actual: usize,
    },
    /// A byte is not a hexadecimal digit
    InvalidDigit { row: usize, col: usize, byte: u8 },
    /// Two adjacent cells disagree on their shared wall
    AsymmetricWall { a: Position, b: Position },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "Invalid maze dimensions {rows}x{cols} (minimum is 2x2)")
            }
            Self::RowCount { expected, actual } => {
                write!(f, "Expected {expected} rows, found {actual}")
            }
            Self::RowLength {
                row,
                expected,
                actual,
            } => write!(f, "Row {row} has {actual} cells, expected {expected}"),
            Self::InvalidDigit { row, col, byte } => write!(
                f,
                "Invalid hex digit {:?} at row {row}, column {col}",
                char::from(*byte)
            ),
            Self::AsymmetricWall { a, b } => {
                write!(f, "Cells {a} and {b} disagree on their shared wall")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A non-comment line is not of the form `KEY=VALUE`
    Syntax { line: usize, text: String },
    /// A required key is absent
    MissingKey { key: &'static str },
    /// A key has a value that fails validation
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot read config file '{}': {source}", path.display())
            }
            Self::Syntax { line, text } => {
                write!(f, "Line {line}: invalid format '{text}' (expected KEY=VALUE)")
            }
            Self::MissingKey { key } => write!(f, "Missing required key '{key}'"),
            Self::InvalidValue { key, value, reason } => {
                write!(f, "Invalid {key} '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Create an invalid value error
pub fn invalid_value(key: &'static str, value: &str, reason: &impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Top-level error of the terminal application.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Generation(GenerationError),
    Solve(SolveError),
    /// Terminal or file system failure
    Io {
        /// Operation that failed
        operation: &'static str,
        source: std::io::Error,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "Configuration error: {err}"),
            Self::Generation(err) => write!(f, "Generation failed: {err}"),
            Self::Solve(err) => write!(f, "Solving failed: {err}"),
            Self::Io { operation, source } => write!(f, "I/O error during {operation}: {source}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Generation(err) => Some(err),
            Self::Solve(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        Self::Generation(err)
    }
}

impl From<SolveError> for AppError {
    fn from(err: SolveError) -> Self {
        Self::Solve(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            operation: "terminal output",
            source: err,
        }
    }
}
