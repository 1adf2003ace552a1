pub mod app;
pub mod config;
pub mod error;
pub mod generators;
pub mod maze;
pub mod output;
pub mod pattern;
pub mod serialize;
pub mod solvers;

pub use generators::{GeneratedMaze, GenerationConfig, Step, StepLog, generate};
pub use maze::{Grid, Position};
pub use serialize::{parse, serialize};
pub use solvers::{Path, solve};
