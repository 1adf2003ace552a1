use std::collections::VecDeque;

use rand::{Rng, SeedableRng, rngs::StdRng};

mod braid;
mod recur_backtrack;

use braid::braid;
use recur_backtrack::recursive_backtrack;

use crate::{
    error::GenerationError,
    maze::{CellKind, Grid, Position},
    pattern::{PatternMask, embed_pattern},
};

/// Default fraction of the remaining closed walls removed when braiding an imperfect maze.
pub const DEFAULT_BRAID_FRACTION: f64 = 0.15;

/// Get a random number generator seeded for reproducibility.
/// When no seed is given a fresh one is drawn, and returned so it can be reported.
fn get_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    (StdRng::seed_from_u64(seed), seed)
}

/// Parameters of a single generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub rows: u16,
    pub cols: u16,
    pub entry: Position,
    pub exit: Position,
    /// Carve a perfect maze (a spanning tree) when true, braid in loops afterwards when false.
    pub perfect: bool,
    pub seed: Option<u64>,
    /// Fraction of remaining walls removed by the braiding pass. Ignored for perfect mazes.
    pub braid_fraction: f64,
}

impl GenerationConfig {
    /// A perfect, randomly seeded maze with the given size and endpoints.
    pub fn new(rows: u16, cols: u16, entry: Position, exit: Position) -> Self {
        Self {
            rows,
            cols,
            entry,
            exit,
            perfect: true,
            seed: None,
            braid_fraction: DEFAULT_BRAID_FRACTION,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_perfect(mut self, perfect: bool) -> Self {
        self.perfect = perfect;
        self
    }

    pub fn with_braid_fraction(mut self, braid_fraction: f64) -> Self {
        self.braid_fraction = braid_fraction;
        self
    }
}

/// One carving action: the wall between `from` and `to` was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Position of this step in the log, starting at 0.
    pub index: usize,
    pub from: Position,
    pub to: Position,
}

/// Append-only record of carving steps, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepLog {
    steps: Vec<Step>,
}

impl StepLog {
    fn record(&mut self, from: Position, to: Position) {
        let index = self.steps.len();
        self.steps.push(Step { index, from, to });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn as_slice(&self) -> &[Step] {
        &self.steps
    }
}

impl<'a> IntoIterator for &'a StepLog {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMaze {
    pub grid: Grid,
    pub steps: StepLog,
    /// Seed actually used, drawn at random if none was configured.
    pub seed: u64,
    /// Glyph cells that were reserved.
    pub pattern: PatternMask,
}

/// Generates a maze according to `config`.
///
/// The grid starts fully walled, the "42" glyph is reserved, and passages are carved from the
/// entry with a randomized depth-first search. Imperfect mazes then get a braiding pass.
/// Either the full maze is returned or an error; never a partially carved grid.
pub fn generate(config: &GenerationConfig) -> Result<GeneratedMaze, GenerationError> {
    let GenerationConfig {
        rows,
        cols,
        entry,
        exit,
        ..
    } = *config;

    if rows < Grid::MIN_SIZE || cols < Grid::MIN_SIZE {
        return Err(GenerationError::InvalidDimensions { rows, cols });
    }
    let mut grid = Grid::new(rows, cols)?;
    for position in [entry, exit] {
        if !grid.contains(position) {
            return Err(GenerationError::EndpointOutOfBounds {
                position,
                rows,
                cols,
            });
        }
    }
    if !config.perfect && !(0.0..=1.0).contains(&config.braid_fraction) {
        return Err(GenerationError::InvalidBraidFraction {
            fraction: config.braid_fraction,
        });
    }

    grid.set_kind(entry, CellKind::Entry)?;
    grid.set_kind(exit, CellKind::Exit)?;
    let pattern = embed_pattern(&mut grid, entry, exit)?;
    check_reachability(&grid, entry, exit)?;

    let (mut rng, seed) = get_rng(config.seed);
    tracing::info!(
        "[generate] Carving {}x{} maze (perfect: {}, seed: {})",
        rows,
        cols,
        config.perfect,
        seed
    );

    let mut steps = StepLog::default();
    recursive_backtrack(&mut grid, entry, &mut rng, &mut steps)?;
    tracing::debug!("[generate] Spanning tree carved in {} steps", steps.len());

    if !config.perfect {
        let removed = braid(&mut grid, config.braid_fraction, &mut rng, &mut steps)?;
        tracing::debug!("[generate] Braiding removed {} extra walls", removed);
    }

    grid.open_exterior(entry)?;
    grid.open_exterior(exit)?;

    Ok(GeneratedMaze {
        grid,
        steps,
        seed,
        pattern,
    })
}

/// Checks, ignoring walls, that the reserved cells do not cut the maze apart.
///
/// Every non-reserved cell must be 4-connected to the entry. Otherwise the endpoint lying in
/// the smaller region is the one reported as cut off.
fn check_reachability(grid: &Grid, entry: Position, exit: Position) -> Result<(), GenerationError> {
    let open_cells = grid.cell_count() - grid.reserved_count();
    let from_entry = flood_fill(grid, entry);
    if from_entry == open_cells {
        return Ok(());
    }

    let from_exit = flood_fill(grid, exit);
    let position = if from_entry < from_exit { entry } else { exit };
    tracing::warn!(
        "[generate] Endpoint {} is cut off by the 42 pattern ({} of {} cells reachable)",
        position,
        from_entry.min(from_exit),
        open_cells
    );
    Err(GenerationError::UnreachableEndpoint { position })
}

/// Number of non-reserved cells 4-connected to `start`, walls ignored.
fn flood_fill(grid: &Grid, start: Position) -> usize {
    let mut visited = vec![false; grid.cell_count()];
    visited[grid.ravel_index(start)] = true;
    let mut queue = VecDeque::from([start]);
    let mut reached = 1;

    while let Some(cell) = queue.pop_front() {
        for neighbor in grid.neighbors(cell) {
            let idx = grid.ravel_index(neighbor);
            if !visited[idx] && !grid[neighbor].is_reserved() {
                visited[idx] = true;
                reached += 1;
                queue.push_back(neighbor);
            }
        }
    }
    reached
}
