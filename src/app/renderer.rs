use std::collections::HashSet;
use std::io::Write;

use crossterm::{
    cursor, queue,
    style::{self, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    app::palette::{PALETTES, Palette},
    generators::Step,
    maze::{CellKind, Direction, Grid, Position},
    solvers::Path,
};

/// What a single canvas block shows.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Block {
    Wall,
    Open,
    Endpoint,
    Trace,
}

/// Draws a grid on a canvas of (2 * cols + 1) x (2 * rows + 1) blocks: cells sit on odd
/// coordinates, walls and corner posts on even ones.
pub struct Renderer {
    palette_index: usize,
}

impl Renderer {
    /// Width of each block when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
    const BLOCK: &'static str = "  ";

    pub fn new() -> Self {
        Self { palette_index: 0 }
    }

    pub fn palette(&self) -> &'static Palette {
        &PALETTES[self.palette_index % PALETTES.len()]
    }

    /// Switches to the next color scheme and returns it.
    pub fn rotate_palette(&mut self) -> &'static Palette {
        self.palette_index = (self.palette_index + 1) % PALETTES.len();
        self.palette()
    }

    /// Size of the drawn maze in terminal (columns, rows).
    pub fn canvas_size(grid: &Grid) -> (u16, u16) {
        (
            (2 * grid.cols() + 1) * Renderer::CELL_WIDTH,
            2 * grid.rows() + 1,
        )
    }

    /// Canvas coordinate of a cell center.
    fn center(pos: Position) -> (u16, u16) {
        (2 * pos.col + 1, 2 * pos.row + 1)
    }

    /// Canvas coordinate of the wall between two adjacent cells.
    fn gap(a: Position, b: Position) -> (u16, u16) {
        (a.col + b.col + 1, a.row + b.row + 1)
    }

    fn cell_block(grid: &Grid, pos: Position) -> Block {
        match grid[pos].kind() {
            CellKind::Entry | CellKind::Exit => Block::Endpoint,
            CellKind::Reserved => Block::Wall,
            CellKind::Normal if grid[pos].walls().is_closed() => Block::Wall,
            CellKind::Normal => Block::Open,
        }
    }

    /// Block at canvas coordinate (x, y) for the finished grid.
    fn block_at(grid: &Grid, x: u16, y: u16) -> Block {
        let (last_x, last_y) = (2 * grid.cols(), 2 * grid.rows());
        match (x % 2, y % 2) {
            (1, 1) => Renderer::cell_block(grid, Position::new(y / 2, x / 2)),
            // Vertical wall: belongs to the cell on its left, or the first cell's west side
            (0, 1) => {
                let (pos, dir) = if x == last_x {
                    (Position::new(y / 2, x / 2 - 1), Direction::East)
                } else {
                    (Position::new(y / 2, x / 2), Direction::West)
                };
                if grid[pos].walls().contains(dir) {
                    Block::Wall
                } else {
                    Block::Open
                }
            }
            // Horizontal wall
            (1, 0) => {
                let (pos, dir) = if y == last_y {
                    (Position::new(y / 2 - 1, x / 2), Direction::South)
                } else {
                    (Position::new(y / 2, x / 2), Direction::North)
                };
                if grid[pos].walls().contains(dir) {
                    Block::Wall
                } else {
                    Block::Open
                }
            }
            _ => Block::Wall,
        }
    }

    fn queue_block<W: Write>(&self, out: &mut W, (x, y): (u16, u16), block: Block) -> std::io::Result<()> {
        let palette = self.palette();
        let color = match block {
            Block::Wall => palette.wall,
            Block::Open => palette.open,
            Block::Endpoint | Block::Trace => palette.trace,
        };
        queue!(
            out,
            cursor::MoveTo(x * Renderer::CELL_WIDTH, y),
            style::PrintStyledContent(Renderer::BLOCK.on(color))
        )
    }

    /// Draws the grid with every wall closed, the first frame of the carving animation.
    pub fn draw_walled<W: Write>(&self, out: &mut W, grid: &Grid) -> std::io::Result<()> {
        queue!(out, terminal::Clear(ClearType::All))?;
        for y in 0..=2 * grid.rows() {
            for x in 0..=2 * grid.cols() {
                self.queue_block(out, (x, y), Block::Wall)?;
            }
        }
        out.flush()
    }

    /// Draws the finished grid, overlaying `trace` when given.
    pub fn draw_maze<W: Write>(
        &self,
        out: &mut W,
        grid: &Grid,
        trace: Option<&Path>,
    ) -> std::io::Result<()> {
        let traced = trace.map(Renderer::trace_blocks).unwrap_or_default();
        queue!(out, terminal::Clear(ClearType::All))?;
        for y in 0..=2 * grid.rows() {
            for x in 0..=2 * grid.cols() {
                let block = match Renderer::block_at(grid, x, y) {
                    Block::Open if traced.contains(&(x, y)) => Block::Trace,
                    block => block,
                };
                self.queue_block(out, (x, y), block)?;
            }
        }
        out.flush()
    }

    /// Canvas blocks covered by a path: cell centers and the gaps between them.
    fn trace_blocks(path: &Path) -> HashSet<(u16, u16)> {
        let positions = path.positions();
        positions
            .iter()
            .map(|&pos| Renderer::center(pos))
            .chain(
                positions
                    .windows(2)
                    .map(|pair| Renderer::gap(pair[0], pair[1])),
            )
            .collect()
    }

    /// Reveals one carving step on top of what is already drawn.
    pub fn draw_step<W: Write>(&self, out: &mut W, grid: &Grid, step: &Step) -> std::io::Result<()> {
        for pos in [step.from, step.to] {
            self.queue_block(out, Renderer::center(pos), Renderer::cell_block(grid, pos))?;
        }
        self.queue_block(out, Renderer::gap(step.from, step.to), Block::Open)
    }

    /// Extends the drawn solution trace by one move ending at `pos`.
    pub fn draw_trace_move<W: Write>(
        &self,
        out: &mut W,
        grid: &Grid,
        previous: Option<Position>,
        pos: Position,
    ) -> std::io::Result<()> {
        if let Some(previous) = previous {
            self.queue_block(out, Renderer::gap(previous, pos), Block::Trace)?;
        }
        let block = match Renderer::cell_block(grid, pos) {
            Block::Endpoint => Block::Endpoint,
            _ => Block::Trace,
        };
        self.queue_block(out, Renderer::center(pos), block)?;
        out.flush()
    }

    /// Prints a single status line right below the maze, clipped to the terminal width.
    pub fn draw_status<W: Write>(&self, out: &mut W, grid: &Grid, line: &str) -> std::io::Result<()> {
        let (term_width, _) = terminal::size().unwrap_or((u16::MAX, 0));
        let (clipped, width) = line.unicode_truncate(term_width as usize);
        let padding = " ".repeat((term_width as usize).saturating_sub(width).min(256));
        let (_, canvas_height) = Renderer::canvas_size(grid);
        queue!(
            out,
            cursor::MoveTo(0, canvas_height),
            style::PrintStyledContent(clipped.with(self.palette().trace)),
            style::Print(padding),
        )?;
        out.flush()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_width() {
        use unicode_width::UnicodeWidthStr;
        assert_eq!(Renderer::BLOCK.width(), Renderer::CELL_WIDTH as usize);
    }

    #[test]
    fn test_canvas_layout() {
        let mut grid = Grid::new(2, 3).unwrap();
        assert_eq!(Renderer::canvas_size(&grid), (14, 5));

        let (a, b) = (Position::new(0, 0), Position::new(0, 1));
        grid.open_wall(a, b).unwrap();
        grid.open_exterior(a).unwrap();

        assert_eq!(Renderer::gap(a, b), (2, 1));
        assert_eq!(Renderer::block_at(&grid, 2, 1), Block::Open);
        // Doorways on the outer frame
        assert_eq!(Renderer::block_at(&grid, 0, 1), Block::Open);
        assert_eq!(Renderer::block_at(&grid, 1, 0), Block::Open);
        // Corner posts and closed walls
        assert_eq!(Renderer::block_at(&grid, 0, 0), Block::Wall);
        assert_eq!(Renderer::block_at(&grid, 4, 1), Block::Wall);
        assert_eq!(Renderer::block_at(&grid, 6, 1), Block::Wall);
        assert_eq!(Renderer::block_at(&grid, 1, 4), Block::Wall);
        // Carved cells are open, untouched ones are solid
        assert_eq!(Renderer::block_at(&grid, 1, 1), Block::Open);
        assert_eq!(Renderer::block_at(&grid, 5, 3), Block::Wall);
    }

    #[test]
    fn test_trace_blocks() {
        let mut grid = Grid::new(2, 2).unwrap();
        let (a, b) = (Position::new(0, 0), Position::new(1, 0));
        grid.open_wall(a, b).unwrap();
        let path = crate::solvers::solve(&grid, a, b).unwrap();
        let blocks = Renderer::trace_blocks(&path);
        assert_eq!(blocks, HashSet::from([(1, 1), (1, 2), (1, 3)]));
    }

    #[test]
    fn test_draw_into_buffer() {
        let grid = Grid::new(2, 2).unwrap();
        let renderer = Renderer::new();
        let mut buffer = Vec::new();
        renderer.draw_maze(&mut buffer, &grid, None).unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_rotate_palette_wraps() {
        let mut renderer = Renderer::new();
        let first = *renderer.palette();
        for _ in 0..PALETTES.len() {
            renderer.rotate_palette();
        }
        assert_eq!(*renderer.palette(), first);
    }
}
