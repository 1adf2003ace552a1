mod palette;
mod renderer;

use std::{
    fmt,
    io::{Stdout, Write},
    path::PathBuf,
    time::Duration,
};

use crossterm::{
    QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::renderer::Renderer,
    config::Config,
    error::AppError,
    generators::{GeneratedMaze, generate},
    output::save_maze,
    solvers::{Path, solve},
};

/// Entries of the menu shown below a finished maze.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    /// Generate a new maze with a fresh seed
    Regenerate,
    /// Show or hide the solution path
    TogglePath,
    /// Switch to the next color scheme
    RotateColors,
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Regenerate => write!(f, "Re-generate a new maze"),
            MenuAction::TogglePath => write!(f, "Show/Hide path from entry to exit"),
            MenuAction::RotateColors => write!(f, "Rotate maze colors"),
            MenuAction::Quit => write!(f, "Quit"),
        }
    }
}

/// Everything produced for one maze: the generated grid, its solution, and the file it was
/// written to.
struct Session {
    config: Config,
    maze: GeneratedMaze,
    solution: Path,
}

pub struct App {
    config_path: PathBuf,
    /// Seed given on the command line, used for the first maze only
    seed_override: Option<u64>,
    /// Replay the carving and the solution instead of drawing the final state directly
    animate: bool,
    /// Delay between carving frames
    step_delay: Duration,
    /// Delay between solution path moves
    path_delay: Duration,
    renderer: Renderer,
    show_path: bool,
}

impl App {
    /// Upper bound on carving frames, so large mazes still animate in a few seconds
    const MAX_GENERATION_FRAMES: usize = 1500;
    const MENU: [MenuAction; 4] = [
        MenuAction::Regenerate,
        MenuAction::TogglePath,
        MenuAction::RotateColors,
        MenuAction::Quit,
    ];

    pub fn new(config_path: PathBuf, seed_override: Option<u64>, animate: bool) -> Self {
        Self {
            config_path,
            seed_override,
            animate,
            step_delay: Duration::from_millis(8),
            path_delay: Duration::from_millis(30),
            renderer: Renderer::new(),
            show_path: false,
        }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Loads the configuration, generates and solves a maze, and writes the output file.
    ///
    /// `reseed` drops both the command line and the configured seed so every regeneration
    /// yields a new maze.
    fn build_session(&self, reseed: bool) -> Result<Session, AppError> {
        let mut config = Config::load(&self.config_path)?;
        if reseed {
            config.seed = None;
        } else if let Some(seed) = self.seed_override {
            config.seed = Some(seed);
        }

        let maze = generate(&config.generation_config())?;
        let solution = solve(&maze.grid, config.entry, config.exit)?;
        save_maze(
            &config.output_file,
            &maze.grid,
            config.entry,
            config.exit,
            &solution,
        )?;
        tracing::info!(
            "[app] Maze ready: seed {}, {} steps, solution of {} moves",
            maze.seed,
            maze.steps.len(),
            solution.moves()
        );
        Ok(Session {
            config,
            maze,
            solution,
        })
    }

    /// Carving steps revealed per frame so the replay stays within the frame budget.
    fn steps_per_frame(total_steps: usize) -> usize {
        total_steps.div_ceil(App::MAX_GENERATION_FRAMES).max(1)
    }

    /// Waits for `delay` and reports whether a key was pressed in the meantime.
    fn wait_or_skip(delay: Duration) -> std::io::Result<bool> {
        if !event::poll(delay)? {
            return Ok(false);
        }
        match event::read()? {
            event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Replays the carving, then the solution if shown. Any key jumps to the final frame.
    fn present(&self, stdout: &mut Stdout, session: &Session) -> std::io::Result<()> {
        let grid = &session.maze.grid;
        let trace = self.show_path.then_some(&session.solution);

        if !self.animate {
            return self.renderer.draw_maze(stdout, grid, trace);
        }

        self.renderer.draw_walled(stdout, grid)?;
        let steps = session.maze.steps.as_slice();
        for chunk in steps.chunks(App::steps_per_frame(steps.len())) {
            for step in chunk {
                self.renderer.draw_step(stdout, grid, step)?;
            }
            stdout.flush()?;
            if App::wait_or_skip(self.step_delay)? {
                tracing::debug!("[app] Carving animation skipped");
                return self.renderer.draw_maze(stdout, grid, trace);
            }
        }
        // Final frame also opens the entry and exit doorways
        self.renderer.draw_maze(stdout, grid, None)?;

        if self.show_path {
            self.animate_path(stdout, session)?;
        }
        Ok(())
    }

    fn animate_path(&self, stdout: &mut Stdout, session: &Session) -> std::io::Result<()> {
        let grid = &session.maze.grid;
        let mut previous = None;
        for &pos in session.solution.positions() {
            self.renderer
                .draw_trace_move(stdout, grid, previous, pos)?;
            previous = Some(pos);
            if App::wait_or_skip(self.path_delay)? {
                tracing::debug!("[app] Path animation skipped");
                return self
                    .renderer
                    .draw_maze(stdout, grid, Some(&session.solution));
            }
        }
        Ok(())
    }

    fn status_line(&self, session: &Session) -> String {
        let palette = self.renderer.palette();
        format!(
            "{}x{} | seed {} | path {} moves | walls: {} | path: {} | saved to {}",
            session.config.cols,
            session.config.rows,
            session.maze.seed,
            session.solution.moves(),
            palette.wall_name,
            palette.trace_name,
            session.config.output_file.display()
        )
    }

    /// Main application loop
    pub fn run(&mut self, stdout: &mut Stdout) -> Result<(), AppError> {
        let mut session = self.build_session(false)?;
        self.present(stdout, &session)?;

        loop {
            self.renderer
                .draw_status(stdout, &session.maze.grid, &self.status_line(&session))?;
            let action = App::select_from_menu(
                stdout,
                "=== A-Maze-ing === (use arrow keys and Enter, or Esc to exit)",
                &App::MENU,
            )?;
            tracing::debug!("[app] Menu action: {:?}", action);

            match action.unwrap_or(MenuAction::Quit) {
                MenuAction::Regenerate => {
                    session = self.build_session(true)?;
                    self.present(stdout, &session)?;
                }
                MenuAction::TogglePath => {
                    self.show_path = !self.show_path;
                    if self.show_path && self.animate {
                        self.animate_path(stdout, &session)?;
                    } else {
                        let trace = self.show_path.then_some(&session.solution);
                        self.renderer
                            .draw_maze(stdout, &session.maze.grid, trace)?;
                    }
                }
                MenuAction::RotateColors => {
                    let palette = self.renderer.rotate_palette();
                    tracing::info!(
                        "[app] Colors: walls {}, path {}",
                        palette.wall_name,
                        palette.trace_name
                    );
                    let trace = self.show_path.then_some(&session.solution);
                    self.renderer
                        .draw_maze(stdout, &session.maze.grid, trace)?;
                }
                MenuAction::Quit => {
                    tracing::info!("[app] Quit requested");
                    return Ok(());
                }
            }
        }
    }

    /// Present a menu of options to the user and let them select one using arrow keys
    /// Returns None if user cancels input with Esc
    /// Returns Some(T) if user selects an option and presses Enter, where T is the option type
    fn select_from_menu<T: fmt::Display + Copy>(
        stdout: &mut Stdout,
        prompt: &str,
        options: &[T],
    ) -> std::io::Result<Option<T>> {
        if options.is_empty() {
            return Ok(None);
        }

        // Highlight bars share the width of the longest option
        let labels = options
            .iter()
            .enumerate()
            .map(|(i, option)| format!(" {}. {} ", i + 1, option))
            .collect::<Vec<_>>();
        let bar_width = labels.iter().map(|label| label.width()).max().unwrap_or(0);

        // Save cursor position so we can restore / redraw
        queue!(stdout, cursor::Hide, style::Print("\r\n"), cursor::SavePosition)?;

        let mut selected = 0;

        let selected_option = loop {
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            stdout.queue(style::PrintStyledContent(
                prompt.with(Color::Yellow).attribute(Attribute::Bold),
            ))?;

            for (i, label) in labels.iter().enumerate() {
                let padded = format!("{label}{}", " ".repeat(bar_width - label.width()));
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::Reverse))?;
                }
                stdout.queue(style::Print(format!("\r\n{padded}")))?;
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::NoReverse))?;
                }
            }
            stdout.queue(style::Print("\r\n"))?;

            stdout.flush()?;

            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Up => {
                        selected = match selected {
                            0 => options.len() - 1,
                            _ => selected - 1,
                        };
                    }
                    KeyCode::Down => {
                        selected = if selected >= options.len() - 1 {
                            0
                        } else {
                            selected + 1
                        };
                    }
                    // Number keys pick an entry directly
                    KeyCode::Char(c) => {
                        if let Some(idx) = c.to_digit(10).map(|d| d as usize) {
                            if (1..=options.len()).contains(&idx) {
                                break Some(options[idx - 1]);
                            }
                        }
                    }
                    KeyCode::Enter => {
                        break Some(options[selected]);
                    }
                    KeyCode::Esc => {
                        break None;
                    }
                    _ => {}
                }
            }
        };
        // Cleanup
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown)
        )?;
        stdout.flush()?;

        Ok(selected_option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_per_frame() {
        assert_eq!(App::steps_per_frame(0), 1);
        assert_eq!(App::steps_per_frame(10), 1);
        assert_eq!(App::steps_per_frame(App::MAX_GENERATION_FRAMES), 1);
        assert_eq!(App::steps_per_frame(App::MAX_GENERATION_FRAMES + 1), 2);
        // 99x99 maze
        let frames = (99 * 99usize).div_ceil(App::steps_per_frame(99 * 99));
        assert!(frames <= App::MAX_GENERATION_FRAMES);
    }

    #[test]
    fn test_menu_labels() {
        assert_eq!(MenuAction::Regenerate.to_string(), "Re-generate a new maze");
        assert_eq!(App::MENU.last(), Some(&MenuAction::Quit));
    }

    #[test]
    fn test_build_session_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("maze.txt");
        let config_path = dir.path().join("config.txt");
        std::fs::write(
            &config_path,
            format!(
                "WIDTH=12\nHEIGHT=8\nENTRY=0,0\nEXIT=11,7\nOUTPUT_FILE={}\nPERFECT=True\nSEED=7\n",
                output.display()
            ),
        )
        .unwrap();

        let app = App::new(config_path.clone(), Some(99), false);
        let session = app.build_session(false).unwrap();
        assert_eq!(session.maze.seed, 99);
        assert!(output.exists());

        // Seed from the file when there is no override
        let app = App::new(config_path, None, false);
        assert_eq!(app.build_session(false).unwrap().maze.seed, 7);
    }
}
