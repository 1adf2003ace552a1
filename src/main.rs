use std::path::PathBuf;
use std::process::ExitCode;

use amazeing::app::App;
use clap::Parser;

/// Generate, solve, and animate a maze with a "42" carved into it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Configuration file (KEY=VALUE lines)
    config: PathBuf,

    /// Seed for the first maze, overriding SEED from the configuration file
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the finished maze directly instead of replaying the carving
    #[arg(long)]
    no_animation: bool,

    /// File receiving the log output
    #[arg(long, default_value = "amazeing.log")]
    log_file: PathBuf,

    /// Most verbose level written to the log file
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

/// Routes tracing output to `path`, since the terminal is taken by the maze.
/// The returned guard flushes pending records when dropped.
fn init_logging(
    path: &std::path::Path,
    level: tracing::Level,
) -> tracing_appender::non_blocking::WorkerGuard {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file_name = path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("amazeing.log"));
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    guard
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_logging(&cli.log_file, cli.log_level);
    tracing::info!("[main] Starting with {}", cli.config.display());

    let mut stdout = std::io::stdout();
    let mut app = App::new(cli.config, cli.seed, !cli.no_animation);

    let result = App::setup_terminal(&mut stdout)
        .map_err(amazeing::error::AppError::from)
        .and_then(|()| app.run(&mut stdout));
    let restored = App::restore_terminal(&mut stdout);

    match (result, restored) {
        (Ok(()), Ok(())) => ExitCode::SUCCESS,
        (Err(err), _) => {
            tracing::error!("[main] {}", err);
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
        (Ok(()), Err(err)) => {
            tracing::error!("[main] Failed to restore terminal: {}", err);
            eprintln!("Error: failed to restore terminal: {err}");
            ExitCode::FAILURE
        }
    }
}
