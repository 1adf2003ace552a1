use amazeing::{GenerationConfig, Position, generate, serialize, solve};

/// Generates and solves the largest supported maze repeatedly, without a terminal.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(1);

    let (rows, cols) = (99, 99);
    let entry = Position::new(0, 0);
    let exit = Position::new(rows - 1, cols - 1);
    for seed in 0..num_iters {
        let config = GenerationConfig::new(rows, cols, entry, exit)
            .with_perfect(seed % 2 == 0)
            .with_seed(seed);
        let maze = generate(&config)?;
        let path = solve(&maze.grid, entry, exit)?;
        let bytes = serialize(&maze.grid);
        println!(
            "seed {seed}: {} steps, {} moves, {} bytes",
            maze.steps.len(),
            path.moves(),
            bytes.len()
        );
    }
    Ok(())
}
