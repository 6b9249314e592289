//! mazelab — generate mazes, run instrumented searches, and replay the
//! recorded traces in the console.

mod mazegen;
mod render;

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};

use mazetrace_core::{Algorithm, Maze, Position, codec};
use mazetrace_replay::Replay;

#[derive(Parser)]
#[command(name = "mazelab", about = "Maze search with recorded, replayable traces")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a random maze file.
    Gen {
        /// Number of rows.
        #[arg(long, default_value_t = 10)]
        rows: usize,
        /// Number of columns.
        #[arg(long, default_value_t = 20)]
        cols: usize,
        /// Percentage of wall cells (0-100).
        #[arg(long, default_value_t = 30)]
        wall_pct: u32,
        /// Output maze file.
        output: PathBuf,
    },
    /// Run a search over a maze file and persist its trace.
    Run {
        /// Maze file to search.
        maze: PathBuf,
        /// Search algorithm: BFS, DFS, or A*.
        #[arg(long, default_value = "BFS")]
        algorithm: Algorithm,
        /// Trace output file (defaults to history_<algorithm>.csv).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replay a persisted trace in the console.
    View {
        /// Trace file to replay.
        trace: PathBuf,
        /// Milliseconds between playback steps.
        #[arg(long, default_value_t = 60)]
        interval_ms: u64,
        /// Seek to this step and render one frame instead of playing.
        #[arg(long)]
        steps: Option<usize>,
        /// Overlay the final path.
        #[arg(long)]
        show_path: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Gen {
            rows,
            cols,
            wall_pct,
            output,
        } => generate(rows, cols, wall_pct, &output),
        Command::Run {
            maze,
            algorithm,
            output,
        } => run_search(&maze, algorithm, output),
        Command::View {
            trace,
            interval_ms,
            steps,
            show_path,
        } => view(&trace, interval_ms, steps, show_path),
    }
}

fn generate(
    rows: usize,
    cols: usize,
    wall_pct: u32,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if rows * cols < 2 {
        return Err("maze needs at least two cells".into());
    }
    if wall_pct > 100 {
        return Err("wall percentage must be between 0 and 100".into());
    }
    let text = mazegen::random_maze(&mut rand::rng(), rows, cols, wall_pct);
    fs::write(output, &text)?;
    println!(
        "Saved maze to {} ({rows}x{cols}, {wall_pct}% walls).",
        output.display()
    );
    Ok(())
}

/// File-name form of the algorithm (`A*` is not filesystem-friendly).
fn file_stem(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Bfs => "BFS",
        Algorithm::Dfs => "DFS",
        Algorithm::AStar => "AStar",
    }
}

fn run_search(
    maze_file: &Path,
    algorithm: Algorithm,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(maze_file)?;
    let maze = Maze::parse(&text)?;
    log::info!(
        "searching {}x{} maze with {algorithm}",
        maze.rows(),
        maze.cols()
    );

    let trace = mazetrace_search::run(&maze, algorithm);

    let output = output
        .unwrap_or_else(|| PathBuf::from(format!("history_{}.csv", file_stem(algorithm))));
    let mut writer = BufWriter::new(fs::File::create(&output)?);
    codec::encode(&trace, &mut writer)?;
    writer.flush()?;

    println!();
    print!("{}", render::maze_with_path(&maze, &trace.path));
    println!();
    if trace.path.is_empty() {
        println!("No path found from A to B.");
        println!("Number of steps: 0");
    } else {
        println!("Number of steps: {}", trace.path.len() - 1);
    }
    println!("Number of steps explored: {}", trace.expanded_count());
    println!("Wrote replay file: {}", output.display());
    Ok(())
}

fn view(
    trace_file: &Path,
    interval_ms: u64,
    steps: Option<usize>,
    show_path: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut replay = Replay::load(BufReader::new(fs::File::open(trace_file)?))?;
    let total = replay.trace().events.len();
    let path = show_path.then(|| replay.trace().path.clone());

    if let Some(n) = steps {
        replay.seek(n);
        print_frame(&replay, path.as_deref(), total);
        return Ok(());
    }

    print_frame(&replay, path.as_deref(), total);
    let mut pending = replay.play(Duration::from_millis(interval_ms));
    while let Some(token) = pending {
        thread::sleep(token.delay());
        pending = replay.tick(token);
        print_frame(&replay, path.as_deref(), total);
    }
    Ok(())
}

fn print_frame(replay: &Replay, path: Option<&[Position]>, total: usize) {
    let overlay = replay.overlay();
    // Clear the terminal and home the cursor between frames.
    print!("\x1b[2J\x1b[H");
    print!(
        "{}",
        render::maze_with_overlay(&replay.trace().maze, &overlay, path)
    );
    println!(
        "{} | step {}/{total}",
        replay.trace().algorithm,
        overlay.step
    );
}
