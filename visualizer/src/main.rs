//! Terminal pathfinding visualizer.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use pathviz::{Engine, EngineConfig, Speed, VisualizerModel, config};
use pathviz_core::app::{App, AppConfig};
use pathviz_core::Point;
use pathviz_crossterm::CrosstermDriver;
use pathviz_maze::MazeKind;
use pathviz_paths::Algorithm;

#[derive(Debug, Parser)]
#[command(version, about = "Watch Dijkstra, A*, BFS and DFS explore a grid")]
struct Cli {
    /// Board height in cells.
    #[arg(long, default_value_t = config::DEFAULT_ROWS)]
    rows: i32,
    /// Board width in cells.
    #[arg(long, default_value_t = config::DEFAULT_COLS)]
    cols: i32,
    /// Start cell as `row,col`.
    #[arg(long, value_parser = parse_point, default_value = "5,5")]
    start: Point,
    /// Finish cell as `row,col`.
    #[arg(long, value_parser = parse_point, default_value = "5,15")]
    finish: Point,
    /// Replay speed: fast, average or slow.
    #[arg(long, default_value_t = Speed::Average)]
    speed: Speed,
    /// Pause before each shortest-path step, in milliseconds.
    #[arg(long, default_value_t = config::DEFAULT_PATH_DELAY_MS)]
    path_delay: u64,
    /// Initial algorithm: Dijkstra, AStar, BFS or DFS.
    #[arg(long, default_value_t = Algorithm::Dijkstra)]
    algorithm: Algorithm,
    /// Initial maze: none, basic or recursiveDivision.
    #[arg(long, default_value_t = MazeKind::None)]
    maze: MazeKind,
    /// Wall probability of the basic maze.
    #[arg(long, default_value_t = pathviz_maze::DEFAULT_DENSITY)]
    density: f64,
    /// Seed for reproducible mazes.
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs to this file; the terminal is busy drawing the board.
    #[arg(long, default_value = "pathviz.log")]
    log_file: PathBuf,
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            rows: self.rows,
            cols: self.cols,
            start: self.start,
            finish: self.finish,
            speed: self.speed,
            path_delay_ms: self.path_delay,
            wall_density: self.density,
            seed: self.seed,
            algorithm: self.algorithm,
            maze: self.maze,
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (r, c) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got `{s}`"))?;
    let row = r.trim().parse().map_err(|e| format!("bad row `{r}`: {e}"))?;
    let col = c.trim().parse().map_err(|e| format!("bad column `{c}`: {e}"))?;
    Ok(Point::new(row, col))
}

fn init_logger(path: &Path, level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = ConfigBuilder::new();
    builder.set_target_level(LevelFilter::Error);
    builder.set_thread_level(LevelFilter::Off);
    WriteLogger::init(level, builder.build(), File::create(path)?)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(&cli.log_file, cli.log_level())?;

    let config = cli.engine_config();
    let (rows, cols) = (config.rows, config.cols);
    let engine = Engine::new(config)?;

    let mut app = App::new(AppConfig {
        model: VisualizerModel::new(engine),
        driver: CrosstermDriver::new(),
        rows,
        cols,
    });
    app.run()?;
    log::info!("bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_engine_defaults() {
        let cli = Cli::parse_from(["pathviz"]);
        assert_eq!(cli.engine_config(), EngineConfig::default());
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "pathviz",
            "--rows",
            "10",
            "--start",
            "1, 2",
            "--algorithm",
            "bfs",
            "--maze",
            "recursive-division",
            "--speed",
            "fast",
            "--seed",
            "9",
            "-vv",
        ]);
        let cfg = cli.engine_config();
        assert_eq!(cfg.rows, 10);
        assert_eq!(cfg.start, Point::new(1, 2));
        assert_eq!(cfg.algorithm, Algorithm::Bfs);
        assert_eq!(cfg.maze, MazeKind::RecursiveDivision);
        assert_eq!(cfg.speed, Speed::Fast);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cli.log_level(), LevelFilter::Trace);
    }

    #[test]
    fn point_parser() {
        assert_eq!(parse_point("3,4"), Ok(Point::new(3, 4)));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,4").is_err());
    }
}
