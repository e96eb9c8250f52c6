use anyhow::{Context, Result};
use clap::Parser;
use iso_snake::game::{GameConfig, GameSession};
use iso_snake::modes::HumanMode;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "iso_snake")]
#[command(version, about = "Isometric wrap-around Snake for the terminal")]
struct Cli {
    /// JSON file with game settings; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in tiles
    #[arg(long)]
    columns: Option<usize>,

    /// Grid height in tiles
    #[arg(long)]
    rows: Option<usize>,

    /// Tile edge length in whole pixels
    #[arg(long)]
    tile_size: Option<f32>,

    /// Snake speed in pixels per second
    #[arg(long)]
    velocity: Option<f32>,

    /// Frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for food placement (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "iso_snake.log")]
    log_file: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(tile_size) = self.tile_size {
            config.tile_size = tile_size;
        }
        if let Some(velocity) = self.velocity {
            config.velocity = velocity;
        }
        if let Some(fps) = self.fps {
            config.frame_rate = fps;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(&cli.log_file, cli.log_level)?;

    // Create game configuration from CLI arguments
    let config = cli.game_config()?;
    let seed = cli.seed.unwrap_or_else(GameSession::seed_from_clock);

    info!(
        "Starting iso_snake: {}x{} grid, tile {}, velocity {}, {} fps, seed {}",
        config.columns, config.rows, config.tile_size, config.velocity, config.frame_rate, seed
    );

    let mut human_mode = HumanMode::new(config, seed);
    human_mode.run().await?;

    Ok(())
}
