use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::geometry::Grid;

/// Largest grid edge, in tiles
pub const MAX_TILES: usize = 1024;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of tile columns
    pub columns: usize,
    /// Number of tile rows
    pub rows: usize,
    /// Edge length of a tile in pixels
    pub tile_size: f32,
    /// Snake speed in pixels per second
    pub velocity: f32,
    /// Target frames per second of the render loop
    pub frame_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 30,
            rows: 30,
            tile_size: 16.0,
            velocity: 150.0,
            frame_rate: 60,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.columns >= 2 && self.rows >= 2,
            "grid must be at least 2x2, got {}x{}",
            self.columns,
            self.rows
        );
        ensure!(
            self.columns <= MAX_TILES && self.rows <= MAX_TILES,
            "grid must be at most {}x{} tiles, got {}x{}",
            MAX_TILES,
            MAX_TILES,
            self.columns,
            self.rows
        );
        // Tile positions are compared exactly, so they must stay whole numbers
        ensure!(
            self.tile_size > 0.0 && self.tile_size.fract() == 0.0,
            "tile size must be a positive whole number, got {}",
            self.tile_size
        );
        ensure!(self.velocity > 0.0, "velocity must be positive");
        ensure!(self.frame_rate > 0, "frame rate must be positive");
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.columns, self.rows, self.tile_size)
    }
}
