//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it one frame at a time.

pub mod config;
pub mod direction;
pub mod geometry;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use geometry::{isometric_project, Grid, Vec2};
pub use session::{FrameInfo, GameSession};
pub use snake::{Motion, Segment, SegmentKey, Snake};
