//! Iso Snake - an isometric, wrap-around Snake for the terminal
//!
//! This library provides:
//! - Core game logic: the segment chain, stepping and growth (game module)
//! - Keyboard mapping (input module)
//! - Isometric canvas rendering (render module)
//! - Frame timing and session statistics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
