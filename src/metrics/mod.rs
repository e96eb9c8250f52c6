pub mod frame_clock;
pub mod game_metrics;

pub use frame_clock::FrameClock;
pub use game_metrics::GameMetrics;
