use std::time::{Duration, Instant};

use crate::game::FrameInfo;

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub frames: u64,
    pub steps: u64,
    pub food_eaten: u32,
    pub longest_snake: usize,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            frames: 0,
            steps: 0,
            food_eaten: 0,
            longest_snake: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Record the outcome of one frame for a snake of `snake_len` segments
    pub fn on_frame(&mut self, info: FrameInfo, snake_len: usize) {
        self.frames += 1;
        if info.step_completed {
            self.steps += 1;
        }
        if info.ate_food {
            self.food_eaten += 1;
        }
        self.longest_snake = self.longest_snake.max(snake_len);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// Average frames per second over the whole session
    pub fn average_fps(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }

    /// One-line summary for the log
    pub fn summary(&self) -> String {
        format!(
            "time {} | frames {} ({:.1} fps) | steps {} | food {} | longest {}",
            self.format_time(),
            self.frames,
            self.average_fps(),
            self.steps,
            self.food_eaten,
            self.longest_snake
        )
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
