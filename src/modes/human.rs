use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameSession};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::{FrameClock, GameMetrics};
use crate::render::{Renderer, Scene, Viewport};

/// Initial viewport before the terminal reports its size
const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1200.0,
    height: 600.0,
};

pub struct HumanMode {
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    viewport: Viewport,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let renderer = Renderer::new(config.tile_size);
        let session = GameSession::new(config, seed);

        Self {
            session,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            viewport: DEFAULT_VIEWPORT,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        if let Err(err) = execute!(stderr, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).context("Failed to enter alternate screen");
        }
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let mut stderr = std::io::stderr();
                let _ = execute!(stderr, LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(err).context("Failed to create terminal");
            }
        };

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal);

        self.metrics.update();
        info!("Session finished: {}", self.metrics.summary());

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        let size = terminal.size().context("Failed to query terminal size")?;
        self.viewport = Viewport::from_terminal(size.width, size.height);

        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(self.frame_period());
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut clock = FrameClock::new();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Update, then render
                _ = frame_timer.tick() => {
                    self.update_game(clock.delta());

                    let scene = Scene::compose(&self.session, self.viewport);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &scene, self.viewport);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            // Only process key press events, not repeats or releases
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match self.input_handler.handle_key_event(key) {
                    KeyAction::Move(direction) => self.session.on_input(direction),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Resize(columns, rows) => {
                self.viewport = Viewport::from_terminal(columns, rows);
                debug!("Terminal resized to {}x{}", columns, rows);
            }
            _ => {}
        }
    }

    /// Time between frames; the config guarantees a non-zero frame rate
    fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.session.config().frame_rate as f64)
    }

    fn update_game(&mut self, delta_time: f32) {
        let info = self.session.frame_update(delta_time);
        self.metrics.on_frame(info, self.session.snake().len());
    }

    /// Restore the terminal in reverse order of setup, whatever fails
    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) {
        if let Err(err) = terminal.show_cursor() {
            error!("Failed to show cursor: {}", err);
        }
        if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            error!("Failed to leave alternate screen: {}", err);
        }
        if let Err(err) = disable_raw_mode() {
            error!("Failed to disable raw mode: {}", err);
        }
    }
}
