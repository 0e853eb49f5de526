use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Terminal was resized; the next draw picks up the new size
    Resize,
    /// Tick for animations and background polling
    Tick,
}

/// Event source with a steady tick cadence
pub struct EventHandler {
    tick_rate: Duration,
    last_tick: Instant,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            last_tick: Instant::now(),
        }
    }

    /// Block until a key press, a resize, or the next tick is due
    pub fn next(&mut self) -> color_eyre::Result<AppEvent> {
        loop {
            let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    // Windows reports releases and repeats too
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        return Ok(AppEvent::Key(key));
                    }
                    CrosstermEvent::Resize(_, _) => return Ok(AppEvent::Resize),
                    _ => {}
                }
            }

            if self.last_tick.elapsed() >= self.tick_rate {
                self.last_tick = Instant::now();
                return Ok(AppEvent::Tick);
            }
        }
    }
}
