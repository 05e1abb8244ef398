use std::time::Duration;

/// Paces the poll loop between cycles.
pub trait Ticker {
    fn wait(&mut self);
}

/// Blocks the calling thread for a fixed interval. No jitter, no catch-up.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTicker {
    interval: Duration,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Ticker for IntervalTicker {
    fn wait(&mut self) {
        std::thread::sleep(self.interval);
    }
}
