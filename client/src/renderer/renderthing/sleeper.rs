use std::time::{Duration, Instant};

/// Throttles a loop to at most one iteration per `target_delta_time`.
pub struct Sleeper {
    pub target_delta_time: Duration,
    last_instant: Option<Instant>,
}

impl Sleeper {
    pub fn new(target_delta_time: Duration) -> Self {
        Self {
            target_delta_time,
            last_instant: None,
        }
    }

    pub fn from_fps(target_fps: u64) -> Self {
        Self::new(Duration::from_micros(1_000_000 / target_fps.max(1)))
    }

    /// Sleeps away whatever is left of the current frame. Returns whether it had to sleep at all.
    pub fn sleep(&mut self) -> bool {
        let slept = match self.remaining(Instant::now()) {
            Some(remaining) => {
                spin_sleep::sleep(remaining);
                true
            }
            None => false,
        };

        self.last_instant = Some(Instant::now());
        slept
    }

    fn remaining(&self, now: Instant) -> Option<Duration> {
        // Never having slept counts as running late.
        let last_instant = self.last_instant?;

        self.target_delta_time
            .checked_sub(now.saturating_duration_since(last_instant))
            .filter(|remaining| !remaining.is_zero())
    }
}
