use std::{
    sync::{
        Arc, RwLock,
        mpsc::{self, RecvTimeoutError, Sender},
    },
    thread,
    time::{Duration, Instant},
};

use crate::State;

/// Time between automatic generations, kept within `[MIN, MAX]` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePeriod(u64);

impl CyclePeriod {
    pub const MIN: u64 = 64;
    pub const MAX: u64 = 8192;

    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(Self::MIN, Self::MAX))
    }

    pub fn millis(self) -> u64 {
        self.0
    }

    pub fn duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    pub fn slower(self) -> Self {
        Self::from_millis(self.0.saturating_mul(2))
    }

    pub fn faster(self) -> Self {
        Self::from_millis(self.0 / 2)
    }
}

impl Default for CyclePeriod {
    fn default() -> Self {
        Self(1024)
    }
}

enum TickerMessage {
    Interval(Duration),
    Stop,
}

/// Handle to a background thread advancing the grid once per interval.
pub struct TickerHost {
    sender: Sender<TickerMessage>,
}

impl TickerHost {
    pub fn start(state_arc: Arc<RwLock<State>>, mut interval: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let mut last_tick = Instant::now();

            'ticking: loop {
                let timeout = (last_tick + interval).saturating_duration_since(Instant::now());

                match receiver.recv_timeout(timeout) {
                    Ok(TickerMessage::Interval(new_interval)) => {
                        interval = new_interval;
                        continue;
                    }
                    Ok(TickerMessage::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }

                let mut state = state_arc.write().unwrap();

                // Pausing and rate changes are sent while holding this lock, so anything
                // that arrived while we waited for it has to be applied before advancing.
                for message in receiver.try_iter() {
                    match message {
                        TickerMessage::Interval(new_interval) => interval = new_interval,
                        TickerMessage::Stop => break 'ticking,
                    }
                }

                if Instant::now() < last_tick + interval {
                    continue;
                }

                state.grid.advance();
                drop(state);

                last_tick = Instant::now();
            }

            log::debug!("Ticker thread stopped");
        });

        Self { sender }
    }

    pub fn stop(self) {
        // The thread may already be gone, which is what we want anyway.
        let _ = self.sender.send(TickerMessage::Stop);
    }

    pub fn set_interval(&self, interval: Duration) {
        let _ = self.sender.send(TickerMessage::Interval(interval));
    }
}

/// Decides when the grid advances on its own. Paused whenever no ticker is running.
#[derive(Default)]
pub struct Pacer {
    period: CyclePeriod,
    ticker: Option<TickerHost>,
}

impl Pacer {
    pub fn new(period: CyclePeriod) -> Self {
        Self {
            period,
            ticker: None,
        }
    }

    pub fn period(&self) -> CyclePeriod {
        self.period
    }

    pub fn is_paused(&self) -> bool {
        self.ticker.is_none()
    }

    pub fn set_period(&mut self, period: CyclePeriod) {
        self.period = period;

        if let Some(ticker) = &self.ticker {
            ticker.set_interval(period.duration());
        }
    }

    fn resume(&mut self, state_arc: Arc<RwLock<State>>) {
        if self.ticker.is_none() {
            self.ticker = Some(TickerHost::start(state_arc, self.period.duration()));
        }
    }

    fn pause(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }
}

pub fn resume(state_arc: &Arc<RwLock<State>>) {
    let mut state = state_arc.write().unwrap();
    if state.pacer.is_paused() {
        state.pacer.resume(state_arc.clone());
        log::info!("Game is now unpaused");
    }
}

pub fn pause(state_arc: &Arc<RwLock<State>>) {
    let mut state = state_arc.write().unwrap();
    if !state.pacer.is_paused() {
        state.pacer.pause();
        log::info!("Game is now paused");
    }
}

pub fn toggle_pause(state_arc: &Arc<RwLock<State>>) {
    let paused = state_arc.read().unwrap().pacer.is_paused();

    if paused {
        resume(state_arc);
    } else {
        pause(state_arc);
    }
}

pub fn set_period(state_arc: &Arc<RwLock<State>>, period: CyclePeriod) {
    state_arc.write().unwrap().pacer.set_period(period);
    log::info!("New cycle period: {} ms", period.millis());
}

pub fn slow_down(state_arc: &Arc<RwLock<State>>) {
    let period = state_arc.read().unwrap().pacer.period().slower();
    set_period(state_arc, period);
}

pub fn speed_up(state_arc: &Arc<RwLock<State>>) {
    let period = state_arc.read().unwrap().pacer.period().faster();
    set_period(state_arc, period);
}

#[cfg(test)]
mod tests {
    use liblife::Grid;

    use super::*;

    fn test_state() -> Arc<RwLock<State>> {
        let mut grid = Grid::new(10, 10).unwrap();
        for pos in [(5, 4), (5, 5), (5, 6)] {
            grid.toggle(pos).unwrap();
        }

        Arc::new(RwLock::new(State::new(grid, Pacer::default())))
    }

    #[test]
    fn period_doubles_and_halves_within_bounds() {
        let period = CyclePeriod::default();
        assert_eq!(period.millis(), 1024);
        assert_eq!(period.slower().millis(), 2048);
        assert_eq!(period.faster().millis(), 512);

        let mut slowest = period;
        for _ in 0..10 {
            slowest = slowest.slower();
        }
        assert_eq!(slowest.millis(), CyclePeriod::MAX);

        let mut fastest = period;
        for _ in 0..10 {
            fastest = fastest.faster();
        }
        assert_eq!(fastest.millis(), CyclePeriod::MIN);
    }

    #[test]
    fn period_is_clamped_on_creation() {
        assert_eq!(CyclePeriod::from_millis(0).millis(), CyclePeriod::MIN);
        assert_eq!(CyclePeriod::from_millis(100_000).millis(), CyclePeriod::MAX);
        assert_eq!(CyclePeriod::from_millis(300).millis(), 300);
    }

    #[test]
    fn pacer_starts_paused_and_toggles() {
        let state_arc = test_state();
        assert!(state_arc.read().unwrap().pacer.is_paused());

        toggle_pause(&state_arc);
        assert!(!state_arc.read().unwrap().pacer.is_paused());

        toggle_pause(&state_arc);
        assert!(state_arc.read().unwrap().pacer.is_paused());
    }

    #[test]
    fn running_ticker_advances_grid() {
        let state_arc = test_state();
        state_arc.write().unwrap().pacer.set_period(CyclePeriod::from_millis(CyclePeriod::MIN));

        resume(&state_arc);
        thread::sleep(Duration::from_millis(CyclePeriod::MIN * 8));
        pause(&state_arc);

        assert!(state_arc.read().unwrap().grid.generation() >= 1);
    }

    #[test]
    fn pause_while_ticker_waits_for_lock_skips_pending_generation() {
        let state_arc = test_state();
        set_period(&state_arc, CyclePeriod::from_millis(CyclePeriod::MIN));
        resume(&state_arc);

        let generation_at_pause = {
            let mut state = state_arc.write().unwrap();
            // Long enough for the ticker to time out and block on the lock.
            thread::sleep(Duration::from_millis(CyclePeriod::MIN * 2 + 20));
            state.pacer.pause();
            state.grid.generation()
        };

        thread::sleep(Duration::from_millis(CyclePeriod::MIN * 5));

        assert_eq!(state_arc.read().unwrap().grid.generation(), generation_at_pause);
    }

    #[test]
    fn faster_rate_applies_without_waiting_out_old_period() {
        let state_arc = test_state();
        set_period(&state_arc, CyclePeriod::from_millis(CyclePeriod::MAX));
        resume(&state_arc);

        thread::sleep(Duration::from_millis(50));
        set_period(&state_arc, CyclePeriod::from_millis(CyclePeriod::MIN));
        thread::sleep(Duration::from_millis(CyclePeriod::MIN * 6));
        pause(&state_arc);

        assert!(state_arc.read().unwrap().grid.generation() >= 1);
    }

    #[test]
    fn paused_pacer_never_advances() {
        let state_arc = test_state();
        set_period(&state_arc, CyclePeriod::from_millis(CyclePeriod::MIN));

        thread::sleep(Duration::from_millis(CyclePeriod::MIN * 3));

        assert_eq!(state_arc.read().unwrap().grid.generation(), 0);
    }
}
