//! Pausable recording clock

use std::time::{Duration, Instant};

/// Monotonic clock for tracking elapsed recording time.
///
/// Advances while running, freezes while paused. Resuming re-bases the start
/// reference on the current instant, so elapsed time continues seamlessly
/// from where it was paused regardless of how long the pause lasted.
#[derive(Debug, Default)]
pub struct RecordingClock {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl RecordingClock {
    /// Create a stopped clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to zero and begin advancing
    pub fn start(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    /// Freeze the clock, folding the running span into the total.
    /// No-op if already paused or never started.
    pub fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
    }

    /// Continue advancing from the frozen total.
    /// No-op if already running.
    pub fn resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    /// Stop the clock, freezing the final total
    pub fn stop(&mut self) {
        self.pause();
    }

    /// Elapsed recording time, excluding paused spans
    pub fn elapsed(&self) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + since.elapsed(),
            None => self.accumulated,
        }
    }

    /// Whether the clock is currently advancing
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn new_clock_is_zero_and_stopped() {
        let clock = RecordingClock::new();
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert!(!clock.is_running());
    }

    #[test]
    fn advances_while_running() {
        let mut clock = RecordingClock::new();
        clock.start();
        sleep(Duration::from_millis(15));
        assert!(clock.elapsed() >= Duration::from_millis(10));
        assert!(clock.is_running());
    }

    #[test]
    fn frozen_while_paused() {
        let mut clock = RecordingClock::new();
        clock.start();
        sleep(Duration::from_millis(10));
        clock.pause();
        let at_pause = clock.elapsed();
        sleep(Duration::from_millis(30));
        assert_eq!(clock.elapsed(), at_pause);
        assert!(!clock.is_running());
    }

    #[test]
    fn resume_continues_without_drift() {
        let mut clock = RecordingClock::new();
        clock.start();
        sleep(Duration::from_millis(10));
        clock.pause();
        let at_pause = clock.elapsed();

        // Time spent paused must not leak into the total
        sleep(Duration::from_millis(50));
        clock.resume();
        let just_after_resume = clock.elapsed();

        assert!(just_after_resume >= at_pause);
        assert!(just_after_resume - at_pause < Duration::from_millis(20));
    }

    #[test]
    fn start_resets_to_zero() {
        let mut clock = RecordingClock::new();
        clock.start();
        sleep(Duration::from_millis(10));
        clock.stop();
        assert!(clock.elapsed() > Duration::ZERO);

        clock.start();
        assert!(clock.elapsed() < Duration::from_millis(5));
    }

    #[test]
    fn double_pause_and_double_resume_are_noops() {
        let mut clock = RecordingClock::new();
        clock.start();
        clock.pause();
        let frozen = clock.elapsed();
        clock.pause();
        assert_eq!(clock.elapsed(), frozen);

        clock.resume();
        clock.resume();
        assert!(clock.is_running());
    }

    #[test]
    fn stop_freezes_final_total() {
        let mut clock = RecordingClock::new();
        clock.start();
        sleep(Duration::from_millis(10));
        clock.stop();
        let total = clock.elapsed();
        sleep(Duration::from_millis(20));
        assert_eq!(clock.elapsed(), total);
    }
}
