/// Default per-question countdown, in seconds.
pub const DEFAULT_QUESTION_SECONDS: u32 = 30;

/// Outcome of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Paused; nothing advanced.
    Paused,
    /// The countdown is still running.
    Counting,
    /// The countdown reached zero on this tick.
    Expired,
    /// The countdown was already at zero; only elapsed time advanced.
    Overtime,
}

/// Per-question countdown plus cumulative session time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    question_seconds: u32,
    time_left: u32,
    time_spent: u64,
    paused: bool,
}

impl Timer {
    pub fn new(question_seconds: u32) -> Self {
        Self {
            question_seconds,
            time_left: question_seconds,
            time_spent: 0,
            paused: false,
        }
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn time_spent(&self) -> u64 {
        self.time_spent
    }

    pub fn question_seconds(&self) -> u32 {
        self.question_seconds
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advances both counters by one second unless paused.
    pub fn tick(&mut self) -> Tick {
        if self.paused {
            return Tick::Paused;
        }

        self.time_spent += 1;
        if self.time_left == 0 {
            return Tick::Overtime;
        }
        self.time_left -= 1;
        if self.time_left == 0 {
            Tick::Expired
        } else {
            Tick::Counting
        }
    }

    /// Fresh countdown for a new question; elapsed time is kept.
    pub fn reset_time_left(&mut self) {
        self.time_left = self.question_seconds;
    }

    /// Back to the initial state, used on a full restart.
    pub fn reset(&mut self) {
        self.time_left = self.question_seconds;
        self.time_spent = 0;
        self.paused = false;
    }

    /// Restores elapsed time from a resumed session.
    pub fn restore_time_spent(&mut self, seconds: u64) {
        self.time_spent = seconds;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_time_left_keeps_time_spent() {
        let mut timer = Timer::new(30);
        timer.tick();
        timer.restore_time_spent(42);
        timer.reset_time_left();

        assert_eq!(timer.time_spent(), 42);
        assert_eq!(timer.time_left(), 30);

        timer.pause();
        timer.reset();
        assert_eq!(timer.time_spent(), 0);
        assert_eq!(timer.time_left(), 30);
        assert!(!timer.is_paused());
    }

    #[test]
    fn test_countdown_expiry() {
        let mut timer = Timer::new(2);
        assert_eq!(timer.tick(), Tick::Counting);
        assert_eq!(timer.tick(), Tick::Expired);
        assert_eq!(timer.tick(), Tick::Overtime);
        assert_eq!(timer.time_left(), 0);
        assert_eq!(timer.time_spent(), 3);
    }

    #[test]
    fn test_pause_freezes_both_counters() {
        let mut timer = Timer::new(10);
        timer.tick();
        timer.toggle_pause();
        assert_eq!(timer.tick(), Tick::Paused);
        assert_eq!((timer.time_left(), timer.time_spent()), (9, 1));

        timer.resume();
        timer.tick();
        assert_eq!((timer.time_left(), timer.time_spent()), (8, 2));
    }
}
