//! Fixed-interval autosave schedule.
//!
//! The scheduler does not own a timer thread. The host polls it with the
//! current time (from a [`Clock`](crate::clock::Clock)) and it answers whether
//! a tick is due. Tests drive it with a manual clock; the terminal client
//! polls it from its input loop.

pub const DEFAULT_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone)]
pub struct AutosaveScheduler {
    interval_ms: u64,
    last_tick: Option<i64>,
}

impl Default for AutosaveScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS)
    }
}

impl AutosaveScheduler {
    /// An interval of zero disables autosave.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_tick: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_ms > 0
    }

    /// Returns true when at least one interval has elapsed since the last
    /// tick. The first poll only arms the schedule. Several missed intervals
    /// collapse into a single tick.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now_ms);
            return false;
        };

        let interval = i64::try_from(self.interval_ms).unwrap_or(i64::MAX);
        let elapsed = now_ms - last;
        if elapsed < interval {
            // Also covers a clock that jumped backwards.
            if elapsed < 0 {
                self.last_tick = Some(now_ms);
            }
            return false;
        }
        self.last_tick = Some(last + (elapsed / interval) * interval);
        true
    }

    /// Forget the schedule, e.g. after an explicit save.
    pub fn reset(&mut self, now_ms: i64) {
        self.last_tick = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_poll_arms_without_firing() {
        let mut scheduler = AutosaveScheduler::new(1_000);
        assert!(!scheduler.poll(0));
        assert!(!scheduler.poll(999));
        assert!(scheduler.poll(1_000));
    }

    #[test]
    fn fires_once_per_interval() {
        let mut scheduler = AutosaveScheduler::new(1_000);
        scheduler.poll(0);
        let fired: Vec<bool> = (1..=6).map(|i| scheduler.poll(i * 500)).collect();
        assert_eq!(fired, vec![false, true, false, true, false, true]);
    }

    #[test]
    fn missed_ticks_collapse() {
        let mut scheduler = AutosaveScheduler::new(1_000);
        scheduler.poll(0);
        assert!(scheduler.poll(5_500));
        assert!(!scheduler.poll(5_900));
        assert!(scheduler.poll(6_000));
    }

    #[test]
    fn zero_interval_disables() {
        let mut scheduler = AutosaveScheduler::new(0);
        assert!(!scheduler.poll(0));
        assert!(!scheduler.poll(1_000_000));
    }

    #[test]
    fn huge_interval_never_fires() {
        let mut scheduler = AutosaveScheduler::new(u64::MAX);
        scheduler.poll(0);
        let fired: Vec<bool> = [10, 20, 30].iter().map(|&t| scheduler.poll(t)).collect();
        assert_eq!(fired, vec![false, false, false]);
        assert!(!scheduler.poll(i64::MAX - 1));
    }

    #[test]
    fn backwards_clock_rearms() {
        let mut scheduler = AutosaveScheduler::new(1_000);
        scheduler.poll(10_000);
        assert!(!scheduler.poll(2_000));
        assert!(scheduler.poll(3_000));
    }

    #[test]
    fn reset_pushes_next_tick() {
        let mut scheduler = AutosaveScheduler::new(1_000);
        scheduler.poll(0);
        scheduler.reset(900);
        assert!(!scheduler.poll(1_000));
        assert!(scheduler.poll(1_900));
    }
}
