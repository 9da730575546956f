//! Converts elapsed wall-clock time into whole ticks.

use std::time::Instant;

use spoor_core::Tickable;
use tracing::warn;

/// Slack used when comparing the accumulator against the period, so that
/// an elapsed time equal to `k * period` yields exactly `k` ticks despite
/// float rounding.
const EPSILON: f64 = 1e-9;

/// Fixed-period tick scheduler with carry-over and a catch-up cap.
///
/// Elapsed time is accumulated; every full period in the accumulator runs
/// one tick of the target and the remainder carries over to the next call.
///
/// # Examples
///
/// ```
/// use spoor_core::Tickable;
/// use spoor_engine::TickScheduler;
///
/// struct Counter(u32);
/// impl Tickable for Counter {
///     fn period(&self) -> f64 { 0.1 }
///     fn tick(&mut self) { self.0 += 1; }
/// }
///
/// let mut c = Counter(0);
/// let mut s = TickScheduler::new();
/// assert_eq!(s.advance(&mut c, 0.25, 10), 2);
/// assert_eq!(s.advance(&mut c, 0.05, 10), 1); // 0.05 carried + 0.05
/// assert_eq!(c.0, 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TickScheduler {
    accumulator: f64,
    running: bool,
    reference: Option<Instant>,
}

impl TickScheduler {
    /// A stopped scheduler with an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the scheduler. The next [`poll`](Self::poll) only captures the
    /// clock reference.
    pub fn start(&mut self) {
        self.running = true;
        self.reference = None;
    }

    /// Disarm the scheduler and forget the clock reference.
    pub fn stop(&mut self) {
        self.running = false;
        self.reference = None;
    }

    /// Whether the scheduler is armed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds carried over from previous calls, always below one period
    /// after a call returns.
    pub fn carry(&self) -> f64 {
        self.accumulator
    }

    /// Add `elapsed` seconds and run every full period on `target`.
    ///
    /// At most `max_ticks` ticks run per call (0 means uncapped): the
    /// elapsed time considered is clamped to `max_ticks * period`, so a long
    /// stall does not turn into a burst of catch-up ticks. Negative and NaN
    /// elapsed times count as 0. Returns the number of ticks executed.
    pub fn advance<T: Tickable + ?Sized>(
        &mut self,
        target: &mut T,
        elapsed: f64,
        max_ticks: u32,
    ) -> u32 {
        let period = target.period();
        if !(period.is_finite() && period > 0.0) {
            return 0;
        }
        let mut elapsed = if elapsed > 0.0 { elapsed } else { 0.0 };
        if max_ticks > 0 {
            let budget = f64::from(max_ticks) * period;
            if elapsed > budget {
                warn!(elapsed, budget, "tick backlog clamped");
                elapsed = budget;
            }
        }
        self.accumulator += elapsed;

        let limit = if max_ticks == 0 { u32::MAX } else { max_ticks };
        let mut ticks = 0;
        while ticks < limit && self.accumulator + EPSILON >= period {
            target.tick();
            self.accumulator -= period;
            ticks += 1;
        }
        self.accumulator = self.accumulator.max(0.0);
        if self.accumulator + EPSILON >= period {
            // Capped with a full period still pending: drop it.
            self.accumulator %= period;
        }
        ticks
    }

    /// Advance by the time since the previous poll.
    ///
    /// Does nothing while stopped. The first poll after
    /// [`start`](Self::start) captures `now` as the reference and runs no
    /// tick.
    pub fn poll<T: Tickable + ?Sized>(&mut self, target: &mut T, now: Instant, max_ticks: u32) -> u32 {
        if !self.running {
            return 0;
        }
        match self.reference.replace(now) {
            None => 0,
            Some(prev) => {
                let elapsed = now.saturating_duration_since(prev).as_secs_f64();
                self.advance(target, elapsed, max_ticks)
            }
        }
    }
}
