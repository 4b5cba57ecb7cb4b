//! Periodic tick registration
//!
//! The scheduler only arms and disarms the tick. How the tick is produced
//! (hardware timer interrupt, executor task, plain loop) is up to the
//! firmware. [`PacedTimer`] is a portable software implementation for
//! loop-driven firmware: the caller polls it and sleeps in between.

use embassy_time::{Duration, Instant};

/// Default tick period of the indicator (25 ticks per second).
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(40);

/// Registration of the periodic tick callback
///
/// The timer itself is initialized once by the firmware. Arming again with
/// a different effect must not require re-initializing it.
pub trait TickTimer {
    /// Start delivering ticks every `period`
    fn arm(&mut self, period: Duration);

    /// Stop delivering ticks
    ///
    /// Once this returns, no tick may start until the timer is armed again.
    fn disarm(&mut self);
}

/// Result of polling a [`PacedTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    /// The tick is due now
    pub due: bool,
    /// How long to wait until the next poll (zero if behind schedule)
    pub sleep: Duration,
}

/// Software timer paced by the caller's clock.
///
/// Falling behind by more than two periods skips the backlog instead of
/// firing a burst of catch-up ticks.
///
/// # Usage
///
/// ```ignore
/// let mut timer = PacedTimer::new();
/// timer.arm(DEFAULT_TICK_PERIOD);
///
/// loop {
///     let pace = timer.poll(Instant::now());
///     if pace.due {
///         // run the tick
///     }
///     sleep(pace.sleep);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PacedTimer {
    period: Option<Duration>,
    next_deadline: Option<Instant>,
}

impl PacedTimer {
    pub const fn new() -> Self {
        Self {
            period: None,
            next_deadline: None,
        }
    }

    /// Check if ticks are being delivered
    pub const fn is_armed(&self) -> bool {
        self.period.is_some()
    }

    /// Period of the armed timer
    pub const fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Check whether a tick is due at `now`.
    ///
    /// The first poll after arming is always due. A disarmed timer is never
    /// due and asks for no particular sleep.
    pub fn poll(&mut self, now: Instant) -> Pace {
        let Some(period) = self.period else {
            return Pace {
                due: false,
                sleep: Duration::from_millis(0),
            };
        };

        let deadline = match self.next_deadline {
            Some(deadline) if now < deadline => {
                return Pace {
                    due: false,
                    sleep: deadline - now,
                };
            }
            // Too far behind: restart the cadence from now
            Some(deadline) if now > deadline + period * 2 => now,
            Some(deadline) => deadline,
            None => now,
        };

        let next = deadline + period;
        self.next_deadline = Some(next);

        let sleep = if next > now {
            next - now
        } else {
            Duration::from_millis(0)
        };
        Pace { due: true, sleep }
    }
}

impl TickTimer for PacedTimer {
    fn arm(&mut self, period: Duration) {
        self.period = Some(period);
        self.next_deadline = None;
    }

    fn disarm(&mut self) {
        self.period = None;
        self.next_deadline = None;
    }
}
