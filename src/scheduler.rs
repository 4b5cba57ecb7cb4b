//! Effect scheduler
//!
//! Owns at most one running effect together with the periodic tick that
//! drives it. Switching effects always tears the previous one down first, so
//! only one effect ever writes to the strip.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use embassy_time::{Duration, Instant};

use crate::effect::{EffectId, EffectParams, EffectSlot};
use crate::strip::LedStrip;
use crate::timer::{DEFAULT_TICK_PERIOD, PacedTimer, TickTimer};
use crate::topology::{RingTopology, TopologyError};

/// Configuration for the effect scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Period of the effect tick
    pub tick_period: Duration,
    /// Gap between ticks, in periods, above which ticks count as missed
    pub max_drift_periods: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_period: DEFAULT_TICK_PERIOD,
            max_drift_periods: 2,
        }
    }
}

/// Observable state of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No effect, tick disarmed
    Idle,
    /// One effect running, tick armed
    Running(EffectId),
}

/// What happened on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No effect is running
    Idle,
    /// The running effect advanced by one step
    Ran,
    /// The running effect advanced and finished, the scheduler is idle again
    Finished,
    /// The scheduler was busy and the tick was skipped
    Dropped,
}

/// Tick counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Ticks delivered to effects
    pub ticks: u32,
    /// Ticks that never arrived because the tick source fell behind
    pub missed: u32,
    /// Ticks skipped because they overlapped another tick or a transition
    ///
    /// Only [`SharedScheduler`] can observe an overlap, so this stays 0 in
    /// the stats of a bare [`EffectScheduler`].
    pub dropped: u32,
}

/// Rejected scheduler request
///
/// A rejected request never changes the running effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("no effect given to start")]
    MissingEffect,
    #[error("unknown effect requested")]
    UnknownEffect,
    #[error("no effect is running")]
    NotRunning,
}

/// Owns the running effect, the strip it draws on and the tick registration
pub struct EffectScheduler<S: LedStrip, T: TickTimer> {
    // External dependencies and configuration
    strip: S,
    timer: T,
    topology: RingTopology,
    config: SchedulerConfig,

    // Internal state
    current: Option<EffectSlot>,
    armed: bool,
    last_tick: Option<Instant>,
    stats: TickStats,
}

impl<S: LedStrip, T: TickTimer> EffectScheduler<S, T> {
    /// Create an idle scheduler
    ///
    /// The timer is expected to be initialized but not armed. Fails if the
    /// strip has fewer pixels than the topology maps.
    pub fn new(
        strip: S,
        timer: T,
        topology: RingTopology,
        config: SchedulerConfig,
    ) -> Result<Self, TopologyError> {
        let led_count = topology.led_count();
        if strip.len() < usize::from(led_count) {
            log::error!(
                "{} LED topology does not fit a {} pixel strip",
                led_count,
                strip.len()
            );
            return Err(TopologyError::StripTooShort {
                led_count,
                strip_len: strip.len(),
            });
        }

        Ok(Self {
            strip,
            timer,
            topology,
            config,
            current: None,
            armed: false,
            last_tick: None,
            stats: TickStats::default(),
        })
    }

    /// Start an effect, stopping the running one first
    pub fn start(&mut self, effect: impl Into<EffectSlot>) {
        self.stop();

        let mut effect = effect.into();
        log::info!("starting effect {}", effect.id().as_str());
        effect.activate(&self.topology, &mut self.strip);

        self.current = Some(effect);
        self.last_tick = None;
        self.timer.arm(self.config.tick_period);
        self.armed = true;
    }

    /// Start an effect if one is given
    ///
    /// An empty request is rejected and the running effect stays untouched.
    pub fn try_start(&mut self, effect: Option<EffectSlot>) -> Result<(), SchedulerError> {
        let Some(effect) = effect else {
            log::warn!("rejected start request without an effect");
            return Err(SchedulerError::MissingEffect);
        };
        self.start(effect);
        Ok(())
    }

    /// Start an effect by its name
    pub fn start_named(&mut self, name: &str, params: EffectParams) -> Result<(), SchedulerError> {
        let Some(id) = EffectId::parse_from_str(name) else {
            log::warn!("rejected start request for unknown effect {:?}", name);
            return Err(SchedulerError::UnknownEffect);
        };
        self.start(id.to_slot(params));
        Ok(())
    }

    /// Start an effect by its raw id
    pub fn start_raw(&mut self, id: u8, params: EffectParams) -> Result<(), SchedulerError> {
        let Some(id) = EffectId::from_raw(id) else {
            log::warn!("rejected start request for unknown effect id {}", id);
            return Err(SchedulerError::UnknownEffect);
        };
        self.start(id.to_slot(params));
        Ok(())
    }

    /// Stop the running effect
    ///
    /// The tick is disarmed before the effect tears down. Stopping an idle
    /// scheduler does nothing. Returns whether an effect was stopped.
    pub fn stop(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }

        self.timer.disarm();
        self.armed = false;

        if let Some(mut effect) = self.current.take() {
            effect.teardown(&self.topology, &mut self.strip);
            log::info!("stopped effect {}", effect.id().as_str());
        }
        self.last_tick = None;
        true
    }

    /// Stop the running effect, reporting an idle scheduler as an error
    pub fn stop_strict(&mut self) -> Result<(), SchedulerError> {
        if self.stop() {
            Ok(())
        } else {
            Err(SchedulerError::NotRunning)
        }
    }

    /// Deliver one timer tick to the running effect
    ///
    /// An effect that reports itself finished after the tick is stopped.
    pub fn on_tick(&mut self, now: Instant) -> TickOutcome {
        if !self.armed {
            return TickOutcome::Idle;
        }
        self.track_lateness(now);

        let Some(effect) = self.current.as_mut() else {
            return TickOutcome::Idle;
        };
        effect.tick(&self.topology, &mut self.strip);
        self.stats.ticks = self.stats.ticks.wrapping_add(1);

        if effect.is_finished() {
            log::debug!("effect {} finished", effect.id().as_str());
            self.stop();
            return TickOutcome::Finished;
        }
        TickOutcome::Ran
    }

    pub fn state(&self) -> SchedulerState {
        match &self.current {
            Some(effect) => SchedulerState::Running(effect.id()),
            None => SchedulerState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Get the effect ID for external observation
    pub fn current_id(&self) -> Option<EffectId> {
        self.current.as_ref().map(EffectSlot::id)
    }

    pub fn topology(&self) -> &RingTopology {
        &self.topology
    }

    /// Get a reference to the strip
    ///
    /// There is no mutable access: the running effect is its only writer.
    pub fn strip(&self) -> &S {
        &self.strip
    }

    /// Get a reference to the tick timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn period(&self) -> Duration {
        self.config.tick_period
    }

    /// Tick counters
    ///
    /// `dropped` is always 0 here, see [`SharedScheduler::stats`].
    pub fn stats(&self) -> TickStats {
        self.stats
    }

    /// Count the ticks lost since the previous one
    fn track_lateness(&mut self, now: Instant) {
        let previous = self.last_tick.replace(now);
        let Some(previous) = previous else {
            return;
        };
        let Some(elapsed) = now.checked_duration_since(previous) else {
            return;
        };

        let period_ms = self.config.tick_period.as_millis().max(1);
        let limit_ms = period_ms * u64::from(self.config.max_drift_periods);
        if elapsed.as_millis() <= limit_ms {
            return;
        }

        let missed = (elapsed.as_millis() / period_ms).saturating_sub(1);
        let missed = u32::try_from(missed).unwrap_or(u32::MAX);
        self.stats.missed = self.stats.missed.saturating_add(missed);
        log::warn!(
            "effect tick late by {} ms, {} ticks missed",
            elapsed.as_millis().saturating_sub(period_ms),
            missed
        );
    }
}

impl<S: LedStrip> EffectScheduler<S, PacedTimer> {
    /// Run the tick if it is due and return how long the caller may sleep
    ///
    /// While idle the caller is asked to sleep for one tick period.
    pub fn poll(&mut self, now: Instant) -> Duration {
        if !self.timer.is_armed() {
            return self.config.tick_period;
        }
        let pace = self.timer.poll(now);
        if pace.due {
            self.on_tick(now);
        }
        pace.sleep
    }
}

/// Scheduler shared between the tick context and control code
///
/// Every call runs inside a critical section, so a tick never interleaves
/// with a transition. A tick that arrives while the scheduler is already in
/// use from the same context is dropped, not queued.
pub struct SharedScheduler<S: LedStrip, T: TickTimer> {
    inner: Mutex<RefCell<EffectScheduler<S, T>>>,
    dropped: Mutex<Cell<u32>>,
}

impl<S: LedStrip, T: TickTimer> SharedScheduler<S, T> {
    pub const fn new(scheduler: EffectScheduler<S, T>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(scheduler)),
            dropped: Mutex::new(Cell::new(0)),
        }
    }

    /// Run a closure with exclusive access to the scheduler
    ///
    /// # Panics
    ///
    /// Panics if called from inside another `lock` closure.
    pub fn lock<R>(&self, f: impl FnOnce(&mut EffectScheduler<S, T>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow(cs).borrow_mut()))
    }

    /// Start an effect, stopping the running one first
    pub fn start(&self, effect: impl Into<EffectSlot>) {
        self.lock(|scheduler| scheduler.start(effect));
    }

    /// Start an effect if one is given
    pub fn try_start(&self, effect: Option<EffectSlot>) -> Result<(), SchedulerError> {
        self.lock(|scheduler| scheduler.try_start(effect))
    }

    /// Stop the running effect
    pub fn stop(&self) -> bool {
        self.lock(EffectScheduler::stop)
    }

    /// Deliver one timer tick, dropping it if the scheduler is busy
    pub fn on_tick(&self, now: Instant) -> TickOutcome {
        critical_section::with(|cs| {
            if let Ok(mut scheduler) = self.inner.borrow(cs).try_borrow_mut() {
                return scheduler.on_tick(now);
            }
            let dropped = self.dropped.borrow(cs);
            dropped.set(dropped.get().wrapping_add(1));
            log::warn!("effect tick dropped, scheduler busy");
            TickOutcome::Dropped
        })
    }

    pub fn state(&self) -> SchedulerState {
        self.lock(|scheduler| scheduler.state())
    }

    /// Tick counters, including dropped ticks
    pub fn stats(&self) -> TickStats {
        critical_section::with(|cs| {
            let mut stats = self.inner.borrow(cs).borrow().stats();
            stats.dropped = self.dropped.borrow(cs).get();
            stats
        })
    }
}
