#![no_std]

pub mod color;
pub mod command;
pub mod effect;
pub mod indicator;
#[cfg(feature = "esp32-log")]
pub mod logger;
pub mod scheduler;
pub mod strip;
pub mod timer;
pub mod topology;

pub use command::{
    CommandChannel, CommandProcessor, CommandReceiver, CommandSender, EffectCommand,
};
pub use effect::{Effect, EffectId, EffectParams, EffectSlot};
pub use indicator::StatusIndicator;
pub use scheduler::{
    EffectScheduler, SchedulerConfig, SchedulerError, SchedulerState, SharedScheduler,
    TickOutcome, TickStats,
};
pub use strip::{LedStrip, PixelBuffer, SmartLedsOutput};
pub use timer::{DEFAULT_TICK_PERIOD, PacedTimer, TickTimer};
pub use topology::{RingGroup, RingLayout, RingTopology, TopologyError};

pub use color::{Hsb, Hsv, Rgb, hsb_to_rgb24, rgb24_to_hsb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// [`PixelBuffer`] hands it the whole frame on every flush.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
