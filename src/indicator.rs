//! Device status shown while the firmware boots
//!
//! The boot code switches through these as it brings the device up: a dim
//! running light while starting, the hour ring while the network comes up,
//! and a short green flash of the whole indicator once it is ready.

use crate::color::Hsb;
use crate::effect::{
    DEFAULT_FLASH_TICKS, EffectParams, EffectSlot, FlashEffect, RunningLightEffect,
    StaticColorEffect,
};
use crate::topology::RingGroup;

const CONNECTING_HUE: f32 = 40.0;
const CONNECTING_BRIGHTNESS: f32 = 0.2;
const READY_HUE: f32 = 120.0;
const READY_BRIGHTNESS: f32 = 1.0;

/// Boot stage of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    /// Firmware is starting
    Booting,
    /// Waiting for the network to come up
    Connecting,
    /// Network is up
    Ready,
}

impl StatusIndicator {
    /// Effect showing this stage
    pub fn to_slot(self) -> EffectSlot {
        match self {
            Self::Booting => {
                let params = EffectParams::default();
                RunningLightEffect::new(params.hue, params.brightness).into()
            }
            Self::Connecting => StaticColorEffect::new(
                RingGroup::Hours,
                Hsb::saturated(CONNECTING_HUE, CONNECTING_BRIGHTNESS),
            )
            .into(),
            Self::Ready => FlashEffect::new(
                RingGroup::All,
                Hsb::saturated(READY_HUE, READY_BRIGHTNESS),
                DEFAULT_FLASH_TICKS,
            )
            .into(),
        }
    }
}

impl From<StatusIndicator> for EffectSlot {
    fn from(status: StatusIndicator) -> Self {
        status.to_slot()
    }
}
