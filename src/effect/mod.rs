//! Effect system with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait.

mod flash;
mod rainbow;
mod running_light;
mod static_color;

pub use flash::{DEFAULT_FLASH_TICKS, FlashEffect};
pub use rainbow::RainbowEffect;
pub use running_light::RunningLightEffect;
pub use static_color::StaticColorEffect;

use crate::color::Hsb;
use crate::strip::LedStrip;
use crate::topology::{RingGroup, RingTopology};

const EFFECT_NAME_RUNNING_LIGHT: &str = "running_light";
const EFFECT_NAME_STATIC: &str = "static";
const EFFECT_NAME_FLASH: &str = "flash";
const EFFECT_NAME_RAINBOW: &str = "rainbow";

const EFFECT_ID_RUNNING_LIGHT: u8 = 0;
const EFFECT_ID_STATIC: u8 = 1;
const EFFECT_ID_FLASH: u8 = 2;
const EFFECT_ID_RAINBOW: u8 = 3;

/// Animation driven by periodic ticks
///
/// The scheduler guarantees the call order `activate`, any number of
/// `tick`s, then `teardown`, and that no other effect writes to the strip in
/// between.
pub trait Effect {
    /// Draw the initial state of the effect
    fn activate<S: LedStrip>(&mut self, topology: &RingTopology, strip: &mut S);

    /// Advance the animation by one step
    fn tick<S: LedStrip>(&mut self, topology: &RingTopology, strip: &mut S);

    /// Leave the strip fully off
    fn teardown<S: LedStrip>(&mut self, _topology: &RingTopology, strip: &mut S) {
        strip.clear();
        strip.show();
    }

    /// Check if the effect has nothing left to show
    ///
    /// The scheduler stops a finished effect after its tick.
    fn is_finished(&self) -> bool {
        false
    }
}

/// Color parameters an effect is constructed with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams {
    /// Hue in degrees
    pub hue: f32,
    /// Brightness (0.0-1.0)
    pub brightness: f32,
}

impl Default for EffectParams {
    /// Dim red, the boot animation color of the indicator
    fn default() -> Self {
        Self {
            hue: 0.0,
            brightness: 0.2,
        }
    }
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    /// Single pixel running around the minute ring
    RunningLight(RunningLightEffect),
    /// Solid color on a ring group
    Static(StaticColorEffect),
    /// Group lit for a number of ticks, then off
    Flash(FlashEffect),
    /// Hue wheel rotating around the minute ring
    Rainbow(RainbowEffect),
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    RunningLight = EFFECT_ID_RUNNING_LIGHT,
    Static = EFFECT_ID_STATIC,
    Flash = EFFECT_ID_FLASH,
    Rainbow = EFFECT_ID_RAINBOW,
}

impl EffectId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_RUNNING_LIGHT => Self::RunningLight,
            EFFECT_ID_STATIC => Self::Static,
            EFFECT_ID_FLASH => Self::Flash,
            EFFECT_ID_RAINBOW => Self::Rainbow,
            _ => return None,
        })
    }

    /// Build the effect with the given color parameters
    ///
    /// Group effects cover every mapped LED.
    pub fn to_slot(self, params: EffectParams) -> EffectSlot {
        let color = Hsb::saturated(params.hue, params.brightness);
        match self {
            Self::RunningLight => EffectSlot::RunningLight(RunningLightEffect::new(
                params.hue,
                params.brightness,
            )),
            Self::Static => {
                EffectSlot::Static(StaticColorEffect::new(RingGroup::All, color))
            }
            Self::Flash => EffectSlot::Flash(FlashEffect::new(
                RingGroup::All,
                color,
                DEFAULT_FLASH_TICKS,
            )),
            Self::Rainbow => EffectSlot::Rainbow(RainbowEffect::new(params.brightness)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunningLight => EFFECT_NAME_RUNNING_LIGHT,
            Self::Static => EFFECT_NAME_STATIC,
            Self::Flash => EFFECT_NAME_FLASH,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_RUNNING_LIGHT => Some(Self::RunningLight),
            EFFECT_NAME_STATIC => Some(Self::Static),
            EFFECT_NAME_FLASH => Some(Self::Flash),
            EFFECT_NAME_RAINBOW => Some(Self::Rainbow),
            _ => None,
        }
    }
}

impl EffectSlot {
    /// Draw the initial state of the current effect
    pub fn activate<S: LedStrip>(&mut self, topology: &RingTopology, strip: &mut S) {
        match self {
            Self::RunningLight(effect) => effect.activate(topology, strip),
            Self::Static(effect) => effect.activate(topology, strip),
            Self::Flash(effect) => effect.activate(topology, strip),
            Self::Rainbow(effect) => effect.activate(topology, strip),
        }
    }

    /// Advance the current effect by one step
    pub fn tick<S: LedStrip>(&mut self, topology: &RingTopology, strip: &mut S) {
        match self {
            Self::RunningLight(effect) => effect.tick(topology, strip),
            Self::Static(effect) => effect.tick(topology, strip),
            Self::Flash(effect) => effect.tick(topology, strip),
            Self::Rainbow(effect) => effect.tick(topology, strip),
        }
    }

    /// Tear the current effect down, leaving the strip off
    pub fn teardown<S: LedStrip>(&mut self, topology: &RingTopology, strip: &mut S) {
        match self {
            Self::RunningLight(effect) => effect.teardown(topology, strip),
            Self::Static(effect) => effect.teardown(topology, strip),
            Self::Flash(effect) => effect.teardown(topology, strip),
            Self::Rainbow(effect) => effect.teardown(topology, strip),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Self::RunningLight(effect) => effect.is_finished(),
            Self::Static(effect) => effect.is_finished(),
            Self::Flash(effect) => effect.is_finished(),
            Self::Rainbow(effect) => effect.is_finished(),
        }
    }

    /// Get the effect ID for external observation
    pub fn id(&self) -> EffectId {
        match self {
            Self::RunningLight(_) => EffectId::RunningLight,
            Self::Static(_) => EffectId::Static,
            Self::Flash(_) => EffectId::Flash,
            Self::Rainbow(_) => EffectId::Rainbow,
        }
    }
}

impl From<RunningLightEffect> for EffectSlot {
    fn from(effect: RunningLightEffect) -> Self {
        Self::RunningLight(effect)
    }
}

impl From<StaticColorEffect> for EffectSlot {
    fn from(effect: StaticColorEffect) -> Self {
        Self::Static(effect)
    }
}

impl From<FlashEffect> for EffectSlot {
    fn from(effect: FlashEffect) -> Self {
        Self::Flash(effect)
    }
}

impl From<RainbowEffect> for EffectSlot {
    fn from(effect: RainbowEffect) -> Self {
        Self::Rainbow(effect)
    }
}
