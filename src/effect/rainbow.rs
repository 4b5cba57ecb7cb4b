//! Rainbow effect
//!
//! Spreads one full turn of the hue wheel over the minute ring and rotates
//! it a little on every tick.

use super::Effect;
use crate::color::{Hsv, hsv2rgb};
use crate::strip::LedStrip;
use crate::topology::RingTopology;

const DEFAULT_HUE_STEP: u8 = 2;

/// Rotating hue wheel on the minute ring
#[derive(Debug, Clone)]
pub struct RainbowEffect {
    /// Brightness value (0-255)
    value: u8,
    /// Saturation (0-255)
    saturation: u8,
    /// Hue advance per tick, on the 0-255 hue circle
    step: u8,
    /// Hue of the first minute position
    base_hue: u8,
}

impl RainbowEffect {
    /// Create a rainbow with the given brightness (0.0-1.0)
    pub fn new(brightness: f32) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = libm::roundf(brightness.clamp(0.0, 1.0) * 255.0) as u8;
        Self {
            value,
            saturation: 255,
            step: DEFAULT_HUE_STEP,
            base_hue: 0,
        }
    }

    /// Set the hue advance per tick
    #[must_use]
    pub fn with_step(mut self, step: u8) -> Self {
        self.step = step;
        self
    }

    /// Set the saturation
    #[must_use]
    pub fn with_saturation(mut self, saturation: u8) -> Self {
        self.saturation = saturation;
        self
    }

    /// Hue of the first minute position
    pub const fn base_hue(&self) -> u8 {
        self.base_hue
    }

    fn draw<S: LedStrip>(&self, topology: &RingTopology, strip: &mut S) {
        let ring = topology.minute_indices();
        let len = ring.len();
        for (position, &index) in ring.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let offset = (position * 256 / len) as u8;
            let color = hsv2rgb(Hsv {
                hue: self.base_hue.wrapping_add(offset),
                sat: self.saturation,
                val: self.value,
            });
            strip.set_pixel(usize::from(index), color);
        }
    }
}

impl Effect for RainbowEffect {
    fn activate<S: LedStrip>(&mut self, topology: &RingTopology, strip: &mut S) {
        self.base_hue = 0;
        strip.clear();
        self.draw(topology, strip);
        strip.show();
    }

    fn tick<S: LedStrip>(&mut self, topology: &RingTopology, strip: &mut S) {
        self.base_hue = self.base_hue.wrapping_add(self.step);
        self.draw(topology, strip);
        strip.show();
    }
}
