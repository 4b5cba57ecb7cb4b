//! Running light effect
//!
//! A single lit pixel travels around the minute ring, one position per tick.

use super::Effect;
use crate::color::Hsb;
use crate::strip::LedStrip;
use crate::topology::RingTopology;

/// Rotates the minute ring by one position per tick
///
/// Every position takes the color its successor held before the tick, and
/// the first position's color wraps around to the last one. Only one pixel
/// is lit on activation, so the light appears to run backwards through the
/// ring order.
#[derive(Debug, Clone)]
pub struct RunningLightEffect {
    color: Hsb,
}

impl RunningLightEffect {
    /// Create a running light with the given hue (degrees) and brightness
    /// (0.0-1.0) at full saturation
    pub fn new(hue: f32, brightness: f32) -> Self {
        Self {
            color: Hsb::saturated(hue, brightness),
        }
    }

    /// Color of the running pixel
    pub const fn color(&self) -> Hsb {
        self.color
    }
}

impl Effect for RunningLightEffect {
    fn activate<S: LedStrip>(&mut self, topology: &RingTopology, strip: &mut S) {
        strip.clear();
        if let Some(&first) = topology.minute_indices().first() {
            strip.set_pixel_hsb(usize::from(first), self.color);
        }
        strip.show();
    }

    fn tick<S: LedStrip>(&mut self, topology: &RingTopology, strip: &mut S) {
        let ring = topology.minute_indices();
        let (Some(&first), Some(&last)) = (ring.first(), ring.last()) else {
            return;
        };

        // Position 0 is overwritten before the last position reads it
        let carried = strip.pixel(usize::from(first));
        for pair in ring.windows(2) {
            let next = strip.pixel(usize::from(pair[1]));
            strip.set_pixel(usize::from(pair[0]), next);
        }
        strip.set_pixel(usize::from(last), carried);

        strip.show();
    }
}
