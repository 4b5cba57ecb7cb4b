use super::Effect;
use crate::color::Hsb;
use crate::strip::LedStrip;
use crate::topology::{RingGroup, RingTopology};

/// Ticks a flash stays lit by default (about half a second at 40 ms)
pub const DEFAULT_FLASH_TICKS: u16 = 13;

/// Lights a group for a fixed number of ticks, then switches the strip off
#[derive(Debug, Clone)]
pub struct FlashEffect {
    group: RingGroup,
    color: Hsb,
    ticks: u16,
    remaining: u16,
}

impl FlashEffect {
    pub const fn new(group: RingGroup, color: Hsb, ticks: u16) -> Self {
        Self {
            group,
            color,
            ticks,
            remaining: ticks,
        }
    }
}

impl Effect for FlashEffect {
    fn activate<S: LedStrip>(&mut self, topology: &RingTopology, strip: &mut S) {
        self.remaining = self.ticks;
        strip.clear();
        if !self.is_finished() {
            let color = self.color.to_rgb();
            for &index in topology.indices(self.group) {
                strip.set_pixel(usize::from(index), color);
            }
        }
        strip.show();
    }

    fn tick<S: LedStrip>(&mut self, _topology: &RingTopology, strip: &mut S) {
        if self.is_finished() {
            return;
        }
        self.remaining -= 1;
        if self.is_finished() {
            strip.clear();
            strip.show();
        }
    }

    fn teardown<S: LedStrip>(&mut self, _topology: &RingTopology, strip: &mut S) {
        // Already dark once finished
        if !self.is_finished() {
            strip.clear();
            strip.show();
        }
    }

    /// The flash has gone dark
    fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}
