//! Static color fill effect
//!
//! Fills a ring group with a single solid color.

use super::Effect;
use crate::color::Hsb;
use crate::strip::LedStrip;
use crate::topology::{RingGroup, RingTopology};

/// Static color effect - lights one group, everything else stays off
#[derive(Debug, Clone)]
pub struct StaticColorEffect {
    group: RingGroup,
    color: Hsb,
}

impl StaticColorEffect {
    /// Create a new static color effect
    pub const fn new(group: RingGroup, color: Hsb) -> Self {
        Self { group, color }
    }

    pub const fn group(&self) -> RingGroup {
        self.group
    }

    pub const fn color(&self) -> Hsb {
        self.color
    }
}

impl Effect for StaticColorEffect {
    fn activate<S: LedStrip>(&mut self, topology: &RingTopology, strip: &mut S) {
        strip.clear();
        let color = self.color.to_rgb();
        for &index in topology.indices(self.group) {
            strip.set_pixel(usize::from(index), color);
        }
        strip.show();
    }

    /// Nothing changes between ticks
    fn tick<S: LedStrip>(&mut self, _topology: &RingTopology, _strip: &mut S) {}
}
