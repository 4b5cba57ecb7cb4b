//! Mapping of the indicator's logical positions to physical LED indices
//!
//! The device has two concentric rings (hour markers inside, minute markers
//! outside) and a single center LED. All of them live on one addressable
//! chain, so every logical position resolves to an index on that chain.

use heapless::Vec;

/// Maximum number of positions in a single ring
pub const MAX_RING_LEDS: usize = 120;

const MAX_MAPPED_LEDS: usize = MAX_RING_LEDS * 2 + 1;

/// Named group of LEDs on the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingGroup {
    /// Outer ring, one LED per minute marker
    Minutes,
    /// Inner ring, one LED per hour marker
    Hours,
    /// The center LED
    Center,
    /// Every mapped LED
    All,
}

/// Configuration error of the ring tables
///
/// These are fatal at startup: the indicator cannot render on an
/// inconsistent map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("LED index {index} is outside of the {led_count} LED chain")]
    IndexOutOfRange { index: u8, led_count: u8 },
    #[error("LED index {0} is assigned to more than one position")]
    Overlap(u8),
    #[error("minute ring has no positions")]
    EmptyMinuteRing,
    #[error("ring has {0} positions, more than supported")]
    TooManyPositions(usize),
    #[error("{led_count} LED chain does not fit a {strip_len} pixel strip")]
    StripTooShort { led_count: u8, strip_len: usize },
}

/// Contiguous layout of the rings on the LED chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingLayout {
    /// Total LEDs on the chain
    pub led_count: u8,
    /// Index of the center LED
    pub center: u8,
    /// First index of the hour ring
    pub hours_start: u8,
    /// Number of hour positions
    pub hours_len: u8,
    /// First index of the minute ring
    pub minutes_start: u8,
    /// Number of minute positions
    pub minutes_len: u8,
}

impl RingLayout {
    /// Layout of the reference indicator board: center LED first, then
    /// twelve hour markers, then twelve minute markers.
    pub const REFERENCE: Self = Self {
        led_count: 25,
        center: 0,
        hours_start: 1,
        hours_len: 12,
        minutes_start: 13,
        minutes_len: 12,
    };
}

impl Default for RingLayout {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Immutable map from logical positions to physical LED indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingTopology {
    led_count: u8,
    minutes: Vec<u8, MAX_RING_LEDS>,
    hours: Vec<u8, MAX_RING_LEDS>,
    center: u8,
    all: Vec<u8, MAX_MAPPED_LEDS>,
}

impl RingTopology {
    /// Build a topology from explicit index tables
    ///
    /// Returns an error if any index is outside of the chain, if the groups
    /// share an index, or if the minute ring is empty.
    pub fn new(
        led_count: u8,
        minutes: &[u8],
        hours: &[u8],
        center: u8,
    ) -> Result<Self, TopologyError> {
        if minutes.is_empty() {
            return Err(TopologyError::EmptyMinuteRing);
        }

        let minutes = to_ring(minutes)?;
        let hours = to_ring(hours)?;

        let mut all: Vec<u8, MAX_MAPPED_LEDS> = Vec::new();
        let indices = minutes
            .iter()
            .chain(hours.iter())
            .chain(core::iter::once(&center));
        for &index in indices {
            if index >= led_count {
                return Err(TopologyError::IndexOutOfRange { index, led_count });
            }
            if all.contains(&index) {
                return Err(TopologyError::Overlap(index));
            }
            // Capacity covers both rings and the center
            let _ = all.push(index);
        }
        all.sort_unstable();

        Ok(Self {
            led_count,
            minutes,
            hours,
            center,
            all,
        })
    }

    /// Build a topology from a contiguous layout
    pub fn from_layout(layout: &RingLayout) -> Result<Self, TopologyError> {
        let minutes = ring_range(layout.minutes_start, layout.minutes_len, layout.led_count)?;
        let hours = ring_range(layout.hours_start, layout.hours_len, layout.led_count)?;
        Self::new(layout.led_count, &minutes, &hours, layout.center)
    }

    /// Topology of the reference indicator board
    pub fn reference() -> Self {
        match Self::from_layout(&RingLayout::REFERENCE) {
            Ok(topology) => topology,
            Err(_) => unreachable!("reference layout is consistent"),
        }
    }

    /// Total LEDs on the chain
    pub const fn led_count(&self) -> u8 {
        self.led_count
    }

    /// Minute ring indices, in ring order
    pub fn minute_indices(&self) -> &[u8] {
        &self.minutes
    }

    /// Hour ring indices, in ring order
    pub fn hour_indices(&self) -> &[u8] {
        &self.hours
    }

    /// Index of the center LED
    pub const fn center_index(&self) -> u8 {
        self.center
    }

    /// Indices of a group
    ///
    /// `RingGroup::All` yields the mapped positions in ascending order.
    pub fn indices(&self, group: RingGroup) -> &[u8] {
        match group {
            RingGroup::Minutes => &self.minutes,
            RingGroup::Hours => &self.hours,
            RingGroup::Center => core::slice::from_ref(&self.center),
            RingGroup::All => &self.all,
        }
    }
}

fn to_ring(indices: &[u8]) -> Result<Vec<u8, MAX_RING_LEDS>, TopologyError> {
    Vec::from_slice(indices).map_err(|()| TopologyError::TooManyPositions(indices.len()))
}

fn ring_range(
    start: u8,
    len: u8,
    led_count: u8,
) -> Result<Vec<u8, MAX_RING_LEDS>, TopologyError> {
    let mut ring = Vec::new();
    for offset in 0..len {
        // Past u8::MAX is past the end of any chain
        let index = start
            .checked_add(offset)
            .ok_or(TopologyError::IndexOutOfRange {
                index: u8::MAX,
                led_count,
            })?;
        ring.push(index)
            .map_err(|_| TopologyError::TooManyPositions(usize::from(len)))?;
    }
    Ok(ring)
}
