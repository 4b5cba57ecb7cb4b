//! Hue/saturation/brightness colors
//!
//! Hue is measured in degrees on a full turn (`0.0..360.0`), saturation and
//! brightness are fractions in `0.0..=1.0`. Conversions never fail: hue wraps
//! around the turn, the other channels are clamped and NaN reads as zero.

use libm::{fabsf, fmodf, roundf};

use super::{Rgb, rgb_from_u32, rgb_to_u32};

const FULL_TURN: f32 = 360.0;
const SECTOR: f32 = 60.0;

/// Color in the hue/saturation/brightness space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsb {
    /// Hue in degrees
    pub hue: f32,
    /// Saturation (0.0-1.0)
    pub saturation: f32,
    /// Brightness (0.0-1.0)
    pub brightness: f32,
}

impl Hsb {
    /// Create a new color, normalizing every channel into its range
    pub fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: unit(saturation),
            brightness: unit(brightness),
        }
    }

    /// Fully saturated color with the given hue and brightness
    pub fn saturated(hue: f32, brightness: f32) -> Self {
        Self::new(hue, 1.0, brightness)
    }

    /// Convert to 8-bit RGB
    pub fn to_rgb(self) -> Rgb {
        hsb_to_rgb(self.hue, self.saturation, self.brightness)
    }

    /// Convert from 8-bit RGB
    pub fn from_rgb(color: Rgb) -> Self {
        let r = f32::from(color.r) / 255.0;
        let g = f32::from(color.g) / 255.0;
        let b = f32::from(color.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let saturation = if max > 0.0 { delta / max } else { 0.0 };

        #[allow(clippy::float_cmp)]
        let hue = if delta <= 0.0 {
            0.0
        } else if max == r {
            SECTOR * fmodf((g - b) / delta, 6.0)
        } else if max == g {
            SECTOR * ((b - r) / delta + 2.0)
        } else {
            SECTOR * ((r - g) / delta + 4.0)
        };

        Self {
            hue: wrap_hue(hue),
            saturation,
            brightness: max,
        }
    }
}

impl From<Hsb> for Rgb {
    fn from(color: Hsb) -> Self {
        color.to_rgb()
    }
}

/// Convert hue/saturation/brightness to 8-bit RGB
#[allow(clippy::many_single_char_names)]
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Rgb {
    let hue = wrap_hue(hue);
    let saturation = unit(saturation);
    let brightness = unit(brightness);

    let chroma = brightness * saturation;
    let sector = hue / SECTOR;
    let x = chroma * (1.0 - fabsf(fmodf(sector, 2.0) - 1.0));
    let m = brightness - chroma;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (r, g, b) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Rgb {
        r: channel8(r + m),
        g: channel8(g + m),
        b: channel8(b + m),
    }
}

/// Convert hue/saturation/brightness to a packed 24-bit color (0xRRGGBB)
pub fn hsb_to_rgb24(hue: f32, saturation: f32, brightness: f32) -> u32 {
    rgb_to_u32(hsb_to_rgb(hue, saturation, brightness))
}

/// Convert a packed 24-bit color (0xRRGGBB) to hue/saturation/brightness
///
/// Bits above the lower 24 are ignored.
pub fn rgb24_to_hsb(color: u32) -> Hsb {
    Hsb::from_rgb(rgb_from_u32(color))
}

fn wrap_hue(hue: f32) -> f32 {
    if !hue.is_finite() {
        return 0.0;
    }
    let mut wrapped = fmodf(hue, FULL_TURN);
    if wrapped < 0.0 {
        wrapped += FULL_TURN;
    }
    // Tiny negative hues round up to the full turn itself
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

fn unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel8(value: f32) -> u8 {
    roundf(unit(value) * 255.0) as u8
}
