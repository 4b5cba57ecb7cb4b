mod hsb;

use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use hsb::{Hsb, hsb_to_rgb, hsb_to_rgb24, rgb24_to_hsb};
pub use smart_leds::hsv::hsv2rgb;

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Color of a switched off pixel
pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}
