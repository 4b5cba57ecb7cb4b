//! Pixel buffer that effects draw into
//!
//! Writes only touch the in-memory frame. Nothing reaches the LEDs until
//! [`LedStrip::show`] hands the whole frame to the output driver.

use core::fmt::Debug;

use smart_leds::SmartLedsWrite;

use crate::OutputDriver;
use crate::color::{Hsb, OFF, Rgb};

/// Addressable LED buffer with an explicit flush
pub trait LedStrip {
    /// Number of pixels in the buffer
    fn len(&self) -> usize;

    /// Set the color of a pixel
    ///
    /// Indices outside of the buffer are ignored.
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Get the buffered color of a pixel
    ///
    /// Indices outside of the buffer read as [`OFF`].
    fn pixel(&self, index: usize) -> Rgb;

    /// Commit buffered writes to the LEDs
    fn show(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set the color of a pixel from hue/saturation/brightness
    fn set_pixel_hsb(&mut self, index: usize, color: Hsb) {
        self.set_pixel(index, color.to_rgb());
    }

    /// Set every pixel to one color
    fn fill(&mut self, color: Rgb) {
        for index in 0..self.len() {
            self.set_pixel(index, color);
        }
    }

    /// Switch every pixel off
    fn clear(&mut self) {
        self.fill(OFF);
    }
}

/// Fixed-size frame buffer flushed to an [`OutputDriver`]
pub struct PixelBuffer<O: OutputDriver, const N: usize> {
    frame: [Rgb; N],
    output: O,
    dirty: bool,
}

impl<O: OutputDriver, const N: usize> PixelBuffer<O, N> {
    /// Create a buffer with every pixel off
    pub const fn new(output: O) -> Self {
        Self {
            frame: [OFF; N],
            output,
            dirty: false,
        }
    }

    /// Buffered frame
    pub const fn frame(&self) -> &[Rgb; N] {
        &self.frame
    }

    /// Check if there are writes not yet shown
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get a reference to the output driver
    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output driver
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

impl<O: OutputDriver, const N: usize> LedStrip for PixelBuffer<O, N> {
    fn len(&self) -> usize {
        N
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.frame.get_mut(index) {
            *pixel = color;
            self.dirty = true;
        } else {
            log::debug!("pixel {} is outside of the {} LED buffer", index, N);
        }
    }

    fn pixel(&self, index: usize) -> Rgb {
        self.frame.get(index).copied().unwrap_or(OFF)
    }

    fn show(&mut self) {
        self.output.write(&self.frame);
        self.dirty = false;
    }
}

/// Adapter driving any `smart_leds` writer (WS2812 and friends)
pub struct SmartLedsOutput<W> {
    writer: W,
}

impl<W> SmartLedsOutput<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get a reference to the wrapped writer
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Release the wrapped writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = Rgb>,
    W::Error: Debug,
{
    fn write(&mut self, colors: &[Rgb]) {
        if let Err(err) = self.writer.write(colors.iter().copied()) {
            log::warn!("LED write failed: {:?}", err);
        }
    }
}
