use smart_leds::RGB8;

use crate::error::{Error, Result};

/// Raw brightness used when none is supplied. Not derived from the normalized scale.
pub const DEFAULT_BRIGHTNESS: u8 = 15;

/// Largest raw (5-bit) brightness the wire format can carry
pub const MAX_BRIGHTNESS: u8 = 31;

/// Bounds for user supplied brightness
pub const MIN_BRIGHTNESS_NORMALIZED: f64 = 0.0;
pub const MAX_BRIGHTNESS_NORMALIZED: f64 = 1.0;

/// A single LED: colour plus raw 5-bit brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub color: RGB8,
    pub brightness: u8,
}

impl Pixel {
    /// Black pixel with the given raw brightness
    pub const fn off(brightness: u8) -> Self {
        Pixel {
            color: RGB8 { r: 0, g: 0, b: 0 },
            brightness,
        }
    }

    /// Brightness back on the 0.0 - 1.0 scale
    pub fn brightness_normalized(&self) -> f64 {
        f64::from(self.brightness) / f64::from(MAX_BRIGHTNESS)
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Pixel::off(DEFAULT_BRIGHTNESS)
    }
}

/// Convert a normalized brightness to the raw value sent on the wire.
///
/// The product is truncated, so `1.0` maps to 31 and anything below `1/31` maps to 0.
/// NaN and values outside `[0.0, 1.0]` are rejected rather than clamped.
pub fn brightness_to_raw(brightness: f64) -> Result<u8> {
    if !(MIN_BRIGHTNESS_NORMALIZED..=MAX_BRIGHTNESS_NORMALIZED).contains(&brightness) {
        return Err(Error::InvalidBrightness {
            value: brightness,
            min: MIN_BRIGHTNESS_NORMALIZED,
            max: MAX_BRIGHTNESS_NORMALIZED,
        });
    }

    Ok((brightness * f64::from(MAX_BRIGHTNESS)) as u8)
}
