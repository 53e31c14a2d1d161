//! APA102 style frames: start marker, one 32-bit word per pixel, end marker

use crate::error::Result;
use crate::gpio::{LineDriver, Lines};
use crate::pixel::{Pixel, MAX_BRIGHTNESS};
use crate::protocol::bitbang::{write_byte, write_marker};

/// Three fixed high bits in front of the 5-bit brightness
pub const PIXEL_START: u8 = 0b1110_0000;
pub const START_FRAME_PULSES: usize = 32;
pub const END_FRAME_PULSES: usize = 36;

/// Build the pixel words: brightness byte, B, G, R for each pixel in order
pub fn build_pixel_words(pixels: &[Pixel]) -> Vec<u8> {
    let mut words = Vec::with_capacity(pixels.len() * 4);

    for pixel in pixels {
        words.push(PIXEL_START | (pixel.brightness & MAX_BRIGHTNESS));
        words.push(pixel.color.b);
        words.push(pixel.color.g);
        words.push(pixel.color.r);
    }

    words
}

/// Clock a complete frame out over the data and clock lines
pub fn write_frame<D: LineDriver + ?Sized>(
    driver: &mut D,
    lines: Lines,
    pixels: &[Pixel],
) -> Result<()> {
    let words = build_pixel_words(pixels);

    if log::log_enabled!(log::Level::Trace) {
        let hex: String = words
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(" ");
        log::trace!("Frame words: {}", hex);
    }

    write_marker(driver, lines, START_FRAME_PULSES)?;
    for byte in words {
        write_byte(driver, lines, byte)?;
    }
    write_marker(driver, lines, END_FRAME_PULSES)
}
