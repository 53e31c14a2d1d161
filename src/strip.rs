use smart_leds::RGB8;

use crate::error::{Error, Result};
use crate::pixel::{brightness_to_raw, Pixel};

/// Number of pixels on the strip
pub const PIXEL_COUNT: usize = 8;

/// Pixel values being edited plus the values last written to hardware
#[derive(Debug, Clone)]
pub struct PixelState {
    current: [Pixel; PIXEL_COUNT],
    previous: [Pixel; PIXEL_COUNT],
}

impl PixelState {
    /// All pixels black at the given raw brightness, nothing pending
    pub fn new(brightness: u8) -> Self {
        let pixels = [Pixel::off(brightness); PIXEL_COUNT];
        PixelState {
            current: pixels,
            previous: pixels,
        }
    }

    pub fn pixels(&self) -> &[Pixel; PIXEL_COUNT] {
        &self.current
    }

    pub fn pixel(&self, index: usize) -> Result<&Pixel> {
        self.current.get(index).ok_or(Error::PixelOutOfRange {
            index,
            len: PIXEL_COUNT,
        })
    }

    fn pixel_mut(&mut self, index: usize) -> Result<&mut Pixel> {
        self.current.get_mut(index).ok_or(Error::PixelOutOfRange {
            index,
            len: PIXEL_COUNT,
        })
    }

    /// Overwrite the colour of one pixel, leaving its brightness alone
    pub fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8) -> Result<()> {
        self.pixel_mut(index)?.color = RGB8::new(r, g, b);
        Ok(())
    }

    pub fn set_all(&mut self, r: u8, g: u8, b: u8) {
        for pixel in &mut self.current {
            pixel.color = RGB8::new(r, g, b);
        }
    }

    pub fn clear(&mut self) {
        self.set_all(0, 0, 0);
    }

    /// Apply a normalized brightness to every pixel
    pub fn set_brightness(&mut self, brightness: f64) -> Result<()> {
        let raw = brightness_to_raw(brightness)?;
        for pixel in &mut self.current {
            pixel.brightness = raw;
        }
        Ok(())
    }

    pub fn set_pixel_brightness(&mut self, index: usize, brightness: f64) -> Result<()> {
        // Validate the value before touching the index so a bad value wins
        let raw = brightness_to_raw(brightness)?;
        self.pixel_mut(index)?.brightness = raw;
        Ok(())
    }

    /// True if anything differs from what was last flushed
    pub fn changed(&self) -> bool {
        self.current
            .iter()
            .zip(self.previous.iter())
            .any(|(current, previous)| current != previous)
    }

    /// Record the current values as flushed. Only call after a successful write.
    pub fn commit(&mut self) {
        self.previous = self.current;
    }
}

impl Default for PixelState {
    fn default() -> Self {
        PixelState::new(crate::pixel::DEFAULT_BRIGHTNESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_unchanged() {
        let state = PixelState::default();
        assert!(!state.changed());
        assert!(state.pixels().iter().all(|p| *p == Pixel::off(15)));
    }

    #[test]
    fn test_setters_mark_changed_until_commit() {
        let mut state = PixelState::default();
        state.set_pixel(7, 1, 0, 0).unwrap();
        assert!(state.changed());
        state.commit();
        assert!(!state.changed());

        state.set_brightness(1.0).unwrap();
        assert!(state.changed());
        state.commit();

        state.set_pixel_brightness(2, 0.0).unwrap();
        assert!(state.changed());
        state.commit();
        assert!(!state.changed());
    }

    #[test]
    fn test_setting_same_value_is_not_a_change() {
        let mut state = PixelState::default();
        state.clear();
        state.set_brightness(15.0 / 31.0 + 0.001).unwrap();
        assert!(!state.changed());
    }

    #[test]
    fn test_set_all_then_set_pixel() {
        let mut state = PixelState::new(3);
        state.set_all(10, 20, 30);
        state.set_pixel(3, 1, 2, 3).unwrap();

        for (index, pixel) in state.pixels().iter().enumerate() {
            let expected = if index == 3 {
                RGB8::new(1, 2, 3)
            } else {
                RGB8::new(10, 20, 30)
            };
            assert_eq!(pixel.color, expected);
            assert_eq!(pixel.brightness, 3);
        }
    }

    #[test]
    fn test_clear_keeps_brightness() {
        let mut state = PixelState::default();
        state.set_pixel_brightness(0, 1.0).unwrap();
        state.set_all(255, 255, 255);
        state.clear();
        assert_eq!(state.pixel(0).unwrap().color, RGB8::default());
        assert_eq!(state.pixel(0).unwrap().brightness, 31);
        assert_eq!(state.pixel(1).unwrap().brightness, 15);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut state = PixelState::default();
        assert!(matches!(
            state.set_pixel(8, 1, 1, 1),
            Err(Error::PixelOutOfRange { index: 8, len: 8 })
        ));
        assert!(matches!(
            state.set_pixel_brightness(100, 0.5),
            Err(Error::PixelOutOfRange { .. })
        ));
        assert!(!state.changed());
    }

    #[test]
    fn test_invalid_brightness_leaves_state_untouched() {
        let mut state = PixelState::default();
        assert!(state.set_brightness(-1.0).is_err());
        assert!(state.set_pixel_brightness(0, 2.0).is_err());
        assert!(!state.changed());
    }
}
