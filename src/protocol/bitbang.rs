//! Software clocked serial output over two GPIO lines.
//!
//! There is no rate control: the bit rate is whatever the line writes allow.

use crate::error::Result;
use crate::gpio::{Level, LineDriver, Lines};

/// One clock cycle: high then low
pub fn pulse_clock<D: LineDriver + ?Sized>(driver: &mut D, lines: Lines) -> Result<()> {
    driver.write_digital(lines.clock, Level::High)?;
    driver.write_digital(lines.clock, Level::Low)
}

/// Shift out one byte, most significant bit first
pub fn write_byte<D: LineDriver + ?Sized>(driver: &mut D, lines: Lines, byte: u8) -> Result<()> {
    for bit in (0..8).rev() {
        driver.write_digital(lines.data, Level::from(byte & (1 << bit) != 0))?;
        pulse_clock(driver, lines)?;
    }
    Ok(())
}

/// Hold data low and clock `pulses` times (frame delimiter, carries no data)
pub fn write_marker<D: LineDriver + ?Sized>(
    driver: &mut D,
    lines: Lines,
    pulses: usize,
) -> Result<()> {
    driver.write_digital(lines.data, Level::Low)?;
    for _ in 0..pulses {
        pulse_clock(driver, lines)?;
    }
    Ok(())
}
