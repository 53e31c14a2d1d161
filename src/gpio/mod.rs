//! Digital output lines the strip is driven through

mod sysfs;

#[cfg(test)]
pub(crate) mod recording;

pub use sysfs::SysfsGpio;

use crate::error::{Error, Result};

/// Logic level written to a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Text written to a sysfs `value` file
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "0",
            Level::High => "1",
        }
    }
}

impl From<bool> for Level {
    fn from(bit: bool) -> Self {
        if bit {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl TryFrom<char> for Level {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match c {
            '0' => Ok(Level::Low),
            '1' => Ok(Level::High),
            other => Err(Error::InvalidLevel(other)),
        }
    }
}

/// Clock and data pin numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lines {
    pub data: u32,
    pub clock: u32,
}

/// Output capability the frame encoder needs from the host
pub trait LineDriver {
    /// Export the pin and set it as an output. Calling it again is a no-op.
    fn configure_output(&mut self, pin: u32) -> Result<()>;

    fn write_digital(&mut self, pin: u32, level: Level) -> Result<()>;

    /// Write a string of '0'/'1' bits, same as one `write_digital` per bit.
    ///
    /// The whole string is validated before anything is written.
    fn write_raw(&mut self, pin: u32, bits: &str) -> Result<()> {
        let levels = bits
            .chars()
            .map(Level::try_from)
            .collect::<Result<Vec<_>>>()?;
        for level in levels {
            self.write_digital(pin, level)?;
        }
        Ok(())
    }

    /// Close and unexport every configured line
    fn release(&mut self) -> Result<()>;
}

impl<D: LineDriver + ?Sized> LineDriver for &mut D {
    fn configure_output(&mut self, pin: u32) -> Result<()> {
        (**self).configure_output(pin)
    }

    fn write_digital(&mut self, pin: u32, level: Level) -> Result<()> {
        (**self).write_digital(pin, level)
    }

    fn write_raw(&mut self, pin: u32, bits: &str) -> Result<()> {
        (**self).write_raw(pin, bits)
    }

    fn release(&mut self) -> Result<()> {
        (**self).release()
    }
}

#[cfg(test)]
mod tests {
    use super::recording::{Call, RecordingDriver};
    use super::*;

    #[test]
    fn test_level_from_bit() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false).as_str(), "0");
    }

    #[test]
    fn test_write_raw_expands_bits() {
        let mut driver = RecordingDriver::default();
        driver.write_raw(24, "101").unwrap();
        assert_eq!(driver.writes(), vec![(24, 1), (24, 0), (24, 1)]);
    }

    #[test]
    fn test_write_raw_rejects_garbage_before_writing() {
        let mut driver = RecordingDriver::default();
        let err = driver.write_raw(24, "10x1").unwrap_err();
        assert!(matches!(err, Error::InvalidLevel('x')));
        assert!(driver.calls.is_empty());
    }

    fn configure_and_release<D: LineDriver>(mut driver: D) {
        driver.configure_output(23).unwrap();
        driver.release().unwrap();
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut driver = RecordingDriver::default();
        configure_and_release(&mut driver);
        assert_eq!(driver.calls, vec![Call::Configure(23), Call::Release]);
    }
}
