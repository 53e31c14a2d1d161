use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{Level, LineDriver};
use crate::error::{Error, Result};

/// Open attribute files of one exported pin
#[derive(Debug)]
struct GpioLine {
    value: File,
    // Kept open for the lifetime of the line, closed on release
    #[allow(dead_code)]
    direction: File,
}

/// GPIO lines driven through the kernel's sysfs interface (`/sys/class/gpio`)
#[derive(Debug)]
pub struct SysfsGpio {
    root: PathBuf,
    lines: HashMap<u32, GpioLine>,
}

impl SysfsGpio {
    pub const DEFAULT_ROOT: &'static str = "/sys/class/gpio";

    /// Create a driver rooted at `root`. Nothing is touched until a line is configured.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SysfsGpio {
            root: root.into(),
            lines: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pins currently held open, in ascending order
    pub fn configured_pins(&self) -> Vec<u32> {
        let mut pins: Vec<u32> = self.lines.keys().copied().collect();
        pins.sort_unstable();
        pins
    }

    fn pin_dir(&self, pin: u32) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }

    fn exported(&self, pin: u32) -> bool {
        self.pin_dir(pin).exists()
    }

    fn export(&self, pin: u32) -> Result<()> {
        log::debug!("Exporting GPIO {}", pin);
        fs::write(self.root.join("export"), pin.to_string()).map_err(Error::io(pin, "export"))
    }

    fn unexport(&self, pin: u32) -> Result<()> {
        fs::write(self.root.join("unexport"), pin.to_string()).map_err(Error::io(pin, "unexport"))
    }

    fn open_attribute(&self, pin: u32, name: &str, action: &'static str) -> Result<File> {
        OpenOptions::new()
            .write(true)
            .open(self.pin_dir(pin).join(name))
            .map_err(Error::io(pin, action))
    }
}

impl Default for SysfsGpio {
    fn default() -> Self {
        SysfsGpio::new(Self::DEFAULT_ROOT)
    }
}

impl LineDriver for SysfsGpio {
    fn configure_output(&mut self, pin: u32) -> Result<()> {
        if self.lines.contains_key(&pin) {
            return Ok(());
        }

        if !self.exported(pin) {
            self.export(pin)?;
        }

        let value = self.open_attribute(pin, "value", "open value of")?;
        let mut direction = self.open_attribute(pin, "direction", "open direction of")?;
        direction
            .write_all(b"out")
            .map_err(Error::io(pin, "set direction of"))?;

        self.lines.insert(pin, GpioLine { value, direction });
        Ok(())
    }

    fn write_digital(&mut self, pin: u32, level: Level) -> Result<()> {
        let line = self
            .lines
            .get_mut(&pin)
            .ok_or(Error::LineNotConfigured { pin })?;
        line.value
            .write_all(level.as_str().as_bytes())
            .map_err(Error::io(pin, "write"))
    }

    fn release(&mut self) -> Result<()> {
        let mut lines: Vec<(u32, GpioLine)> = std::mem::take(&mut self.lines).into_iter().collect();
        lines.sort_unstable_by_key(|(pin, _)| *pin);

        // Keep going after a failure so every line gets a chance to be unexported
        let mut result = Ok(());
        for (pin, line) in lines {
            log::info!("Cleaning up {}", pin);
            drop(line);
            if let Err(e) = self.unexport(pin) {
                log::warn!("{}", e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }
}
