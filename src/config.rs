use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::gpio::{Lines, SysfsGpio};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub gpio: GpioConfig,
    /// Initial brightness between 0.0 and 1.0. The raw default (15 of 31) is used when absent.
    pub brightness: Option<f64>,
    /// Turn the LEDs off on Ctrl-C in long running commands
    pub clear_on_exit: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GpioConfig {
    /// sysfs GPIO directory holding `export`, `unexport` and the `gpioN` folders
    pub root: PathBuf,
    pub data_pin: u32,
    pub clock_pin: u32,
}

impl GpioConfig {
    pub fn lines(&self) -> Lines {
        Lines {
            data: self.data_pin,
            clock: self.clock_pin,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gpio: GpioConfig::default(),
            brightness: None,
            clear_on_exit: true,
        }
    }
}

impl Default for GpioConfig {
    fn default() -> Self {
        GpioConfig {
            root: PathBuf::from(SysfsGpio::DEFAULT_ROOT),
            data_pin: 23,
            clock_pin: 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.gpio.root, PathBuf::from("/sys/class/gpio"));
        assert_eq!(config.gpio.lines(), Lines { data: 23, clock: 24 });
        assert_eq!(config.brightness, None);
        assert!(config.clear_on_exit);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = serde_json::from_str(
            r#"{
                "gpio": {"root": "/tmp/gpio", "clock_pin": 11},
                "brightness": 0.25,
                "clear_on_exit": false
            }"#,
        )
        .unwrap();
        assert_eq!(config.gpio.root, PathBuf::from("/tmp/gpio"));
        assert_eq!(config.gpio.lines(), Lines { data: 23, clock: 11 });
        assert_eq!(config.brightness, Some(0.25));
        assert!(!config.clear_on_exit);
    }
}
