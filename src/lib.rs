//! Drive a Blinkt! style 8 pixel APA102 strip by bit-banging two GPIO lines.

pub mod blinkt;
pub mod config;
pub mod error;
pub mod gpio;
pub mod pixel;
pub mod protocol;
pub mod strip;

pub use blinkt::{delay, Blinkt, State};
pub use config::Config;
pub use error::{Error, Result};
pub use gpio::{Level, LineDriver, Lines, SysfsGpio};
pub use pixel::Pixel;
