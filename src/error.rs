use std::io;

/// Errors produced by the LED strip and its GPIO lines
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("supplied brightness was {value} - value should be between {min} and {max}")]
    InvalidBrightness { value: f64, min: f64, max: f64 },

    #[error("pixel index {index} is out of range (strip has {len} pixels)")]
    PixelOutOfRange { index: usize, len: usize },

    #[error("invalid line level {0:?}, expected '0' or '1'")]
    InvalidLevel(char),

    #[error("GPIO {pin} is not configured as an output")]
    LineNotConfigured { pin: u32 },

    #[error("failed to {action} GPIO {pin}")]
    Io {
        pin: u32,
        action: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed to install interrupt handler")]
    Signal(#[from] ctrlc::Error),

    #[error("LED strip has not been set up")]
    NotReady,

    #[error("LED strip is closed")]
    Closed,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn io(pin: u32, action: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Error::Io { pin, action, source }
    }
}
