//! In-memory line driver that records every call

use super::{Level, LineDriver};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Configure(u32),
    Write(u32, Level),
    Release,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingDriver {
    pub calls: Vec<Call>,
    /// Fail the write with this (zero based) index
    pub fail_at_write: Option<usize>,
    write_count: usize,
}

impl RecordingDriver {
    pub fn failing_at(write: usize) -> Self {
        RecordingDriver {
            fail_at_write: Some(write),
            ..Default::default()
        }
    }

    /// Writes as (pin, 0|1) pairs
    pub fn writes(&self) -> Vec<(u32, u8)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Write(pin, Level::Low) => Some((*pin, 0)),
                Call::Write(pin, Level::High) => Some((*pin, 1)),
                _ => None,
            })
            .collect()
    }
}

impl LineDriver for RecordingDriver {
    fn configure_output(&mut self, pin: u32) -> Result<()> {
        self.calls.push(Call::Configure(pin));
        Ok(())
    }

    fn write_digital(&mut self, pin: u32, level: Level) -> Result<()> {
        if self.fail_at_write == Some(self.write_count) {
            return Err(Error::Io {
                pin,
                action: "write",
                source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "line gone"),
            });
        }
        self.write_count += 1;
        self.calls.push(Call::Write(pin, level));
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.calls.push(Call::Release);
        Ok(())
    }
}
