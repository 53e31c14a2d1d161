use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::gpio::{LineDriver, Lines, SysfsGpio};
use crate::pixel::{brightness_to_raw, Pixel, DEFAULT_BRIGHTNESS};
use crate::protocol::write_frame;
use crate::strip::{PixelState, PIXEL_COUNT};

/// Lifecycle of a strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Uninitialized,
    Ready,
    Closed,
}

/// An 8 pixel APA102 strip driven over a clock and a data line.
///
/// Setters only touch the in-memory pixels; nothing reaches the LEDs until [`Blinkt::show`].
pub struct Blinkt<D: LineDriver> {
    driver: D,
    lines: Lines,
    pixels: PixelState,
    state: State,
    running: Arc<AtomicBool>,
}

impl Blinkt<SysfsGpio> {
    /// Open the strip described by `config` through sysfs and set it up
    pub fn open(config: &Config) -> Result<Self> {
        let driver = SysfsGpio::new(&config.gpio.root);
        let mut blinkt = Blinkt::new(driver, config.gpio.lines(), config.brightness)?;
        blinkt.setup()?;
        Ok(blinkt)
    }
}

impl<D: LineDriver> Blinkt<D> {
    /// Create a strip with every pixel off.
    ///
    /// `brightness` is on the 0.0 - 1.0 scale; `None` keeps the raw default of 15.
    /// Call [`Blinkt::setup`] before showing anything.
    pub fn new(driver: D, lines: Lines, brightness: Option<f64>) -> Result<Self> {
        let raw = match brightness {
            Some(brightness) => brightness_to_raw(brightness)?,
            None => DEFAULT_BRIGHTNESS,
        };

        Ok(Blinkt {
            driver,
            lines,
            pixels: PixelState::new(raw),
            state: State::Uninitialized,
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Configure both lines as outputs
    pub fn setup(&mut self) -> Result<()> {
        match self.state {
            State::Closed => return Err(Error::Closed),
            State::Ready => return Ok(()),
            State::Uninitialized => {}
        }

        self.driver.configure_output(self.lines.data)?;
        self.driver.configure_output(self.lines.clock)?;
        self.state = State::Ready;
        log::debug!(
            "Strip ready on data GPIO {} / clock GPIO {}",
            self.lines.data,
            self.lines.clock
        );
        Ok(())
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn pixels(&self) -> &[Pixel; PIXEL_COUNT] {
        self.pixels.pixels()
    }

    /// True if something was set since the last flush
    pub fn changed(&self) -> bool {
        self.pixels.changed()
    }

    /// Write the pixels to the LEDs if anything changed since the last call
    pub fn show(&mut self) -> Result<()> {
        match self.state {
            State::Uninitialized => return Err(Error::NotReady),
            State::Closed => return Err(Error::Closed),
            State::Ready => {}
        }

        if !self.pixels.changed() {
            log::trace!("Pixels unchanged, skipping frame");
            return Ok(());
        }

        write_frame(&mut self.driver, self.lines, self.pixels.pixels())?;
        self.pixels.commit();
        log::debug!("Frame written");
        Ok(())
    }

    /// Turn every pixel off. Brightness is kept; call `show` to apply.
    pub fn clear(&mut self) -> &mut Self {
        self.pixels.clear();
        self
    }

    pub fn set_all(&mut self, r: u8, g: u8, b: u8) -> &mut Self {
        self.pixels.set_all(r, g, b);
        self
    }

    pub fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8) -> Result<&mut Self> {
        self.pixels.set_pixel(index, r, g, b)?;
        Ok(self)
    }

    /// Set the brightness of every pixel, between 0.0 and 1.0
    pub fn set_brightness(&mut self, brightness: f64) -> Result<&mut Self> {
        self.pixels.set_brightness(brightness)?;
        Ok(self)
    }

    /// Set the brightness of one pixel, between 0.0 and 1.0
    pub fn set_pixel_brightness(&mut self, index: usize, brightness: f64) -> Result<&mut Self> {
        self.pixels.set_pixel_brightness(index, brightness)?;
        Ok(self)
    }

    /// Turn the LEDs off and release both lines.
    ///
    /// Closing an already closed strip does nothing. If the final frame
    /// fails the lines are still released and the write error is returned.
    pub fn close(&mut self) -> Result<()> {
        let flushed = match self.state {
            State::Closed => return Ok(()),
            State::Ready => self.clear().show(),
            State::Uninitialized => Ok(()),
        };

        self.state = State::Closed;
        let released = self.driver.release();
        if let Err(e) = flushed {
            if let Err(release_err) = released {
                log::warn!("{}", release_err);
            }
            return Err(e);
        }
        released
    }

    /// Call `step` until the running flag is cleared, then close the strip
    pub fn run_until_stopped<F>(&mut self, mut step: F) -> Result<()>
    where
        F: FnMut(&mut Self) -> Result<()>,
    {
        while self.is_running() {
            step(self)?;
        }

        log::info!("Shutting down...");
        self.close()
    }

    /// Watch for Ctrl-C so the owner can turn the LEDs off before exiting.
    ///
    /// The handler only flips the running flag; the loop that owns the strip
    /// checks [`Blinkt::is_running`] and calls [`Blinkt::close`] itself.
    /// A process can install the handler only once.
    pub fn set_clear_on_exit(&mut self, clear_on_exit: bool) -> Result<()> {
        if !clear_on_exit {
            return Ok(());
        }

        let running = self.running_flag();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::Relaxed);
        })?;
        log::info!("Press Control + C to stop");
        Ok(())
    }

    /// Get a clone of the running flag, cleared once an interrupt arrives
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

/// Sleep for `ms` milliseconds
pub fn delay(ms: u64) {
    thread::sleep(Duration::from_millis(ms));
}
