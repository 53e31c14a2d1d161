use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process;

use blinkt_sysfs::strip::PIXEL_COUNT;
use blinkt_sysfs::{delay, Blinkt, Config, SysfsGpio};

#[derive(Parser)]
#[command(name = "blinkt")]
#[command(about = "Drive an 8 pixel APA102 LED strip over sysfs GPIO", long_about = None)]
struct Cli {
    /// Path to configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Enable detailed debug (hex dump of every frame)
    #[arg(long)]
    ddebug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set a colour and leave the LEDs lit
    Set {
        r: u8,
        g: u8,
        b: u8,
        /// Only change this pixel
        #[arg(long)]
        pixel: Option<usize>,
        /// Brightness between 0.0 and 1.0
        #[arg(long)]
        brightness: Option<f64>,
    },
    /// Turn every LED off and release the GPIO lines
    Clear,
    /// Run a single lit pixel along the strip until Ctrl-C
    Chase {
        r: u8,
        g: u8,
        b: u8,
        /// Delay between steps
        #[arg(long, default_value = "100")]
        delay_ms: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ddebug implies debug
    let level = if cli.ddebug {
        "trace"
    } else if cli.debug {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => {
            let config_data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&config_data)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => Config::default(),
    };

    let mut blinkt = Blinkt::open(&config).context("Failed to set up LED strip")?;

    match cli.command {
        Command::Set { r, g, b, pixel, brightness } => {
            if let Some(brightness) = brightness {
                blinkt.set_brightness(brightness)?;
            }
            match pixel {
                Some(index) => {
                    blinkt.set_pixel(index, r, g, b)?;
                }
                None => {
                    blinkt.set_all(r, g, b);
                }
            }
            blinkt.show()?;
        }
        Command::Clear => {
            blinkt.close()?;
        }
        Command::Chase { r, g, b, delay_ms } => {
            blinkt.set_clear_on_exit(config.clear_on_exit)?;
            chase(&mut blinkt, (r, g, b), delay_ms)?;
        }
    }

    Ok(())
}

/// Animate until interrupted, then turn the strip off and exit with status 1
fn chase(
    blinkt: &mut Blinkt<SysfsGpio>,
    (r, g, b): (u8, u8, u8),
    delay_ms: u64,
) -> Result<()> {
    let mut position = 0;

    blinkt.run_until_stopped(|blinkt| {
        blinkt.clear().set_pixel(position, r, g, b)?;
        blinkt.show()?;
        position = (position + 1) % PIXEL_COUNT;
        delay(delay_ms);
        Ok(())
    })?;

    process::exit(1);
}
