use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use rgbw_serial::animation::{FrameClock, Pattern};
use rgbw_serial::{Config, LedDriver};

#[derive(Parser)]
#[command(name = "rgbw_serial")]
#[command(about = "Play animations on an RGBW LED strip behind a serial controller", long_about = None)]
struct Cli {
    /// Path to configuration file (JSON)
    config: String,

    /// Animation to play
    #[arg(long, value_enum, default_value_t = Pattern::Ocean)]
    pattern: Pattern,

    /// Delay between frames in milliseconds (defaults to the pattern's own pace)
    #[arg(long)]
    wait_ms: Option<u64>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Enable detailed debug (hex dumps every frame)
    #[arg(long)]
    ddebug: bool,
}

fn install_tracing(cli: &Cli) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("RGBW_SERIAL_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if cli.ddebug {
            "rgbw_serial=trace"
        } else if cli.debug {
            "rgbw_serial=debug"
        } else {
            "rgbw_serial=warn"
        })
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_tracing(&cli);

    let config = Config::load(&cli.config)?;

    let mut driver = LedDriver::open(&config.link)
        .with_context(|| format!("Failed to open LED driver on {}", config.link.port))?;
    driver.reset()?;
    driver.set_brightness(config.strip.brightness)?;

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    if let Err(e) = ctrlc::set_handler(move || {
        info!("shutting down");
        handler_flag.store(false, Ordering::Relaxed);
    }) {
        warn!(error = %e, "could not set Ctrl-C handler");
    }

    let wait = cli
        .wait_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| cli.pattern.default_wait());
    let mut clock = FrameClock::new(wait).with_running_flag(running);
    if let Some(limit) = cli.frames {
        clock = clock.with_frame_limit(limit);
    }

    info!(pattern = ?cli.pattern, leds = config.strip.num_leds, ?wait, "starting animation");
    let result = cli.pattern.run(&mut driver, &mut clock, config.strip.num_leds);
    info!(
        port = driver.link().name(),
        frames = clock.frames(),
        "animation finished"
    );

    // Turn the strip off (best effort)
    if let Err(e) = driver.reset().and_then(|_| driver.render()) {
        error!(error = %e, "failed to blank strip");
    }
    if let Err(e) = driver.close() {
        error!(error = %e, "failed to close serial link");
    }

    result.context("Animation aborted")
}
