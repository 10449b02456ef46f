//! Timed pixel sequences built on [`LedDriver`].
//!
//! Each generator stages a full frame, renders it and then asks its
//! [`FrameClock`] whether to continue. The clock is the only way to stop a
//! perpetual pattern such as [`ocean`].

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::ValueEnum;

use crate::color::RgbwColor;
use crate::driver::LedDriver;
use crate::error::Result;
use crate::gamma;
use crate::hsv::{HsvColor, HUE_WHEEL};

/// Color of the snake and the default theater chase.
pub const ACCENT: RgbwColor = RgbwColor::from_channels(0, 138, 7, 7);

const SNAKE_LEN: usize = 10;

/// Pacing and cooperative cancellation for animation loops.
#[derive(Debug, Clone)]
pub struct FrameClock {
    wait: Duration,
    running: Arc<AtomicBool>,
    frame_limit: Option<u64>,
    frames: u64,
}

impl FrameClock {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            running: Arc::new(AtomicBool::new(true)),
            frame_limit: None,
            frames: 0,
        }
    }

    /// Share a stop flag, e.g. with a Ctrl-C handler.
    pub fn with_running_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = running;
        self
    }

    /// Stop after this many rendered frames.
    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
            && self.frame_limit.map_or(true, |limit| self.frames < limit)
    }

    /// Count one rendered frame, sleep the inter-frame delay and report
    /// whether another frame may follow.
    pub fn tick(&mut self) -> bool {
        self.frames += 1;
        if !self.wait.is_zero() && self.is_running() {
            thread::sleep(self.wait);
        }
        self.is_running()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Pattern {
    Rainbow,
    TheaterChase,
    Glow,
    TheaterChaseRainbow,
    Snake,
    Ocean,
}

impl Pattern {
    /// Delay between renders that the pattern was tuned for.
    pub fn default_wait(self) -> Duration {
        let ms = match self {
            Pattern::Rainbow => 10,
            Pattern::Glow => 180,
            Pattern::TheaterChase
            | Pattern::TheaterChaseRainbow
            | Pattern::Snake
            | Pattern::Ocean => 50,
        };
        Duration::from_millis(ms)
    }

    pub fn run<W: Write>(
        self,
        driver: &mut LedDriver<W>,
        clock: &mut FrameClock,
        num_leds: usize,
    ) -> Result<()> {
        if !clock.is_running() {
            return Ok(());
        }
        match self {
            Pattern::Rainbow => rainbow(driver, clock, num_leds),
            Pattern::TheaterChase => theater_chase(driver, clock, num_leds, &ACCENT),
            Pattern::Glow => glow(driver, clock, num_leds),
            Pattern::TheaterChaseRainbow => theater_chase_rainbow(driver, clock, num_leds),
            Pattern::Snake => snake(driver, clock, num_leds),
            Pattern::Ocean => ocean(driver, clock, num_leds),
        }
    }
}

fn spread_hue(first: i64, index: usize, num_leds: usize) -> i64 {
    first + index as i64 * HUE_WHEEL / num_leds as i64
}

/// Five turns of the color wheel scrolling along the strip.
pub fn rainbow<W: Write>(
    driver: &mut LedDriver<W>,
    clock: &mut FrameClock,
    num_leds: usize,
) -> Result<()> {
    for first in (0..5 * HUE_WHEEL).step_by(256) {
        for i in 0..num_leds {
            let color = HsvColor::new(spread_hue(first, i, num_leds)).to_rgbw()?;
            driver.set_led(i as i64, &color)?;
        }
        driver.render()?;
        if !clock.tick() {
            return Ok(());
        }
    }
    Ok(())
}

/// Every third LED lit, marching forward one step per frame.
pub fn theater_chase<W: Write>(
    driver: &mut LedDriver<W>,
    clock: &mut FrameClock,
    num_leds: usize,
    color: &RgbwColor,
) -> Result<()> {
    for _ in 0..10 {
        for phase in 0..3 {
            driver.reset()?;
            for k in (phase..num_leds).step_by(3) {
                driver.set_led(k as i64, color)?;
            }
            driver.render()?;
            if !clock.tick() {
                return Ok(());
            }
        }
    }
    Ok(())
}

/// Whole strip ramps up through red, then green, then blue.
pub fn glow<W: Write>(
    driver: &mut LedDriver<W>,
    clock: &mut FrameClock,
    num_leds: usize,
) -> Result<()> {
    let ramp = [0u8, 50, 100, 150, 200, 250];
    let colors = ramp
        .iter()
        .map(|&v| RgbwColor::from_channels(0, v, 0, 0))
        .chain(ramp.iter().map(|&v| RgbwColor::from_channels(0, 0, v, 0)))
        .chain(ramp.iter().map(|&v| RgbwColor::from_channels(0, 0, 0, v)));

    for color in colors {
        for i in 0..num_leds {
            driver.set_led(i as i64, &color)?;
        }
        driver.render()?;
        if !clock.tick() {
            return Ok(());
        }
    }
    Ok(())
}

/// Theater chase with gamma-corrected rainbow colors that rotate each frame.
pub fn theater_chase_rainbow<W: Write>(
    driver: &mut LedDriver<W>,
    clock: &mut FrameClock,
    num_leds: usize,
) -> Result<()> {
    let mut first = 0i64;
    for _ in 0..30 {
        for phase in 0..3 {
            driver.reset()?;
            for k in (phase..num_leds).step_by(3) {
                let color = HsvColor::new(spread_hue(first, k, num_leds)).to_rgbw()?;
                driver.set_led(k as i64, &gamma::apply(color))?;
            }
            driver.render()?;
            if !clock.tick() {
                return Ok(());
            }
            first += HUE_WHEEL / 90;
        }
    }
    Ok(())
}

/// A ten LED segment crawling to the end of the strip and back.
pub fn snake<W: Write>(
    driver: &mut LedDriver<W>,
    clock: &mut FrameClock,
    num_leds: usize,
) -> Result<()> {
    let span = num_leds.saturating_sub(SNAKE_LEN);
    let forward = 0..span;
    let backward = (1..=span).rev();

    for head in forward.chain(backward) {
        driver.reset()?;
        for j in 0..SNAKE_LEN {
            driver.set_led((head + j) as i64, &ACCENT)?;
        }
        driver.render()?;
        if !clock.tick() {
            return Ok(());
        }
    }
    Ok(())
}

/// Red and blue dots bouncing between the strip ends. Never finishes on its
/// own; stop it through the clock.
///
/// A dot turns around once its position reaches 0 or `num_leds`, so index
/// `num_leds` is addressed once per sweep.
pub fn ocean<W: Write>(
    driver: &mut LedDriver<W>,
    clock: &mut FrameClock,
    num_leds: usize,
) -> Result<()> {
    if num_leds == 0 {
        return Ok(());
    }
    let end = num_leds as i64;
    let red = RgbwColor::from_channels(0, 255, 0, 0);
    let blue = RgbwColor::from_channels(0, 0, 0, 255);

    let (mut first, mut first_step) = (0i64, 1i64);
    let (mut last, mut last_step) = (end - 1, -1i64);

    loop {
        driver.reset()?;
        driver.set_led(first, &red)?;
        driver.set_led(last, &blue)?;
        driver.render()?;
        if !clock.tick() {
            return Ok(());
        }

        (first, first_step) = bounce(first, first_step, end);
        (last, last_step) = bounce(last, last_step, end);
    }
}

/// Move one step within `0..=end`, turning around on reaching either end.
fn bounce(pos: i64, step: i64, end: i64) -> (i64, i64) {
    let step = if (0..=end).contains(&(pos + step)) {
        step
    } else {
        -step
    };
    let next = pos + step;
    if next == 0 || next == end {
        (next, -step)
    } else {
        (next, step)
    }
}
