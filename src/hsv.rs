//! Integer-only hue/saturation/brightness to RGBW conversion.
//!
//! The 16-bit hue wheel is folded onto six 255-step ramps and then scaled
//! with 8-bit fixed point arithmetic. No floating point is involved, so the
//! output is identical on every platform and matches the strip firmware.

use crate::color::RgbwColor;
use crate::error::Result;

/// One full turn of the hue wheel.
pub const HUE_WHEEL: i64 = 65536;

/// Length of the six concatenated color ramps.
const RAMP_LEN: u32 = 1530;

/// Input descriptor for [`convert`]. Not stored anywhere; it only carries the
/// three parameters with their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvColor {
    pub hue: i64,
    pub saturation: u8,
    pub brightness: u8,
}

impl HsvColor {
    /// Fully saturated, full brightness color at `hue`.
    pub const fn new(hue: i64) -> Self {
        Self {
            hue,
            saturation: 255,
            brightness: 255,
        }
    }

    pub const fn with_saturation(mut self, saturation: u8) -> Self {
        self.saturation = saturation;
        self
    }

    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn to_rgbw(self) -> Result<RgbwColor> {
        convert(self.hue, self.saturation, self.brightness)
    }
}

/// Convert HSV to RGBW. The white channel is always 0.
///
/// `hue` is taken modulo [`HUE_WHEEL`], so any integer is accepted.
pub fn convert(hue: i64, saturation: u8, brightness: u8) -> Result<RgbwColor> {
    let (red, green, blue) = base_rgb(ramp_position(hue));

    let brightness1 = brightness as u32 + 1;
    let saturation1 = saturation as u32 + 1;
    let saturation2 = 255 - saturation as u32;

    let scale = |base: u32| ((((base * saturation1) >> 8) + saturation2) * brightness1) >> 8;

    RgbwColor::new(
        0,
        scale(red) as i64,
        scale(green) as i64,
        scale(blue) as i64,
    )
}

/// Map a hue onto 0..1530, rounding to nearest.
fn ramp_position(hue: i64) -> u32 {
    let hue = hue.rem_euclid(HUE_WHEEL) as u32;
    ((hue * RAMP_LEN + 32768) >> 16) % RAMP_LEN
}

/// Unsaturated, full brightness color for a ramp position.
fn base_rgb(h: u32) -> (u32, u32, u32) {
    match h {
        0..=254 => (255, h, 0),
        255..=509 => (510 - h, 255, 0),
        510..=764 => (0, 255, h - 510),
        765..=1019 => (0, 1020 - h, 255),
        1020..=1274 => (h - 1020, 0, 255),
        1275..=1529 => (255, 0, 1530 - h),
        // ramp_position reduces modulo RAMP_LEN
        _ => (255, 0, 0),
    }
}
