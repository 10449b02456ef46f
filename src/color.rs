use std::fmt;

use crate::error::{LedError, Result};

/// A single validated 8-bit color intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChannelValue(u8);

impl ChannelValue {
    pub const MIN: ChannelValue = ChannelValue(0);
    pub const MAX: ChannelValue = ChannelValue(255);

    /// Validate an integer as a channel intensity.
    pub fn new(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map(ChannelValue)
            .map_err(|_| LedError::ColorRange { value })
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for ChannelValue {
    fn from(value: u8) -> Self {
        ChannelValue(value)
    }
}

impl TryFrom<i64> for ChannelValue {
    type Error = LedError;

    fn try_from(value: i64) -> Result<Self> {
        ChannelValue::new(value)
    }
}

impl From<ChannelValue> for u8 {
    fn from(value: ChannelValue) -> Self {
        value.0
    }
}

/// Free-function form of [`ChannelValue::new`].
pub fn make_channel(value: i64) -> Result<ChannelValue> {
    ChannelValue::new(value)
}

/// Four-channel color as the strip expects it: white, red, green, blue.
///
/// Immutable; transforms such as [`crate::gamma::apply`] return a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbwColor {
    white: ChannelValue,
    red: ChannelValue,
    green: ChannelValue,
    blue: ChannelValue,
}

impl RgbwColor {
    pub const BLACK: RgbwColor = RgbwColor::from_channels(0, 0, 0, 0);

    /// Build a color from unchecked integers, failing on the first channel
    /// outside 0..=255 (checked in white, red, green, blue order).
    pub fn new(white: i64, red: i64, green: i64, blue: i64) -> Result<Self> {
        Ok(Self {
            white: ChannelValue::new(white)?,
            red: ChannelValue::new(red)?,
            green: ChannelValue::new(green)?,
            blue: ChannelValue::new(blue)?,
        })
    }

    /// Build a color from bytes, which are valid by construction.
    pub const fn from_channels(white: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            white: ChannelValue(white),
            red: ChannelValue(red),
            green: ChannelValue(green),
            blue: ChannelValue(blue),
        }
    }

    pub const fn white(&self) -> u8 {
        self.white.get()
    }

    pub const fn red(&self) -> u8 {
        self.red.get()
    }

    pub const fn green(&self) -> u8 {
        self.green.get()
    }

    pub const fn blue(&self) -> u8 {
        self.blue.get()
    }

    /// Channels in wire order.
    pub const fn to_bytes(&self) -> [u8; 4] {
        [self.white(), self.red(), self.green(), self.blue()]
    }
}

impl fmt::Display for RgbwColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "W{} R{} G{} B{}",
            self.white(),
            self.red(),
            self.green(),
            self.blue()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_channel_accepts_full_byte_range() {
        for v in 0..=255 {
            assert_eq!(make_channel(v).unwrap().get() as i64, v);
        }
    }

    #[test]
    fn test_make_channel_rejects_out_of_range() {
        for v in [-1, 256, -300, 1000, i64::MIN, i64::MAX] {
            match make_channel(v) {
                Err(LedError::ColorRange { value }) => assert_eq!(value, v),
                other => panic!("expected ColorRange for {}, got {:?}", v, other),
            }
        }
    }

    #[test]
    fn test_rgbw_new_keeps_channel_order() {
        let color = RgbwColor::new(1, 2, 3, 4).unwrap();
        assert_eq!(color.white(), 1);
        assert_eq!(color.red(), 2);
        assert_eq!(color.green(), 3);
        assert_eq!(color.blue(), 4);
        assert_eq!(color.to_bytes(), [1, 2, 3, 4]);
        assert_eq!(color, RgbwColor::from_channels(1, 2, 3, 4));
    }

    #[test]
    fn test_rgbw_new_reports_first_bad_channel() {
        let err = RgbwColor::new(0, 300, -5, 0).unwrap_err();
        assert!(matches!(err, LedError::ColorRange { value: 300 }));

        let err = RgbwColor::new(0, 0, 0, 256).unwrap_err();
        assert!(matches!(err, LedError::ColorRange { value: 256 }));
    }

    #[test]
    fn test_display() {
        let color = RgbwColor::from_channels(0, 138, 7, 7);
        assert_eq!(color.to_string(), "W0 R138 G7 B7");
    }
}
