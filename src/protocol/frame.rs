use std::fmt;

use crate::color::RgbwColor;
use crate::error::{LedError, Result};

/// Every command on the wire is exactly this many bytes.
pub const FRAME_LEN: usize = 7;

/// Command byte at the head of each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    SetLed = 1,
    Render = 2,
    Reset = 3,
    SetBrightness = 4,
}

/// One fixed-width command: opcode followed by six payload bytes,
/// zero-filled where unused. No framing, escaping or checksum.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame([u8; FRAME_LEN]);

impl CommandFrame {
    fn new(opcode: Opcode, payload: [u8; FRAME_LEN - 1]) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = opcode as u8;
        bytes[1..].copy_from_slice(&payload);
        CommandFrame(bytes)
    }

    pub fn opcode(&self) -> u8 {
        self.0[0]
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: Vec<String> = self.0.iter().map(|b| format!("{:02x}", b)).collect();
        write!(f, "CommandFrame[{}]", hex.join(" "))
    }
}

/// Clear staged pixel data on the device.
pub fn encode_reset() -> CommandFrame {
    CommandFrame::new(Opcode::Reset, [0; 6])
}

/// Commit staged pixel data to the strip.
pub fn encode_render() -> CommandFrame {
    CommandFrame::new(Opcode::Render, [0; 6])
}

pub fn encode_set_brightness(brightness: i64) -> Result<CommandFrame> {
    let value = u8::try_from(brightness).map_err(|_| LedError::BrightnessRange {
        value: brightness,
    })?;
    Ok(CommandFrame::new(Opcode::SetBrightness, [value, 0, 0, 0, 0, 0]))
}

/// Stage `color` at `index`. The index travels big-endian in two bytes.
pub fn encode_set_led(index: i64, color: &RgbwColor) -> Result<CommandFrame> {
    let index = u16::try_from(index).map_err(|_| LedError::IndexRange { index })?;
    let [hi, lo] = index.to_be_bytes();
    let [w, r, g, b] = color.to_bytes();
    Ok(CommandFrame::new(Opcode::SetLed, [hi, lo, w, r, g, b]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_and_render() {
        assert_eq!(encode_reset().as_bytes(), &[3, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encode_render().as_bytes(), &[2, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_set_led_snake_color() {
        let color = RgbwColor::new(0, 138, 7, 7).unwrap();
        let frame = encode_set_led(300, &color).unwrap();
        assert_eq!(frame.as_bytes(), &[1, 0x01, 0x2C, 0, 138, 7, 7]);
    }

    #[test]
    fn test_set_led_index_big_endian() {
        let color = RgbwColor::from_channels(9, 8, 7, 6);
        for index in [0i64, 1, 255, 256, 4660, 65535] {
            let frame = encode_set_led(index, &color).unwrap();
            let bytes = frame.as_bytes();
            assert_eq!(bytes.len(), FRAME_LEN);
            assert_eq!(bytes[0], Opcode::SetLed as u8);
            assert_eq!(u16::from_be_bytes([bytes[1], bytes[2]]) as i64, index);
            assert_eq!(&bytes[3..], &[9, 8, 7, 6]);
        }
    }

    #[test]
    fn test_set_led_rejects_index_outside_u16() {
        for index in [-1i64, 65536, 100_000] {
            let err = encode_set_led(index, &RgbwColor::BLACK).unwrap_err();
            assert!(matches!(err, LedError::IndexRange { index: i } if i == index));
        }
    }

    #[test]
    fn test_set_brightness() {
        for b in [0i64, 64, 255] {
            let frame = encode_set_brightness(b).unwrap();
            assert_eq!(frame.as_bytes(), &[4, b as u8, 0, 0, 0, 0, 0]);
        }
    }

    #[test]
    fn test_set_brightness_rejects_out_of_range() {
        for b in [-1i64, 256, 1000] {
            let err = encode_set_brightness(b).unwrap_err();
            assert!(matches!(err, LedError::BrightnessRange { value } if value == b));
        }
    }

    #[test]
    fn test_debug_is_hex() {
        let frame = encode_set_led(300, &RgbwColor::from_channels(0, 255, 0, 16)).unwrap();
        assert_eq!(format!("{:?}", frame), "CommandFrame[01 01 2c 00 ff 00 10]");
        assert_eq!(frame.opcode(), 1);
    }
}
