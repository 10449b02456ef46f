use std::io::Write;

use serialport::SerialPort;

use crate::color::RgbwColor;
use crate::config::LinkConfig;
use crate::error::Result;
use crate::protocol;
use crate::transport::LinkTransport;

/// Public face of the strip: stage pixels with [`set_led`](Self::set_led),
/// make them visible with [`render`](Self::render).
///
/// `set_led` only checks that the index fits the 16-bit wire field. It does
/// not check the index against the configured strip length; staying on the
/// strip is the caller's job.
pub struct LedDriver<W: Write = Box<dyn SerialPort>> {
    link: LinkTransport<W>,
}

impl LedDriver {
    pub fn open(config: &LinkConfig) -> Result<Self> {
        Ok(Self::new(LinkTransport::open(config)?))
    }
}

impl<W: Write> LedDriver<W> {
    pub fn new(link: LinkTransport<W>) -> Self {
        Self { link }
    }

    /// Clear staged pixel data on the device.
    pub fn reset(&mut self) -> Result<()> {
        self.link.write_frame(&protocol::encode_reset())
    }

    pub fn set_led(&mut self, index: i64, color: &RgbwColor) -> Result<()> {
        let frame = protocol::encode_set_led(index, color)?;
        self.link.write_frame(&frame)
    }

    /// Affects subsequent renders only.
    pub fn set_brightness(&mut self, brightness: i64) -> Result<()> {
        let frame = protocol::encode_set_brightness(brightness)?;
        self.link.write_frame(&frame)
    }

    /// Commit everything staged since the last render or reset.
    pub fn render(&mut self) -> Result<()> {
        self.link.write_frame(&protocol::encode_render())
    }

    pub fn link(&self) -> &LinkTransport<W> {
        &self.link
    }

    pub fn into_link(self) -> LinkTransport<W> {
        self.link
    }

    pub fn close(self) -> Result<()> {
        self.link.close()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::LedError;
    use crate::transport::tests::FailingWriter;

    pub(crate) fn memory_driver() -> LedDriver<Vec<u8>> {
        LedDriver::new(LinkTransport::from_writer(Vec::new()))
    }

    pub(crate) fn frames(driver: &LedDriver<Vec<u8>>) -> Vec<[u8; 7]> {
        driver
            .link()
            .get_ref()
            .chunks_exact(7)
            .map(|c| [c[0], c[1], c[2], c[3], c[4], c[5], c[6]])
            .collect()
    }

    #[test]
    fn test_stage_and_commit_sequence() {
        let mut driver = memory_driver();
        driver.reset().unwrap();
        driver.set_brightness(64).unwrap();
        driver
            .set_led(300, &RgbwColor::new(0, 138, 7, 7).unwrap())
            .unwrap();
        driver.render().unwrap();

        assert_eq!(
            frames(&driver),
            vec![
                [3, 0, 0, 0, 0, 0, 0],
                [4, 64, 0, 0, 0, 0, 0],
                [1, 0x01, 0x2C, 0, 138, 7, 7],
                [2, 0, 0, 0, 0, 0, 0],
            ]
        );
    }

    #[test]
    fn test_index_past_strip_end_is_not_rejected() {
        let mut driver = memory_driver();
        driver.set_led(65535, &RgbwColor::BLACK).unwrap();
        assert_eq!(driver.link().frames_written(), 1);
    }

    #[test]
    fn test_range_errors_write_nothing() {
        let mut driver = memory_driver();

        let err = driver.set_brightness(256).unwrap_err();
        assert!(matches!(err, LedError::BrightnessRange { value: 256 }));

        let err = driver.set_led(-1, &RgbwColor::BLACK).unwrap_err();
        assert!(matches!(err, LedError::IndexRange { index: -1 }));

        let err = driver.set_led(65536, &RgbwColor::BLACK).unwrap_err();
        assert!(matches!(err, LedError::IndexRange { index: 65536 }));

        assert!(driver.link().get_ref().is_empty());
    }

    #[test]
    fn test_transport_failure_propagates() {
        let mut driver = LedDriver::new(LinkTransport::from_writer(FailingWriter {
            budget: 2,
            written: Vec::new(),
        }));
        driver.reset().unwrap();
        driver.set_led(0, &RgbwColor::BLACK).unwrap();

        assert!(matches!(driver.render(), Err(LedError::Transport(_))));
        // staged frames are not rolled back
        assert_eq!(driver.link().get_ref().written.len(), 14);
    }

    #[test]
    fn test_close() {
        let mut driver = memory_driver();
        driver.render().unwrap();
        let link = driver.into_link();
        assert_eq!(link.frames_written(), 1);
        assert!(link.close().is_ok());
    }
}
