//! Drive an RGBW LED strip attached to a microcontroller over a serial link.
//!
//! Colors are built as [`RgbwColor`] values, optionally derived from HSV with
//! [`hsv::convert`] and corrected with [`gamma::apply`], then staged on the
//! device through [`LedDriver::set_led`] and committed with
//! [`LedDriver::render`]. Every command is a fixed 7-byte frame.

pub mod animation;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod gamma;
pub mod hsv;
pub mod protocol;
pub mod transport;

pub use color::{make_channel, ChannelValue, RgbwColor};
pub use config::{Config, LinkConfig, StripConfig};
pub use driver::LedDriver;
pub use error::{LedError, TransportError};
pub use hsv::HsvColor;
pub use transport::LinkTransport;
