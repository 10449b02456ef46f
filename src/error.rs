use thiserror::Error;

/// Errors raised by the color, protocol and transport layers.
///
/// Every failure is returned to the immediate caller; nothing here retries.
#[derive(Debug, Error)]
pub enum LedError {
    #[error("color value {value} is out of range 0..=255")]
    ColorRange { value: i64 },

    #[error("{value} is an invalid brightness")]
    BrightnessRange { value: i64 },

    #[error("LED index {index} does not fit in 16 bits")]
    IndexRange { index: i64 },

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}

/// Failures of the serial link itself.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open serial port {port}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("failed to configure serial port {port}")]
    Configure {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedError>;
