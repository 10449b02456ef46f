use std::io::Write;
use std::thread;
use std::time::Duration;

use serialport::SerialPort;
use tracing::{debug, info, trace, warn};

use crate::config::LinkConfig;
use crate::error::{Result, TransportError};
use crate::protocol::CommandFrame;

/// Exclusive owner of the link to the strip controller.
///
/// Writes block until the bytes are accepted or the port times out. The
/// handle is released when the transport is dropped or closed.
pub struct LinkTransport<W: Write = Box<dyn SerialPort>> {
    name: String,
    conn: W,
    frames_written: u64,
}

impl LinkTransport {
    /// Open the serial port described by `config`.
    pub fn open(config: &LinkConfig) -> Result<Self> {
        let mut port = serialport::new(&config.port, config.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .open()
            .map_err(|source| TransportError::Open {
                port: config.port.clone(),
                source,
            })?;

        port.set_timeout(config.timeout())
            .map_err(|source| TransportError::Configure {
                port: config.port.clone(),
                source,
            })?;

        if let Err(e) = port.write_data_terminal_ready(true) {
            warn!(port = %config.port, error = %e, "failed to set DTR");
        }

        // Allow device to initialize
        thread::sleep(Duration::from_millis(100));

        info!(
            port = %config.port,
            baud_rate = config.baud_rate,
            timeout_ms = config.timeout_ms,
            "opened serial link"
        );

        Ok(Self::with_name(config.port.clone(), port))
    }
}

impl<W: Write> LinkTransport<W> {
    /// Wrap an already open connection.
    pub fn from_writer(conn: W) -> Self {
        Self::with_name(String::from("<writer>"), conn)
    }

    fn with_name(name: String, conn: W) -> Self {
        Self {
            name,
            conn,
            frames_written: 0,
        }
    }

    /// Write one frame and flush it. No retry on failure.
    pub fn write_frame(&mut self, frame: &CommandFrame) -> Result<()> {
        trace!(port = %self.name, ?frame, "sending frame");

        self.conn
            .write_all(frame.as_bytes())
            .map_err(TransportError::Io)?;
        self.conn.flush().map_err(TransportError::Io)?;

        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_ref(&self) -> &W {
        &self.conn
    }

    /// Flush and release the connection.
    pub fn close(mut self) -> Result<()> {
        self.conn.flush().map_err(TransportError::Io)?;
        debug!(port = %self.name, frames = self.frames_written, "closed serial link");
        Ok(())
    }
}
