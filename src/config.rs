use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub link: LinkConfig,
    #[serde(default)]
    pub strip: StripConfig,
}

impl Config {
    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkConfig {
    pub port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Serial read/write timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl LinkConfig {
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: default_baud_rate(),
            timeout_ms: default_timeout_ms(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripConfig {
    /// Only used by the animations; the driver does not bound indices by it.
    #[serde(default = "default_num_leds")]
    pub num_leds: usize,
    /// Sent once at start-up. Kept as a wide integer so out-of-range values
    /// are reported by the driver rather than by the parser.
    #[serde(default = "default_brightness")]
    pub brightness: i64,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            num_leds: default_num_leds(),
            brightness: default_brightness(),
        }
    }
}

fn default_baud_rate() -> u32 {
    115200
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_num_leds() -> usize {
    300
}

fn default_brightness() -> i64 {
    64
}
