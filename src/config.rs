//! # Board Configuration
//!
//! Board data used by the analysis: where the pin header lives, which pins the
//! board wiring claims outside the Marlin macros, and which free pins should
//! not be recommended. Every key is optional and falls back to the MK4 data.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! board_name = "MK4"
//! header = "src/common/hwio_pindef.h"
//! board_pins = ["D11", "D15", "G4"]
//! reserved_pins = ["A0", "A1"]
//!
//! [[common_pins]]
//! pin = "E11"
//! name = "fanPrintPwm"
//! ```

use crate::pin::{PinId, PinLabel, PinParseError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_board_name")]
    pub board_name: String,
    #[serde(default = "default_mcu_name")]
    pub mcu_name: String,
    /// Path of the C header holding the Marlin pin macros.
    #[serde(default = "default_header")]
    pub header: String,
    /// Pins wired on the board but not described by Marlin macros.
    #[serde(default = "default_board_pins")]
    pub board_pins: Vec<String>,
    /// Pins shared by every board variant.
    #[serde(default = "default_common_pins")]
    pub common_pins: Vec<CommonPinConfig>,
    /// Free pins left out of the recommendations (UART, boot, RTC).
    #[serde(default = "default_reserved_pins")]
    pub reserved_pins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_name: default_board_name(),
            mcu_name: default_mcu_name(),
            header: default_header(),
            board_pins: default_board_pins(),
            common_pins: default_common_pins(),
            reserved_pins: default_reserved_pins(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CommonPinConfig {
    pub pin: String,
    pub name: String,
}

impl Config {
    pub fn board_pin_labels(&self) -> Vec<PinLabel> {
        parse_pin_list(self.board_pins.iter().map(String::as_str), "board_pins")
    }

    pub fn reserved_pin_ids(&self) -> Vec<PinId> {
        parse_pin_list(self.reserved_pins.iter().map(String::as_str), "reserved_pins")
    }
}

/// Parse identifiers, skipping malformed entries.
fn parse_pin_list<'a, T: FromStr<Err = PinParseError>>(
    pins: impl Iterator<Item = &'a str>,
    key: &str,
) -> Vec<T> {
    pins.filter_map(|s| match s.parse::<T>() {
        Ok(pin) => Some(pin),
        Err(e) => {
            tracing::warn!("Skipping {} entry '{}': {}", key, s, e);
            None
        }
    })
    .collect()
}

// Default value functions
fn default_board_name() -> String { "MK4".to_string() }
fn default_mcu_name() -> String { "STM32F407".to_string() }
fn default_header() -> String { "src/common/hwio_pindef.h".to_string() }

fn default_board_pins() -> Vec<String> {
    [
        "D11", "D15", "G4", "D13", "D12", "G3", "B7", "G8", "G2", "B6",
        "G5", "G6", "G7", "D8", "G11", "D9", "F14", "A9", "A10", "G0",
        "F2", "E10", "C8", "F13", "E7", "E3", "G1",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_common_pins() -> Vec<CommonPinConfig> {
    vec![
        CommonPinConfig { pin: "E11".to_string(), name: "fanPrintPwm".to_string() },
        CommonPinConfig { pin: "E9".to_string(), name: "fanHeatBreakPwm".to_string() },
    ]
}

fn default_reserved_pins() -> Vec<String> {
    ["A0", "A1", "B0", "B1", "C13", "C14", "C15"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path.display(), e);
            Err(ConfigError::Io(e))
        }
    }
}
