// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file. Every field has a
//! default, so a missing or partial file still yields a usable configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "wheelroon";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub version: u32,

    /// Base address of the Roon HTTP API extension.
    pub base_url: String,

    /// Display name of the zone controlled by the wheel.
    pub zone_name: String,
    /// Display name of the output, within the zone, whose volume is changed.
    pub output_name: String,

    /// BCM number of the mute control pin.
    pub mute_pin: u8,

    /// Case-sensitive substring of the input device name to attach to.
    pub device_name_pattern: String,

    /// Poll timeout in milliseconds, also the long press threshold.
    pub poll_timeout_ms: u64,

    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            base_url: "http://roon:3001".to_string(),
            zone_name: "woonkamer".to_string(),
            output_name: "woonkamer".to_string(),
            mute_pin: 22,
            device_name_pattern: "Mouse".to_string(),
            poll_timeout_ms: 400,
            log_level: "debug".to_string(),
        }
    }
}

impl AppConfig {
    pub(crate) fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}

/// Loads the configuration file, creating it with defaults if absent.
///
/// Logging is not yet set up when this runs, so the caller reports failures.
pub(crate) fn load_config() -> Result<AppConfig, confy::ConfyError> {
    confy::load(CONFIG_NAME, None)
}
