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

//! Response shapes of the Roon HTTP API extension.
//!
//! Only the fields used for discovery and volume reads are modelled, anything
//! else in the payload is ignored.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::remote::error::{Lookup, RemoteError};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ZoneList {
    #[serde(default)]
    pub zones: Vec<ZoneSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ZoneSummary {
    pub zone_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ZoneResponse {
    pub zone: ZoneDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ZoneDetail {
    #[serde(default)]
    pub outputs: Vec<Output>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Output {
    pub output_id: String,
    pub display_name: String,
    // Kept loose, fixed-volume outputs report no usable value here.
    #[serde(default)]
    pub volume: Option<Value>,
}

impl Output {
    /// Current volume of the output, or `None` when the volume entry does not
    /// carry a numeric `value`.
    pub(crate) fn current_volume(&self) -> Option<i32> {
        self.volume
            .as_ref()
            .and_then(|volume| volume.get("value"))
            .and_then(Value::as_f64)
            .map(|value| value.round() as i32)
    }
}

/// Finds the id of the zone whose display name equals `name` exactly.
///
/// The first match wins when several zones share a name.
pub(crate) fn find_zone<'a>(zones: &'a ZoneList, name: &str) -> Result<&'a str, RemoteError> {
    for zone in &zones.zones {
        debug!("{} {}", zone.zone_id, zone.display_name);
    }

    zones
        .zones
        .iter()
        .find(|zone| zone.display_name == name)
        .map(|zone| zone.zone_id.as_str())
        .ok_or_else(|| RemoteError::not_found(Lookup::Zone, name))
}

/// Finds the output whose display name equals `name` exactly.
pub(crate) fn find_output<'a>(zone: &'a ZoneDetail, name: &str) -> Result<&'a Output, RemoteError> {
    zone.outputs
        .iter()
        .find(|output| output.display_name == name)
        .ok_or_else(|| RemoteError::not_found(Lookup::Output, name))
}

/// Extracts the volume of the named output.
///
/// Returns 0 when the output is absent or its volume has an unexpected shape,
/// which callers cannot tell apart from a genuine zero reading.
pub(crate) fn output_volume(zone: &ZoneDetail, name: &str) -> i32 {
    for output in &zone.outputs {
        if output.display_name != name {
            debug!("{} {}", output.output_id, output.display_name);
        }
    }

    match find_output(zone, name) {
        Ok(output) => {
            let volume = output.current_volume();
            debug!(
                "{} {}, volume: {:?}",
                output.output_id, output.display_name, volume
            );
            volume.unwrap_or(0)
        }
        Err(_) => 0,
    }
}
