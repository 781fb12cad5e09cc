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

//! Pointing device input.
//!
//! This module selects the input device to listen to and turns its raw event
//! stream into [`WheelEvent`]s, the only inputs the interpreter understands.
//!
//! * [`EventSource`]: a wait-with-timeout source of classified events.
//! * [`device`]: the evdev backed implementation.

pub(crate) mod device;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use tracing::debug;

/// A classified input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WheelEvent {
    /// Wheel movement, positive away from the user.
    Scroll(i32),
    ButtonDown,
    ButtonUp,
}

/// Outcome of a single wait on an [`EventSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PollResult {
    /// Nothing arrived within the timeout.
    Timeout,
    /// The device was readable, the batch holds the events that classified.
    Events(Vec<WheelEvent>),
}

pub(crate) trait EventSource {
    /// Waits up to `timeout` for the next batch of events.
    fn poll(&mut self, timeout: Duration) -> Result<PollResult>;
}

/// What is known about an input device before it is opened for reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeviceDescriptor {
    pub path: PathBuf,
    pub name: String,
    pub phys: String,
}

/// Matches devices whose advertised name contains `pattern`, case-sensitively.
pub(crate) fn name_contains(pattern: &str) -> impl Fn(&DeviceDescriptor) -> bool + '_ {
    move |descriptor| descriptor.name.contains(pattern)
}

/// Picks the first device accepted by `predicate`.
pub(crate) fn select_device<P>(devices: &[DeviceDescriptor], predicate: P) -> Option<&DeviceDescriptor>
where
    P: Fn(&DeviceDescriptor) -> bool,
{
    for device in devices {
        debug!(
            "input: {} name:{} phys:{}",
            device.path.display(),
            device.name,
            device.phys
        );
    }

    devices.iter().find(|device| predicate(device))
}
