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

//! evdev backed input source.
//!
//! The device is opened read-only and is not grabbed, the pointer keeps
//! working for any other consumer.

use std::{
    io,
    os::unix::io::{AsRawFd, RawFd},
    time::Duration,
};

use anyhow::{Context, Result};
use evdev::{Device, EventType, Key, RelativeAxisType};
use tracing::debug;

use crate::input::{DeviceDescriptor, EventSource, PollResult, WheelEvent};

/// Lists every input device that could be opened.
pub(crate) fn list_devices() -> Vec<DeviceDescriptor> {
    let mut devices: Vec<DeviceDescriptor> = evdev::enumerate()
        .map(|(path, device)| DeviceDescriptor {
            path,
            name: device.name().unwrap_or_default().to_string(),
            phys: device.physical_path().unwrap_or_default().to_string(),
        })
        .collect();

    devices.sort_by(|a, b| a.path.cmp(&b.path));
    devices
}

/// Maps a raw evdev event onto a [`WheelEvent`].
///
/// Both wheels scroll, the middle button is the press button. Autorepeat and
/// every other event type are dropped.
pub(crate) fn classify(event_type: EventType, code: u16, value: i32) -> Option<WheelEvent> {
    if event_type == EventType::RELATIVE
        && (code == RelativeAxisType::REL_WHEEL.0 || code == RelativeAxisType::REL_HWHEEL.0)
    {
        return Some(WheelEvent::Scroll(value));
    }

    if event_type == EventType::KEY && code == Key::BTN_MIDDLE.code() {
        return match value {
            1 => Some(WheelEvent::ButtonDown),
            0 => Some(WheelEvent::ButtonUp),
            _ => None,
        };
    }

    None
}

pub(crate) struct EvdevSource {
    device: Device,
}

impl EvdevSource {
    /// Opens the described device for reading.
    pub(crate) fn open(descriptor: &DeviceDescriptor) -> Result<Self> {
        let device = Device::open(&descriptor.path)
            .with_context(|| format!("Failed to open input device {:?}", descriptor.path))?;

        debug!("Mouse linked to event {}", descriptor.path.display());
        if let Some(axes) = device.supported_relative_axes() {
            debug!("relative axes: {:?}", axes.iter().collect::<Vec<_>>());
        }
        if let Some(keys) = device.supported_keys() {
            debug!("keys: {:?}", keys.iter().collect::<Vec<_>>());
        }

        Ok(Self { device })
    }
}

impl EventSource for EvdevSource {
    fn poll(&mut self, timeout: Duration) -> Result<PollResult> {
        match wait_readable(self.device.as_raw_fd(), timeout)? {
            Readiness::Ready => {}
            not_ready => return Ok(not_ready_result(not_ready)),
        }

        let events = self
            .device
            .fetch_events()
            .context("Failed to read events from input device")?
            .filter_map(|ev| classify(ev.event_type(), ev.code(), ev.value()))
            .collect();

        Ok(PollResult::Events(events))
    }
}

/// Outcome of waiting on the device descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Ready,
    TimedOut,
    /// A signal arrived before the device became readable or the timeout
    /// elapsed.
    Interrupted,
}

/// What the interpreter sees when the device was not readable.
///
/// Only a full timeout may promote a press, an interrupted wait is reported
/// as an empty batch.
fn not_ready_result(readiness: Readiness) -> PollResult {
    match readiness {
        Readiness::TimedOut => PollResult::Timeout,
        Readiness::Ready | Readiness::Interrupted => PollResult::Events(Vec::new()),
    }
}

/// Blocks until `fd` is readable, `timeout` elapses or a signal arrives.
fn wait_readable(fd: RawFd, timeout: Duration) -> Result<Readiness> {
    let mut pollfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let timeout_ms = timeout.as_millis().min(libc::c_int::MAX as u128) as libc::c_int;

    let rc = unsafe { libc::poll(&mut pollfd, 1, timeout_ms) };
    if rc < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(Readiness::Interrupted);
        }
        return Err(err).context("poll on input device failed");
    }

    if rc > 0 {
        Ok(Readiness::Ready)
    } else {
        Ok(Readiness::TimedOut)
    }
}
