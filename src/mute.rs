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

//! Hardware mute control.
//!
//! The amplifier board mutes while its control line is held low.

use std::sync::Mutex;

use anyhow::{Context, Result};
use rppal::gpio::{Gpio, OutputPin};
use tracing::{debug, info};

/// A single digital output.
pub(crate) trait OutputLine {
    fn set_level(&mut self, high: bool);
}

impl OutputLine for OutputPin {
    fn set_level(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Claims the BCM numbered `pin` as an output.
///
/// The pin is reset to its previous mode when the returned value is dropped.
pub(crate) fn open_pin(pin: u8) -> Result<OutputPin> {
    let gpio = Gpio::new().context("Failed to access GPIO")?;
    let pin = gpio
        .get(pin)
        .with_context(|| format!("Failed to claim mute pin {}", pin))?
        .into_output();

    Ok(pin)
}

/// Owns the mute line and the local mute flag.
///
/// No input is bound to muting, the wheel only drives playback and volume,
/// so the application itself only claims and releases the line. The flag
/// operations drive the amplifier board for callers that need them.
pub(crate) struct MuteControl<L: OutputLine> {
    line: L,
    muted: bool,
}

impl<L: OutputLine> MuteControl<L> {
    /// Takes ownership of the line. The line is left untouched until the
    /// first state change.
    pub(crate) fn new(line: L) -> Self {
        Self { line, muted: false }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn is_muted(&self) -> bool {
        self.muted
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn set_muted(&mut self, muted: bool) {
        if muted {
            info!("Mute on");
        } else {
            info!("Mute off");
        }
        self.line.set_level(!muted);
        self.muted = muted;
    }

    /// Flips the mute state and returns the new one.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn toggle(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    /// Gives the line back, dropping it releases the pin.
    pub(crate) fn release(self) -> L {
        debug!("Releasing mute control");
        self.line
    }
}

/// Mute control shared between the event loop and the interrupt handler.
pub(crate) type SharedMute<L> = Mutex<Option<MuteControl<L>>>;

/// Takes the control out of `slot` and releases its line.
///
/// Returns `false` if it was already released, so whichever of the shutdown
/// paths runs second is a no-op.
pub(crate) fn release_shared<L: OutputLine>(slot: &SharedMute<L>) -> bool {
    let mut slot = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    match slot.take() {
        Some(mute) => {
            drop(mute.release());
            true
        }
        None => false,
    }
}
