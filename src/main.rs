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

//! # Mouse wheel remote for Roon.
//!
//! Changes the volume of a Roon output with the scroll wheel of a mouse, and
//! controls playback with its middle button:
//!
//! * **Scroll** changes the volume relative to its current value.
//! * **Click** the middle button to toggle play/pause.
//! * **Hold** the middle button and scroll to skip to the previous or next
//!   track.
//!
//! ## Architecture
//!
//! The application follows a setup-run-teardown pattern so the mute control
//! pin is released however the event loop ends. All work happens on the main
//! thread: a single polling loop waits on the input device and issues
//! blocking HTTP requests to the Roon API extension. The only other thread is
//! the interrupt handler, which stops the loop, releases the pin and exits
//! without waiting for a request in flight.

mod config;
mod input;
mod interpreter;
mod mute;
mod remote;
mod util;

use anyhow::{Context, Result};
use rppal::gpio::OutputPin;
use std::{
    process,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};
use tracing::{debug, error, info, warn};

use crate::{
    config::AppConfig,
    input::device::{self, EvdevSource},
    interpreter::Interpreter,
    mute::{MuteControl, SharedMute},
    remote::RoonClient,
    util::logging,
};

/// The entry point of the application.
///
/// Loads the configuration, attaches to the first matching input device,
/// claims the mute pin and hands control to [`run`]. The pin is released
/// before returning when the loop fails, and by the interrupt handler when
/// the process is interrupted.
fn main() -> Result<()> {
    let loaded = config::load_config();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    logging::init_logging(&config.log_level);
    if let Err(e) = &loaded {
        warn!("Failed to load configuration, using defaults: {}", e);
    }

    info!("Mouse volume control for roon.");

    let devices = device::list_devices();
    let Some(descriptor) = input::select_device(
        &devices,
        input::name_contains(&config.device_name_pattern),
    ) else {
        info!("No mouse detected.");
        return Ok(());
    };
    let mut source = EvdevSource::open(descriptor)?;

    let mute_control: Arc<SharedMute<_>> = Arc::new(Mutex::new(Some(MuteControl::new(
        mute::open_pin(config.mute_pin)?,
    ))));

    let running = Arc::new(AtomicBool::new(true));
    install_interrupt_handler(Arc::clone(&mute_control), Arc::clone(&running))?;

    let res = run(&config, &mut source, running);
    mute::release_shared(&mute_control);

    res.context("Application error occurred")
}

/// Installs the SIGINT/SIGTERM handler.
///
/// The handler stops the event loop, releases the mute pin and exits with
/// status 0 straight away, so a blocking request or startup discovery does not
/// hold up the shutdown.
fn install_interrupt_handler(
    mute_control: Arc<SharedMute<OutputPin>>,
    running: Arc<AtomicBool>,
) -> Result<()> {
    ctrlc::set_handler(move || {
        debug!("Interrupt received");
        running.store(false, Ordering::SeqCst);
        mute::release_shared(&mute_control);
        process::exit(0);
    })
    .context("Failed to install interrupt handler")
}

/// Resolves the controlled zone and enters the event loop.
///
/// # Errors
///
/// Returns an error if the zone or output cannot be found, or if any remote
/// command fails once the loop is running.
fn run(config: &AppConfig, source: &mut EvdevSource, running: Arc<AtomicBool>) -> Result<()> {
    let client = RoonClient::new(&config.base_url).context("Failed to create HTTP client")?;

    let session = client
        .resolve_session(&config.zone_name, &config.output_name)
        .inspect_err(|e| error!("{}!", e))
        .context("Failed to resolve zone")?;

    let mut interpreter = Interpreter::new(client, session, running);

    interpreter::run(source, &mut interpreter, config.poll_timeout())
}
