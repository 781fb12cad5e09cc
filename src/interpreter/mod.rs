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

//! Input event interpretation and command dispatching.
//!
//! This module is the controller of the application. It drives the polling
//! loop over an [`EventSource`], feeds each outcome through the press state
//! machine and invokes the resulting [`RemoteControl`] command.
//!
//! # Organization
//!
//! * [`state`]: the press duration state machine and volume arithmetic.
//!
//! Remote calls block the loop until they return. A failing call ends the
//! loop with an error, nothing is retried.

pub(crate) mod state;

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    input::{EventSource, PollResult, WheelEvent},
    interpreter::state::{Action, PressState, clamp_volume},
    remote::{RemoteControl, Session},
};

/// Interpreter context, owned by the event loop.
///
/// `running` is shared with the interrupt handler. Once it is cleared no
/// further event is acted on.
pub(crate) struct Interpreter<C: RemoteControl> {
    client: C,
    session: Session,
    press: PressState,
    running: Arc<AtomicBool>,
}

impl<C: RemoteControl> Interpreter<C> {
    pub(crate) fn new(client: C, session: Session, running: Arc<AtomicBool>) -> Self {
        Self {
            client,
            session,
            press: PressState::Idle,
            running,
        }
    }

    #[cfg(test)]
    pub(crate) fn press_state(&self) -> PressState {
        self.press
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Processes the outcome of one poll.
    ///
    /// Events in a batch are handled one at a time, in order. Each volume
    /// change re-reads the remote volume first, so a burst of ticks is not
    /// coalesced. The rest of a batch is dropped once shutdown is requested.
    pub(crate) fn handle(&mut self, result: PollResult) -> Result<()> {
        match result {
            PollResult::Timeout => self.press.timeout(),
            PollResult::Events(events) => {
                for event in events {
                    if !self.is_running() {
                        break;
                    }
                    self.handle_event(event)?;
                }
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: WheelEvent) -> Result<()> {
        let action = match event {
            WheelEvent::Scroll(delta) => Some(self.press.scroll(delta)),
            WheelEvent::ButtonDown => {
                self.press.button_down();
                None
            }
            WheelEvent::ButtonUp => self.press.button_up(),
        };

        match action {
            Some(action) => self.dispatch(action),
            None => Ok(()),
        }
    }

    fn dispatch(&self, action: Action) -> Result<()> {
        let session = &self.session;

        match action {
            Action::PlayPause => self
                .client
                .play_pause(&session.zone_id)
                .context("Failed to toggle playback")?,
            Action::PlayNext => self
                .client
                .play_next(&session.zone_id)
                .context("Failed to skip to next track")?,
            Action::PlayPrevious => self
                .client
                .play_previous(&session.zone_id)
                .context("Failed to skip to previous track")?,
            Action::AdjustVolume(delta) => {
                let current = self
                    .client
                    .get_volume(&session.zone_id, &session.output_name)
                    .context("Failed to read volume")?;
                self.client
                    .set_volume(&session.output_id, clamp_volume(current, delta))
                    .context("Failed to change volume")?;
            }
        }

        Ok(())
    }
}

/// Runs the polling loop until the interpreter's running flag is cleared or a
/// command fails.
///
/// An idle loop notices shutdown within one `timeout`.
pub(crate) fn run<S, C>(
    source: &mut S,
    interpreter: &mut Interpreter<C>,
    timeout: Duration,
) -> Result<()>
where
    S: EventSource,
    C: RemoteControl,
{
    while interpreter.is_running() {
        let result = source.poll(timeout)?;
        interpreter.handle(result)?;
    }

    info!("Event loop stopped");

    Ok(())
}
