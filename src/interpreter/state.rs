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

//! Press duration state machine.
//!
//! A press is classified by poll timeouts rather than timestamps: a button
//! still held when a poll times out becomes a long press. While long pressed
//! the wheel skips tracks instead of changing the volume.

use tracing::debug;

pub(crate) const MIN_VOLUME: i32 = 0;
pub(crate) const MAX_VOLUME: i32 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum PressState {
    #[default]
    Idle,
    ShortPressed,
    LongPressed,
}

/// A remote command decided by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    PlayPause,
    PlayNext,
    PlayPrevious,
    /// Change the volume relative to its current remote value.
    AdjustVolume(i32),
}

impl PressState {
    pub(crate) fn button_down(&mut self) {
        if *self == PressState::Idle {
            debug!("short press");
            *self = PressState::ShortPressed;
        }
    }

    /// Ends a press. Only a press that never became long toggles playback.
    pub(crate) fn button_up(&mut self) -> Option<Action> {
        let action = match self {
            PressState::LongPressed => None,
            PressState::Idle | PressState::ShortPressed => Some(Action::PlayPause),
        };
        *self = PressState::Idle;

        action
    }

    pub(crate) fn timeout(&mut self) {
        if *self == PressState::ShortPressed {
            debug!("long press");
            *self = PressState::LongPressed;
        }
    }

    pub(crate) fn scroll(&self, delta: i32) -> Action {
        match self {
            PressState::LongPressed if delta < 0 => Action::PlayPrevious,
            PressState::LongPressed => Action::PlayNext,
            PressState::Idle | PressState::ShortPressed => Action::AdjustVolume(delta),
        }
    }
}

/// Applies `delta` to `current`, keeping the result within the volume range.
pub(crate) fn clamp_volume(current: i32, delta: i32) -> u8 {
    current.saturating_add(delta).clamp(MIN_VOLUME, MAX_VOLUME) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_clamped_at_both_ends() {
        assert_eq!(clamp_volume(98, 5), 100);
        assert_eq!(clamp_volume(2, -10), 0);
        assert_eq!(clamp_volume(50, 1), 51);
        assert_eq!(clamp_volume(50, -1), 49);
    }

    #[test]
    fn clamp_stays_in_range_for_extreme_inputs() {
        for current in [i32::MIN, -1, 0, 37, 100, 101, i32::MAX] {
            for delta in [i32::MIN, -100, -1, 0, 1, 100, i32::MAX] {
                let volume = clamp_volume(current, delta);
                assert!(volume <= 100, "{} + {} gave {}", current, delta, volume);
            }
        }
    }

    #[test]
    fn short_press_toggles_playback() {
        let mut state = PressState::Idle;
        state.button_down();
        assert_eq!(state, PressState::ShortPressed);

        assert_eq!(state.button_up(), Some(Action::PlayPause));
        assert_eq!(state, PressState::Idle);
    }

    #[test]
    fn long_press_release_is_suppressed() {
        let mut state = PressState::Idle;
        state.button_down();
        state.timeout();
        assert_eq!(state, PressState::LongPressed);

        assert_eq!(state.button_up(), None);
        assert_eq!(state, PressState::Idle);
    }

    #[test]
    fn timeout_while_idle_changes_nothing() {
        let mut state = PressState::Idle;
        state.timeout();

        assert_eq!(state, PressState::Idle);
    }

    #[test]
    fn repeated_timeouts_stay_long() {
        let mut state = PressState::ShortPressed;
        state.timeout();
        state.timeout();

        assert_eq!(state, PressState::LongPressed);
    }

    #[test]
    fn button_down_while_long_keeps_long() {
        let mut state = PressState::LongPressed;
        state.button_down();

        assert_eq!(state, PressState::LongPressed);
    }

    #[test]
    fn release_without_press_toggles_playback() {
        let mut state = PressState::Idle;

        assert_eq!(state.button_up(), Some(Action::PlayPause));
        assert_eq!(state, PressState::Idle);
    }

    #[test]
    fn scroll_while_long_skips_tracks() {
        let state = PressState::LongPressed;

        assert_eq!(state.scroll(-1), Action::PlayPrevious);
        assert_eq!(state.scroll(1), Action::PlayNext);
        assert_eq!(state.scroll(0), Action::PlayNext);
    }

    #[test]
    fn scroll_otherwise_adjusts_volume() {
        assert_eq!(PressState::Idle.scroll(-2), Action::AdjustVolume(-2));
        assert_eq!(PressState::ShortPressed.scroll(3), Action::AdjustVolume(3));
    }
}
