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

use std::fmt;

use thiserror::Error;

/// What a failed discovery lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
    Zone,
    Output,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Zone => f.write_str("Zone"),
            Lookup::Output => f.write_str("Output"),
        }
    }
}

#[derive(Error, Debug)]
pub(crate) enum RemoteError {
    #[error("{kind} {name} not found")]
    NotFound { kind: Lookup, name: String },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RemoteError {
    pub(crate) fn not_found(kind: Lookup, name: &str) -> Self {
        RemoteError::NotFound {
            kind,
            name: name.to_string(),
        }
    }
}
