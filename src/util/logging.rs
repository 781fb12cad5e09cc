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

//! Logging setup.
//!
//! Installs a `tracing` subscriber that writes human-readable lines to
//! `stderr`. The filter is taken from `RUST_LOG` when it is set, otherwise it
//! is built from the configured level.

use tracing_subscriber::EnvFilter;

/// HTTP stack crates are chatty at debug level, keep them at warnings.
const QUIET_CRATES: [&str; 3] = ["reqwest", "hyper", "rustls"];

/// Builds the filter directive string for the given base level.
pub(crate) fn filter_directives(level: &str) -> String {
    let mut directives = vec![level.to_string()];
    directives.extend(QUIET_CRATES.iter().map(|name| format!("{}=warn", name)));
    directives.join(",")
}

/// Initialises the global subscriber.
///
/// Calling this more than once is harmless, later calls are ignored.
pub(crate) fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
