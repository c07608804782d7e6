// Copyright (C) 2025 The Weald Authors. This program is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License as published by the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Config is created by the host, and passed to the command executor. Used to
//! hold things typically configured by CLI flags.

#[derive(Clone, Debug)]
pub struct Config {
    /// Whether input that fails to parse at all (blank lines) gets a narrated
    /// complaint, or is silently dropped.
    pub narrate_unparsed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            narrate_unparsed: true,
        }
    }
}
