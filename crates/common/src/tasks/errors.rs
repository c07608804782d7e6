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

use thiserror::Error;

use crate::model::WorldStateError;
use crate::tasks::SessionError;

/// Errors a command execution can surface to its caller. "No verb matched"
/// and "nothing to parse" are not errors; they come back as a `false` result
/// plus narration.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum CommandError {
    #[error("Permission denied")]
    PermissionDenied,
    #[error("World state error during command")]
    WorldState(#[from] WorldStateError),
    #[error("Session error during command")]
    Session(#[from] SessionError),
}
