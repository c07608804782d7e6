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

use crate::model::Obj;

/// Errors related to the world state and operations on it.
///
/// The move errors are recoverable: verb bodies are expected to catch them and
/// narrate, not tear down the session. `ObjectNotFound` is a contract
/// violation (a dead id handed to the core) and propagates.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum WorldStateError {
    #[error("Object not found: {0}")]
    ObjectNotFound(Obj),

    #[error("{0} declined to move to {1}")]
    MoveDeclined(Obj, Obj),
    #[error("{1} refused entry to {0}")]
    MoveRefused(Obj, Obj),
    #[error("Recursive move: {0} cannot contain itself (via {1})")]
    RecursiveMove(Obj, Obj),

    #[error("Failed object match: {0}")]
    FailedMatch(String),

    #[error("Invalid verb pattern {0:?}: {1}")]
    InvalidVerbPattern(String, String),
}
