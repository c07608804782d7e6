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

use crate::model::{Obj, PrepSpec, WorldStateError};

pub mod command_parse;
pub mod match_env;
#[doc(hidden)]
pub mod mock_matching_env;
mod prepositions;

pub use command_parse::DefaultParseCommand;
pub use match_env::DefaultObjectNameMatcher;
pub use prepositions::{PrepositionSplit, find_preposition_split};

/// Outcome of resolving one object slot of a command against the player's
/// surroundings. An absent slot (the player typed nothing there) is
/// represented as `None` at the `ParsedCommand` level, not here.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchResult {
    /// No candidate matched at any strength.
    NoMatch,
    /// More than one candidate tied in the strongest non-empty bucket.
    Ambiguous,
    Matched(Obj),
}

impl MatchResult {
    /// The matched object, if resolution actually landed on one.
    #[must_use]
    pub fn matched(&self) -> Option<Obj> {
        match self {
            Self::Matched(oid) => Some(*oid),
            _ => None,
        }
    }
}

/// Output from command parsing, which is then matched against verb tables
/// during dispatch. Ephemeral, one per invocation; never persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedCommand {
    pub player: Obj,
    pub cmdstr: String,
    pub verb: String,
    pub argstr: String,
    pub args: Vec<String>,

    pub dobjstr: Option<String>,
    pub dobj: Option<MatchResult>,

    pub prepstr: Option<String>,
    pub prep: PrepSpec,

    pub iobjstr: Option<String>,
    pub iobj: Option<MatchResult>,
}

/// The command parser interface. Parses a command string into a
/// `ParsedCommand`, or returns an error if the command is blank or matching
/// failed outright.
pub trait CommandParser<M: ObjectNameMatcher> {
    fn parse_command(
        &self,
        input: &str,
        player: Obj,
        env: &mut M,
    ) -> Result<ParsedCommand, ParseCommandError>;
}

/// The interface the matching code needs to read the containment graph.
/// Separated out so it can be mocked. Takes `&mut self` because enumeration
/// vets, and vetting may repair.
pub trait MatchEnvironment {
    /// Whether the given id refers to a live object.
    fn obj_valid(&mut self, oid: Obj) -> Result<bool, WorldStateError>;

    /// The display/match name of an object.
    fn name_of(&mut self, oid: Obj) -> Result<String, WorldStateError>;

    /// The additional match keys of an object.
    fn aliases_of(&mut self, oid: Obj) -> Result<Vec<String>, WorldStateError>;

    /// The location of an object (`NOTHING` for nowhere).
    fn location_of(&mut self, oid: Obj) -> Result<Obj, WorldStateError>;

    /// The player, their contents, their location, and its contents: all the
    /// things we'd search for matches on. May contain duplicates; the matcher
    /// de-duplicates by id.
    fn get_surroundings(&mut self, player: Obj) -> Result<Vec<Obj>, WorldStateError>;
}

impl<M: MatchEnvironment + ?Sized> MatchEnvironment for &mut M {
    fn obj_valid(&mut self, oid: Obj) -> Result<bool, WorldStateError> {
        (**self).obj_valid(oid)
    }

    fn name_of(&mut self, oid: Obj) -> Result<String, WorldStateError> {
        (**self).name_of(oid)
    }

    fn aliases_of(&mut self, oid: Obj) -> Result<Vec<String>, WorldStateError> {
        (**self).aliases_of(oid)
    }

    fn location_of(&mut self, oid: Obj) -> Result<Obj, WorldStateError> {
        (**self).location_of(oid)
    }

    fn get_surroundings(&mut self, player: Obj) -> Result<Vec<Obj>, WorldStateError> {
        (**self).get_surroundings(player)
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    EmptyCommand,
    #[error("Error occurred during object matching")]
    ErrorDuringMatch(#[source] WorldStateError),
}

/// Trait for matching names in the environment. Used by the command parser to
/// resolve the entities named in a command's object slots.
pub trait ObjectNameMatcher {
    /// `Ok(None)` means the slot stays empty (blank name, or `here` while
    /// nowhere); anything else is a definite resolution outcome.
    fn match_object(&mut self, name: &str) -> Result<Option<MatchResult>, WorldStateError>;
}
