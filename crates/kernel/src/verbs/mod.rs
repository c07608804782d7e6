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

//! The verb registry: explicit, ordered tables of command handlers attached
//! to object kinds. This is the plugin interface for adding world behavior —
//! a handler plus the four metadata fields dispatch tests against.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use weald_common::matching::ParsedCommand;
use weald_common::model::{Obj, VerbArgsSpec, WorldStateError};
use weald_common::tasks::{CommandError, Session};

use crate::world::World;

/// A command handler body. Receives the world, the narration channel, and the
/// parsed command; recoverable conditions (declined moves, failed matches)
/// should be narrated, not returned.
pub type VerbHandler =
    Arc<dyn Fn(&mut World, &dyn Session, &ParsedCommand) -> Result<(), CommandError> + Send + Sync>;

/// One entry of a verb table: an anchored name pattern, the argument
/// metadata, and the handler to invoke when both match.
#[derive(Clone)]
pub struct VerbDef {
    pattern: Regex,
    pub args: VerbArgsSpec,
    handler: VerbHandler,
}

impl VerbDef {
    /// Compile a verb definition. The name pattern is a regex, matched
    /// anchored against the whole verb word the player typed.
    pub fn new(
        pattern: &str,
        args: VerbArgsSpec,
        handler: VerbHandler,
    ) -> Result<Self, WorldStateError> {
        let compiled = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            WorldStateError::InvalidVerbPattern(pattern.to_string(), e.to_string())
        })?;
        Ok(Self {
            pattern: compiled,
            args,
            handler,
        })
    }

    /// Whether the verb word the player typed matches this entry's pattern.
    #[must_use]
    pub fn name_matches(&self, verb: &str) -> bool {
        self.pattern.is_match(verb)
    }

    /// The pattern source, for logging.
    #[must_use]
    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn invoke(
        &self,
        world: &mut World,
        session: &dyn Session,
        cmd: &ParsedCommand,
    ) -> Result<(), CommandError> {
        (self.handler)(world, session, cmd)
    }
}

impl fmt::Debug for VerbDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerbDef")
            .field("pattern", &self.pattern.as_str())
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Consulted immediately before a matched verb fires. The core performs no
/// check of its own; enforcement is host policy, injected here.
pub trait PermissionPolicy: Send + Sync {
    fn permits(&self, player: Obj, host: Obj, verb: &VerbDef) -> bool;
}

/// The default policy: everything is allowed.
pub struct AllowAll;

impl PermissionPolicy for AllowAll {
    fn permits(&self, _player: Obj, _host: Obj, _verb: &VerbDef) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use weald_common::model::{VerbArgsSpec, WorldStateError};

    use super::VerbDef;

    fn noop() -> super::VerbHandler {
        Arc::new(|_, _, _| Ok(()))
    }

    #[test]
    fn test_name_pattern_is_anchored() {
        let verb = VerbDef::new("look", VerbArgsSpec::none_none_none(), noop()).unwrap();
        assert!(verb.name_matches("look"));
        assert!(!verb.name_matches("looked"));
        assert!(!verb.name_matches("overlook"));
    }

    #[test]
    fn test_name_pattern_alternation_and_abbreviation() {
        let verb = VerbDef::new("l(ook)?", VerbArgsSpec::none_none_none(), noop()).unwrap();
        assert!(verb.name_matches("l"));
        assert!(verb.name_matches("look"));
        assert!(!verb.name_matches("lo"));

        let verb = VerbDef::new("get|take", VerbArgsSpec::any_any_any(), noop()).unwrap();
        assert!(verb.name_matches("get"));
        assert!(verb.name_matches("take"));
        assert!(!verb.name_matches("getty"));
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let err = VerbDef::new("l(ook", VerbArgsSpec::none_none_none(), noop()).unwrap_err();
        match err {
            WorldStateError::InvalidVerbPattern(pattern, _) => assert_eq!(pattern, "l(ook"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
