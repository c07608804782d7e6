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

//! One synchronous pass from a line of player input to one invoked verb:
//! parse, resolve, search the host list, fire. No suspension points in here;
//! a verb body is the only place a task may yield.

use std::sync::Arc;

use tracing::{debug, trace};

use weald_common::matching::{
    CommandParser, DefaultObjectNameMatcher, DefaultParseCommand, MatchResult, ParseCommandError,
    ParsedCommand,
};
use weald_common::model::{ArgSpec, NOTHING, Obj, PrepSpec, WorldStateError};
use weald_common::tasks::{CommandError, Session, SessionError};

use crate::config::Config;
use crate::verbs::{AllowAll, PermissionPolicy, VerbDef};
use crate::world::World;

const HUH_MSG: &str = "I don't understand that.";
const UNPARSED_MSG: &str = "I didn't understand that.";

/// Runs commands for connected players: parse against the player's
/// surroundings, search the host list for a matching verb, invoke it.
pub struct CommandExecutor {
    config: Config,
    policy: Arc<dyn PermissionPolicy>,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl CommandExecutor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            policy: Arc::new(AllowAll),
        }
    }

    /// Swap in a host-provided permission policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn PermissionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Parse one line of input in the player's current containment context.
    /// Blank input is a defined no-op, `Ok(None)`, not an error.
    pub fn parse(
        &self,
        world: &mut World,
        player: Obj,
        cmdstr: &str,
    ) -> Result<Option<ParsedCommand>, CommandError> {
        let mut matcher = DefaultObjectNameMatcher {
            env: &mut *world,
            player,
        };
        match DefaultParseCommand::new().parse_command(cmdstr, player, &mut matcher) {
            Ok(cmd) => Ok(Some(cmd)),
            Err(ParseCommandError::EmptyCommand) => Ok(None),
            Err(ParseCommandError::ErrorDuringMatch(e)) => Err(e.into()),
        }
    }

    /// Execute one command: `Ok(true)` when a verb fired, `Ok(false)` when
    /// nothing parsed or nothing matched (narrated). Verb errors propagate.
    pub fn execute(
        &self,
        world: &mut World,
        session: &dyn Session,
        player: Obj,
        cmdstr: &str,
    ) -> Result<bool, CommandError> {
        if !world.valid(player) {
            return Err(WorldStateError::ObjectNotFound(player).into());
        }
        let Some(cmd) = self.parse(world, player, cmdstr)? else {
            if self.config.narrate_unparsed {
                session.narrate(player, UNPARSED_MSG)?;
            }
            return Ok(false);
        };
        debug!(player = %player, verb = %cmd.verb, cmdstr, "command");

        let player_location = world.location_of(player)?;
        let Some((host, verb)) = find_verb_for_command(world, player, player_location, &cmd)?
        else {
            session.narrate(player, HUH_MSG)?;
            return Ok(false);
        };
        if !self.policy.permits(player, host, &verb) {
            return Err(CommandError::PermissionDenied);
        }
        trace!(host = %host, verb = verb.pattern_str(), "invoking verb");
        verb.invoke(world, session, &cmd)?;
        Ok(true)
    }
}

/// Search order is fixed: the player, their location, then the two resolved
/// object slots. Within a host, the kind's verb table in declaration order.
/// The first entry passing all four metadata tests wins; at most one verb
/// fires per command.
fn find_verb_for_command(
    world: &mut World,
    player: Obj,
    player_location: Obj,
    cmd: &ParsedCommand,
) -> Result<Option<(Obj, VerbDef)>, CommandError> {
    let targets_to_search = [
        Some(player),
        (player_location != NOTHING).then_some(player_location),
        cmd.dobj.and_then(|m| m.matched()),
        cmd.iobj.and_then(|m| m.matched()),
    ];
    for host in targets_to_search.into_iter().flatten() {
        // An absolute reference can put a dead id in an object slot; a dead
        // id is not a host.
        if !world.valid(host) {
            continue;
        }
        for verb in world.kind_of(host)?.verbs() {
            if verb.name_matches(&cmd.verb) && args_match(&verb, cmd, host) {
                return Ok(Some((host, verb)));
            }
        }
    }
    Ok(None)
}

/// The three argument-metadata tests, short-circuiting. `This` is id-identity
/// with the host; `None` demands an absent slot; an unresolved slot
/// (`NoMatch`/`Ambiguous`) satisfies only `Any`.
fn args_match(verb: &VerbDef, cmd: &ParsedCommand, host: Obj) -> bool {
    prep_matches(verb.args.prep, cmd.prep)
        && slot_matches(verb.args.dobj, cmd.dobj, host)
        && slot_matches(verb.args.iobj, cmd.iobj, host)
}

fn prep_matches(declared: PrepSpec, actual: PrepSpec) -> bool {
    match declared {
        PrepSpec::Any => true,
        PrepSpec::None => actual == PrepSpec::None,
        PrepSpec::Other(p) => actual == PrepSpec::Other(p),
    }
}

fn slot_matches(declared: ArgSpec, actual: Option<MatchResult>, host: Obj) -> bool {
    match declared {
        ArgSpec::Any => true,
        ArgSpec::None => actual.is_none(),
        ArgSpec::This => actual == Some(MatchResult::Matched(host)),
    }
}

/// Helper for verb bodies: narrate a canned complaint when an object slot did
/// not land on a live object, and report whether it did so. A verb decides
/// for itself which slots it cares about; nothing calls this automatically.
pub fn match_failed(
    world: &World,
    slot: Option<MatchResult>,
    objstr: &str,
    session: &dyn Session,
    player: Obj,
) -> Result<bool, SessionError> {
    let msg = match slot {
        Some(MatchResult::Matched(oid)) if world.valid(oid) => return Ok(false),
        Some(MatchResult::Matched(_)) | Some(MatchResult::NoMatch) => {
            format!("I don't see \"{objstr}\" here.")
        }
        Some(MatchResult::Ambiguous) => format!("I'm not sure which \"{objstr}\" you mean."),
        None => "You must name something.".to_string(),
    };
    session.narrate(player, &msg)?;
    Ok(true)
}
