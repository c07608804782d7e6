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

use std::marker::PhantomData;

use itertools::Itertools;

use crate::matching::{
    CommandParser, MatchResult, ObjectNameMatcher, ParseCommandError, ParsedCommand,
    find_preposition_split,
};
use crate::model::{Obj, PrepSpec};
use crate::util;

/// The default command parser: one verb, an optional direct object, an
/// optional preposition plus indirect object. No quoting, no multi-preposition
/// sentences.
pub struct DefaultParseCommand<M>
where
    M: ObjectNameMatcher,
{
    phantom_data: PhantomData<M>,
}

impl<M> Default for DefaultParseCommand<M>
where
    M: ObjectNameMatcher,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<M> DefaultParseCommand<M>
where
    M: ObjectNameMatcher,
{
    pub fn new() -> Self {
        DefaultParseCommand {
            phantom_data: PhantomData,
        }
    }
}

impl<M> CommandParser<M> for DefaultParseCommand<M>
where
    M: ObjectNameMatcher,
{
    fn parse_command(
        &self,
        input: &str,
        player: Obj,
        env: &mut M,
    ) -> Result<ParsedCommand, ParseCommandError> {
        // Replace initial command characters with say/emote/eval
        let mut command = input.trim_start().to_string();
        let first_char = command.chars().next().unwrap_or(' ');
        match first_char {
            '"' => command.replace_range(..1, "say "),
            ':' => command.replace_range(..1, "emote "),
            ';' => command.replace_range(..1, "eval "),
            _ => {}
        };

        // Leading non-whitespace run is the verb; blank input is a no-op, not
        // an error the caller should crash on.
        let (verb, rest) = match command.find(char::is_whitespace) {
            Some(idx) => (command[..idx].to_string(), &command[idx..]),
            None => (command.clone(), ""),
        };
        if verb.is_empty() {
            return Err(ParseCommandError::EmptyCommand);
        }

        // The raw argument string is everything after the verb and one
        // separating space.
        let argstr = rest.strip_prefix(' ').unwrap_or(rest).to_string();

        // Tokenize and normalize to single spaces before seeking a
        // preposition, so the phrase forms line up.
        let args = util::parse_into_words(&argstr);
        let normalized = args.iter().join(" ");

        let (dobjstr, prepstr, prep, iobjstr) = match find_preposition_split(&normalized) {
            Some(split) => (
                (!split.before.is_empty()).then_some(split.before),
                Some(split.prepstr),
                PrepSpec::Other(split.prep),
                (!split.after.is_empty()).then_some(split.after),
            ),
            None => (
                (!normalized.is_empty()).then_some(normalized),
                None,
                PrepSpec::None,
                None,
            ),
        };

        let dobj = resolve_slot(env, dobjstr.as_deref())?;
        let iobj = resolve_slot(env, iobjstr.as_deref())?;

        Ok(ParsedCommand {
            player,
            cmdstr: input.to_string(),
            verb,
            argstr,
            args,
            dobjstr,
            dobj,
            prepstr,
            prep,
            iobjstr,
            iobj,
        })
    }
}

fn resolve_slot<M: ObjectNameMatcher>(
    env: &mut M,
    objstr: Option<&str>,
) -> Result<Option<MatchResult>, ParseCommandError> {
    match objstr {
        Some(objstr) => env
            .match_object(objstr)
            .map_err(ParseCommandError::ErrorDuringMatch),
        None => Ok(None),
    }
}
