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

use tracing::trace;

use crate::matching::{MatchEnvironment, MatchResult, ObjectNameMatcher};
use crate::model::{Obj, WorldStateError};

const ME: &str = "me";
const MYSELF: &str = "myself";
const HERE: &str = "here";

/// Candidates bucketed by match strength; the strongest non-empty bucket
/// decides the outcome.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
struct MatchData {
    exact_name: Vec<Obj>,
    exact_alias: Vec<Obj>,
    prefix: Vec<Obj>,
}

/// Strength of `search` against one candidate's names: 3 for an exact name
/// match, 2 for an exact alias match, 1 for a prefix of either, 0 for no
/// match. Pure; all comparison is case-insensitive.
fn match_strength(search: &str, name: &str, aliases: &[String]) -> u8 {
    if search.is_empty() || name.is_empty() {
        return 0;
    }
    let search = search.to_lowercase();
    if name.to_lowercase() == search {
        return 3;
    }
    if aliases.iter().any(|a| a.to_lowercase() == search) {
        return 2;
    }
    if name.to_lowercase().starts_with(&search)
        || aliases.iter().any(|a| a.to_lowercase().starts_with(&search))
    {
        return 1;
    }
    0
}

fn bucket_candidate(
    oid: Obj,
    match_data: &mut MatchData,
    name: &str,
    aliases: &[String],
    match_name: &str,
) {
    let bucket = match match_strength(match_name, name, aliases) {
        3 => &mut match_data.exact_name,
        2 => &mut match_data.exact_alias,
        1 => &mut match_data.prefix,
        _ => return,
    };
    if !bucket.contains(&oid) {
        bucket.push(oid);
    }
}

fn match_contents<M: MatchEnvironment>(
    env: &mut M,
    player: Obj,
    object_name: &str,
) -> Result<MatchResult, WorldStateError> {
    let mut match_data = MatchData::default();

    // player, their contents, their location, its contents
    let search = env.get_surroundings(player)?;
    let mut seen: Vec<Obj> = Vec::with_capacity(search.len());
    for oid in search {
        // De-duplicate by identity before scoring.
        if seen.contains(&oid) {
            continue;
        }
        seen.push(oid);
        if !env.obj_valid(oid)? {
            continue;
        }
        let name = env.name_of(oid)?;
        let aliases = env.aliases_of(oid)?;
        bucket_candidate(oid, &mut match_data, &name, &aliases, object_name);
    }

    let winners = if !match_data.exact_name.is_empty() {
        &match_data.exact_name
    } else if !match_data.exact_alias.is_empty() {
        &match_data.exact_alias
    } else if !match_data.prefix.is_empty() {
        &match_data.prefix
    } else {
        return Ok(MatchResult::NoMatch);
    };
    if winners.len() > 1 {
        trace!(?winners, object_name, "ambiguous match");
        return Ok(MatchResult::Ambiguous);
    }
    Ok(MatchResult::Matched(winners[0]))
}

/// The default resolver: absolute `#id` references first, then `me`/`myself`/
/// `here`, then a strength-scored search of the player's surroundings.
pub struct DefaultObjectNameMatcher<M: MatchEnvironment> {
    pub env: M,
    pub player: Obj,
}

impl<M: MatchEnvironment> ObjectNameMatcher for DefaultObjectNameMatcher<M> {
    fn match_object(&mut self, name: &str) -> Result<Option<MatchResult>, WorldStateError> {
        let object_name = name.trim();
        if object_name.is_empty() {
            return Ok(None);
        }

        // Absolute references always win over contextual search, whether or
        // not the id is live; verbs get to decide what a dead id means.
        if let Some(oid) = Obj::parse(object_name) {
            return Ok(Some(MatchResult::Matched(oid)));
        }

        // A dead player is a contract violation, not a failed match.
        if !self.env.obj_valid(self.player)? {
            return Err(WorldStateError::FailedMatch(format!(
                "invalid player {} performing object match",
                self.player
            )));
        }

        if object_name == ME || object_name == MYSELF {
            return Ok(Some(MatchResult::Matched(self.player)));
        }

        if object_name == HERE {
            let location = self.env.location_of(self.player)?;
            if location.is_nothing() {
                return Ok(None);
            }
            return Ok(Some(MatchResult::Matched(location)));
        }

        match_contents(&mut self.env, self.player, object_name).map(Some)
    }
}
