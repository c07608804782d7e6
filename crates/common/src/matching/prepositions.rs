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

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::Preposition;

/// One alternation over every raw preposition form, longest forms first so a
/// short key never shadows a phrase it prefixes ("in" vs "in front of").
fn prep_alternation() -> String {
    let mut forms: Vec<&str> = Preposition::all()
        .flat_map(|p| p.raw_forms().iter().copied())
        .collect();
    forms.sort_by_key(|f| std::cmp::Reverse(f.len()));
    // Forms are plain lowercase words and spaces; no escaping needed.
    forms.join("|")
}

lazy_static! {
    /// A preposition leading the argument string. Checked before `PREP_SPLIT`:
    /// the engine prefers a populated `before` group, so without this a
    /// string-initial preposition would lose to a later occurrence.
    static ref PREP_LEADING: Regex = {
        let alternation = prep_alternation();
        Regex::new(&format!(r"^(?P<prep>{alternation})(?: (?P<after>.*))?$"))
            .expect("preposition table failed to compile")
    };

    /// The first word-aligned preposition occurrence in a
    /// single-space-normalized argument string, split into
    /// (before, prep, after).
    static ref PREP_SPLIT: Regex = {
        let alternation = prep_alternation();
        Regex::new(&format!(
            r"^(?:(?P<before>.*?) )?(?P<prep>{alternation})(?: (?P<after>.*))?$"
        ))
        .expect("preposition table failed to compile")
    };
}

/// The result of splitting an argument string on its first preposition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrepositionSplit {
    /// Words before the preposition; empty if it led the string.
    pub before: String,
    /// The raw form the player actually typed.
    pub prepstr: String,
    /// The canonical class the raw form belongs to.
    pub prep: Preposition,
    /// Words after the preposition; empty if it ended the string.
    pub after: String,
}

/// Locate the first preposition in a normalized (single-space separated)
/// argument string. Returns `None` if no known form occurs as a whole word.
pub fn find_preposition_split(argstr: &str) -> Option<PrepositionSplit> {
    // Position 0 is by definition the earliest occurrence.
    let caps = PREP_LEADING
        .captures(argstr)
        .or_else(|| PREP_SPLIT.captures(argstr))?;
    let prepstr = caps.name("prep")?.as_str().to_string();
    let prep = Preposition::parse(&prepstr)?;
    Some(PrepositionSplit {
        before: caps.name("before").map_or_else(String::new, |m| m.as_str().to_string()),
        prepstr,
        prep,
        after: caps.name("after").map_or_else(String::new, |m| m.as_str().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::find_preposition_split;
    use crate::model::Preposition;

    #[test]
    fn test_simple_split() {
        let split = find_preposition_split("rock in box").unwrap();
        assert_eq!(split.before, "rock");
        assert_eq!(split.prepstr, "in");
        assert_eq!(split.prep, Preposition::IntoIn);
        assert_eq!(split.after, "box");
    }

    #[test]
    fn test_phrase_not_shadowed_by_short_key() {
        let split = find_preposition_split("rock in front of door").unwrap();
        assert_eq!(split.before, "rock");
        assert_eq!(split.prepstr, "in front of");
        assert_eq!(split.prep, Preposition::InFrontOf);
        assert_eq!(split.after, "door");
    }

    #[test]
    fn test_leading_preposition_beats_a_later_one() {
        let split = find_preposition_split("at box in corner").unwrap();
        assert_eq!(split.before, "");
        assert_eq!(split.prepstr, "at");
        assert_eq!(split.prep, Preposition::AtTo);
        assert_eq!(split.after, "box in corner");

        // Leading phrase forms too.
        let split = find_preposition_split("in front of desk on platform").unwrap();
        assert_eq!(split.before, "");
        assert_eq!(split.prepstr, "in front of");
        assert_eq!(split.after, "desk on platform");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let split = find_preposition_split("note to gift for alice").unwrap();
        assert_eq!(split.prepstr, "to");
        assert_eq!(split.prep, Preposition::AtTo);
        assert_eq!(split.after, "gift for alice");
    }

    #[test]
    fn test_no_mid_word_match() {
        // "within" contains both "with" and "in" but neither as a whole word.
        assert_eq!(find_preposition_split("look within box"), None);
        assert_eq!(find_preposition_split("cover the bin"), None);
    }

    #[test]
    fn test_leading_and_trailing_preposition() {
        let split = find_preposition_split("at door").unwrap();
        assert_eq!(split.before, "");
        assert_eq!(split.prepstr, "at");
        assert_eq!(split.after, "door");

        let split = find_preposition_split("rock in").unwrap();
        assert_eq!(split.before, "rock");
        assert_eq!(split.after, "");
    }

    #[test]
    fn test_no_preposition() {
        assert_eq!(find_preposition_split("the red rock"), None);
        assert_eq!(find_preposition_split(""), None);
    }
}
