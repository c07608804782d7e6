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

use std::fmt::{Display, Formatter};

/// A stable id referencing a physical object in the world arena. Objects are
/// never referenced by pointer anywhere in the core; the `location`/`contents`
/// relation is expressed entirely in these ids.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Obj(i64);

/// The "nowhere" object; the null value of the `location` relation. No object
/// is ever created with this id.
pub const NOTHING: Obj = Obj(-1);

impl Obj {
    #[must_use]
    pub const fn mk_id(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn id(&self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn is_nothing(&self) -> bool {
        *self == NOTHING
    }

    /// Parse an absolute object reference of the form `#123`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let id = s.strip_prefix('#')?.parse::<i64>().ok()?;
        Some(Self(id))
    }
}

impl Display for Obj {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{NOTHING, Obj};

    #[test]
    fn test_parse_literal() {
        assert_eq!(Obj::parse("#42"), Some(Obj::mk_id(42)));
        assert_eq!(Obj::parse("#-1"), Some(NOTHING));
        assert_eq!(Obj::parse("42"), None);
        assert_eq!(Obj::parse("#forty-two"), None);
        assert_eq!(Obj::parse("#"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Obj::mk_id(7).to_string(), "#7");
        assert_eq!(NOTHING.to_string(), "#-1");
    }

    #[test]
    fn test_id_and_nothing_accessors() {
        assert_eq!(Obj::mk_id(7).id(), 7);
        assert!(NOTHING.is_nothing());
        assert!(!Obj::mk_id(0).is_nothing());
    }
}
