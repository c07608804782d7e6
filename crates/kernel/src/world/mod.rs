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

//! The containment world: an arena of physical objects related by
//! `location`/`contents`, with the vet/move protocol that keeps the relation
//! acyclic and duplicate-free.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{trace, warn};

use weald_common::matching::MatchEnvironment;
use weald_common::model::{NOTHING, Obj, WorldStateError};

use crate::verbs::VerbDef;

/// Behavior attached to a kind of physical object: the move-protocol
/// negotiation hooks and the kind's verb table. The kind hierarchy is
/// composed explicitly; a kind that extends another calls through to it.
pub trait ObjectKind: Send + Sync {
    /// Pure predicate: may this object move to `dest`? No side effects.
    fn moveable(&self, _world: &World, _this: Obj, _dest: Obj) -> bool {
        false
    }

    /// Pure predicate: would this object admit `what` into its contents?
    /// No side effects.
    fn acceptable(&self, _world: &World, _this: Obj, _what: Obj) -> bool {
        false
    }

    /// Side-effecting admission hook. Only ever invoked by the move
    /// protocol; never by resolution or dispatch.
    fn accept(&self, world: &mut World, this: Obj, what: Obj) -> bool {
        self.acceptable(world, this, what)
    }

    /// Whether to hide `what` from contents observers. The canonical
    /// invariant-bearing collection is unaffected.
    fn conceals(&self, _world: &World, _this: Obj, _what: Obj) -> bool {
        false
    }

    /// The ordered verb table for objects of this kind. Dispatch walks it in
    /// declaration order.
    fn verbs(&self) -> Vec<VerbDef> {
        Vec::new()
    }
}

/// The kind every object defaults to: immobile, admits nothing, no verbs.
pub struct RootKind;

impl ObjectKind for RootKind {}

struct Entity {
    name: String,
    aliases: Vec<String>,
    location: Obj,
    contents: Vec<Obj>,
    kind: Arc<dyn ObjectKind>,
}

/// The central store. Objects are referenced by stable `Obj` ids everywhere;
/// each record exclusively owns its own contents list.
#[derive(Default)]
pub struct World {
    objects: HashMap<Obj, Entity>,
    next_id: i64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh object: nowhere, empty contents. Population of the
    /// graph happens only through `move_to`.
    pub fn create(&mut self, name: &str, aliases: &[&str], kind: Arc<dyn ObjectKind>) -> Obj {
        let oid = Obj::mk_id(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            oid,
            Entity {
                name: name.to_string(),
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
                location: NOTHING,
                contents: Vec::new(),
                kind,
            },
        );
        oid
    }

    #[must_use]
    pub fn valid(&self, oid: Obj) -> bool {
        self.objects.contains_key(&oid)
    }

    fn entity(&self, oid: Obj) -> Result<&Entity, WorldStateError> {
        self.objects
            .get(&oid)
            .ok_or(WorldStateError::ObjectNotFound(oid))
    }

    pub fn name_of(&self, oid: Obj) -> Result<String, WorldStateError> {
        Ok(self.entity(oid)?.name.clone())
    }

    pub fn aliases_of(&self, oid: Obj) -> Result<Vec<String>, WorldStateError> {
        Ok(self.entity(oid)?.aliases.clone())
    }

    pub fn set_name(&mut self, oid: Obj, name: &str) -> Result<(), WorldStateError> {
        self.objects
            .get_mut(&oid)
            .ok_or(WorldStateError::ObjectNotFound(oid))?
            .name = name.to_string();
        Ok(())
    }

    pub fn add_alias(&mut self, oid: Obj, alias: &str) -> Result<(), WorldStateError> {
        self.objects
            .get_mut(&oid)
            .ok_or(WorldStateError::ObjectNotFound(oid))?
            .aliases
            .push(alias.to_string());
        Ok(())
    }

    pub fn kind_of(&self, oid: Obj) -> Result<Arc<dyn ObjectKind>, WorldStateError> {
        Ok(self.entity(oid)?.kind.clone())
    }

    /// Check and repair the containment fields of one object. Returns whether
    /// any repair occurred, so corruption is observable rather than silent.
    ///
    /// Repairs: a location that is dead, or does not list this object exactly
    /// once, is reset to `NOTHING`; contents entries that are duplicates,
    /// dead, or located elsewhere are dropped in place. Idempotent on a valid
    /// object.
    pub fn vet(&mut self, oid: Obj) -> Result<bool, WorldStateError> {
        let ent = self.entity(oid)?;

        let location = ent.location;
        let location_invalid = !location.is_nothing()
            && !self
                .objects
                .get(&location)
                .is_some_and(|l| l.contents.iter().filter(|c| **c == oid).count() == 1);

        let mut kept = Vec::with_capacity(self.entity(oid)?.contents.len());
        for c in &self.entity(oid)?.contents {
            if kept.contains(c) {
                continue;
            }
            if self.objects.get(c).is_some_and(|e| e.location == oid) {
                kept.push(*c);
            }
        }
        let contents_changed = kept != self.entity(oid)?.contents;

        if !location_invalid && !contents_changed {
            return Ok(false);
        }
        if let Some(ent) = self.objects.get_mut(&oid) {
            if location_invalid {
                ent.location = NOTHING;
            }
            if contents_changed {
                ent.contents = kept;
            }
        }
        warn!(obj = %oid, location_invalid, contents_changed, "containment invariants repaired");
        Ok(true)
    }

    /// The move protocol. Vets everything involved, negotiates with both
    /// parties, checks for cycles, then mutates. The cycle walk happens after
    /// the negotiation so `moveable`/`accept` logic never observes a
    /// half-mutated graph; a declined or refused move leaves it untouched.
    pub fn move_to(&mut self, oid: Obj, dest: Obj) -> Result<(), WorldStateError> {
        self.vet(oid)?;
        let old_location = self.entity(oid)?.location;
        if !old_location.is_nothing() {
            self.vet(old_location)?;
        }
        if !dest.is_nothing() {
            self.vet(dest)?;
        }

        let kind = self.kind_of(oid)?;
        if !kind.moveable(self, oid, dest) {
            trace!(obj = %oid, dest = %dest, "declined to move");
            return Err(WorldStateError::MoveDeclined(oid, dest));
        }
        if !dest.is_nothing() {
            let dest_kind = self.kind_of(dest)?;
            if !dest_kind.accept(self, dest, oid) {
                trace!(obj = %oid, dest = %dest, "refused entry");
                return Err(WorldStateError::MoveRefused(oid, dest));
            }
        }

        let mut loc = dest;
        while !loc.is_nothing() {
            if loc == oid {
                return Err(WorldStateError::RecursiveMove(oid, dest));
            }
            loc = self.entity(loc)?.location;
        }

        // accept() may itself have rearranged things; re-read the old
        // location before mutating. All occurrences are removed, defensive
        // against prior corruption.
        let old_location = self.entity(oid)?.location;
        if !old_location.is_nothing()
            && let Some(l) = self.objects.get_mut(&old_location)
        {
            l.contents.retain(|c| *c != oid);
        }
        if let Some(ent) = self.objects.get_mut(&oid) {
            ent.location = dest;
        }
        if !dest.is_nothing()
            && let Some(d) = self.objects.get_mut(&dest)
        {
            d.contents.push(oid);
        }
        trace!(obj = %oid, from = %old_location, to = %dest, "moved");
        Ok(())
    }

    /// The canonical contents of an object, vetted first.
    pub fn contents_of(&mut self, oid: Obj) -> Result<Vec<Obj>, WorldStateError> {
        self.vet(oid)?;
        Ok(self.entity(oid)?.contents.clone())
    }

    /// Contents as shown to observers: the canonical list minus whatever the
    /// object's kind conceals.
    pub fn visible_contents_of(&mut self, oid: Obj) -> Result<Vec<Obj>, WorldStateError> {
        let contents = self.contents_of(oid)?;
        let kind = self.kind_of(oid)?;
        let mut visible = Vec::with_capacity(contents.len());
        for c in contents {
            if !kind.conceals(self, oid, c) {
                visible.push(c);
            }
        }
        Ok(visible)
    }

    /// The location of an object, vetted first.
    pub fn location_of(&mut self, oid: Obj) -> Result<Obj, WorldStateError> {
        self.vet(oid)?;
        Ok(self.entity(oid)?.location)
    }

    /// Whether `inner` is transitively contained in `outer`.
    pub fn contains(&mut self, outer: Obj, inner: Obj) -> Result<bool, WorldStateError> {
        self.vet(outer)?;
        self.vet(inner)?;
        let mut loc = self.entity(inner)?.location;
        while !loc.is_nothing() {
            if loc == outer {
                return Ok(true);
            }
            loc = self.entity(loc)?.location;
        }
        Ok(false)
    }

    /// Splice an object into a location without negotiation, for fixtures
    /// that want immobile scenery in place.
    #[cfg(test)]
    pub(crate) fn place_unchecked(&mut self, oid: Obj, dest: Obj) {
        if let Some(ent) = self.objects.get_mut(&oid) {
            ent.location = dest;
        }
        if let Some(d) = self.objects.get_mut(&dest) {
            d.contents.push(oid);
        }
    }
}

/// The matcher reads the containment graph through this, vetting as it goes.
impl MatchEnvironment for World {
    fn obj_valid(&mut self, oid: Obj) -> Result<bool, WorldStateError> {
        Ok(self.valid(oid))
    }

    fn name_of(&mut self, oid: Obj) -> Result<String, WorldStateError> {
        World::name_of(self, oid)
    }

    fn aliases_of(&mut self, oid: Obj) -> Result<Vec<String>, WorldStateError> {
        World::aliases_of(self, oid)
    }

    fn location_of(&mut self, oid: Obj) -> Result<Obj, WorldStateError> {
        World::location_of(self, oid)
    }

    fn get_surroundings(&mut self, player: Obj) -> Result<Vec<Obj>, WorldStateError> {
        self.vet(player)?;
        let mut surroundings = vec![player];
        surroundings.extend(self.contents_of(player)?);
        // vet(player) has already cleared a dead location, so a non-NOTHING
        // one is live and lists the player.
        let location = self.entity(player)?.location;
        if !location.is_nothing() {
            surroundings.push(location);
            surroundings.extend(
                self.contents_of(location)?
                    .into_iter()
                    .filter(|o| *o != player),
            );
        }
        Ok(surroundings)
    }
}
