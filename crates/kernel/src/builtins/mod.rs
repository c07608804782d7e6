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

//! A small stock of object kinds sufficient to furnish a working world:
//! portable things, containers, rooms, and players with the basic
//! manipulation verbs. Anything richer is composed by the embedding host.

use std::sync::Arc;

use itertools::Itertools;

use weald_common::matching::MatchResult;
use weald_common::model::{
    ArgSpec, NOTHING, Obj, PrepSpec, Preposition, VerbArgsSpec, WorldStateError,
};
use weald_common::tasks::{CommandError, Session};

use crate::tasks::match_failed;
use crate::verbs::VerbDef;
use crate::world::{ObjectKind, World};

/// A thing that can be picked up and carried. Admits nothing itself.
pub struct PortableKind;

impl ObjectKind for PortableKind {
    fn moveable(&self, _world: &World, _this: Obj, _dest: Obj) -> bool {
        true
    }
}

/// A portable thing that also holds other things.
pub struct ContainerKind;

impl ObjectKind for ContainerKind {
    fn moveable(&self, _world: &World, _this: Obj, _dest: Obj) -> bool {
        true
    }

    fn acceptable(&self, _world: &World, _this: Obj, _what: Obj) -> bool {
        true
    }
}

/// A place. Immobile, admits everything, and describes itself when looked at.
pub struct RoomKind;

impl ObjectKind for RoomKind {
    fn acceptable(&self, _world: &World, _this: Obj, _what: Obj) -> bool {
        true
    }

    fn verbs(&self) -> Vec<VerbDef> {
        vec![
            verb(
                "l(ook)?",
                VerbArgsSpec::this_none_none(),
                Arc::new(|world, session, cmd| {
                    let Some(room) = cmd.dobj.and_then(|m| m.matched()) else {
                        return Ok(());
                    };
                    describe_place(world, session, cmd.player, room)
                }),
            ),
        ]
    }
}

/// A connected player: mobile, carries things, and owns the core
/// manipulation verbs. Dispatch searches the player first, so these fire
/// wherever the player happens to be.
pub struct PlayerKind;

impl ObjectKind for PlayerKind {
    fn moveable(&self, _world: &World, _this: Obj, _dest: Obj) -> bool {
        true
    }

    fn acceptable(&self, _world: &World, _this: Obj, _what: Obj) -> bool {
        true
    }

    fn verbs(&self) -> Vec<VerbDef> {
        vec![
            // Bare "look" describes the surroundings. A named target falls
            // through to the target's own look verb.
            verb(
                "l(ook)?",
                VerbArgsSpec::none_none_none(),
                Arc::new(|world, session, cmd| {
                    let location = world.location_of(cmd.player)?;
                    if location == NOTHING {
                        session.narrate(cmd.player, "You are floating in a void.")?;
                        return Ok(());
                    }
                    describe_place(world, session, cmd.player, location)
                }),
            ),
            verb(
                "i(nv(entory)?)?",
                VerbArgsSpec::none_none_none(),
                Arc::new(|world, session, cmd| {
                    let carried = world.visible_contents_of(cmd.player)?;
                    if carried.is_empty() {
                        session.narrate(cmd.player, "You are empty-handed.")?;
                        return Ok(());
                    }
                    session.narrate(cmd.player, "You are carrying:")?;
                    for oid in carried {
                        let name = world.name_of(oid)?;
                        session.narrate(cmd.player, &format!("  {name}"))?;
                    }
                    Ok(())
                }),
            ),
            verb(
                "get|take",
                VerbArgsSpec {
                    dobj: ArgSpec::Any,
                    prep: PrepSpec::None,
                    iobj: ArgSpec::None,
                },
                Arc::new(|world, session, cmd| {
                    let Some(target) =
                        require_slot(world, cmd.dobj, cmd.dobjstr.as_deref(), session, cmd.player)?
                    else {
                        return Ok(());
                    };
                    if target == cmd.player {
                        session.narrate(cmd.player, "You cannot pick yourself up.")?;
                        return Ok(());
                    }
                    if world.location_of(target)? == cmd.player {
                        session.narrate(cmd.player, "You already have that.")?;
                        return Ok(());
                    }
                    let name = world.name_of(target)?;
                    match world.move_to(target, cmd.player) {
                        Ok(()) => session.narrate(cmd.player, &format!("You take the {name}."))?,
                        Err(e) => narrate_move_failure(session, cmd.player, &name, e)?,
                    }
                    Ok(())
                }),
            ),
            verb(
                "drop",
                VerbArgsSpec {
                    dobj: ArgSpec::Any,
                    prep: PrepSpec::None,
                    iobj: ArgSpec::None,
                },
                Arc::new(|world, session, cmd| {
                    let Some(target) =
                        require_slot(world, cmd.dobj, cmd.dobjstr.as_deref(), session, cmd.player)?
                    else {
                        return Ok(());
                    };
                    if world.location_of(target)? != cmd.player {
                        session.narrate(cmd.player, "You aren't carrying that.")?;
                        return Ok(());
                    }
                    let name = world.name_of(target)?;
                    let location = world.location_of(cmd.player)?;
                    match world.move_to(target, location) {
                        Ok(()) => session.narrate(cmd.player, &format!("You drop the {name}."))?,
                        Err(e) => narrate_move_failure(session, cmd.player, &name, e)?,
                    }
                    Ok(())
                }),
            ),
            verb(
                "put|place",
                VerbArgsSpec {
                    dobj: ArgSpec::Any,
                    prep: PrepSpec::Other(Preposition::IntoIn),
                    iobj: ArgSpec::Any,
                },
                Arc::new(|world, session, cmd| {
                    let Some(target) =
                        require_slot(world, cmd.dobj, cmd.dobjstr.as_deref(), session, cmd.player)?
                    else {
                        return Ok(());
                    };
                    let Some(dest) =
                        require_slot(world, cmd.iobj, cmd.iobjstr.as_deref(), session, cmd.player)?
                    else {
                        return Ok(());
                    };
                    let name = world.name_of(target)?;
                    let dest_name = world.name_of(dest)?;
                    match world.move_to(target, dest) {
                        Ok(()) => session.narrate(
                            cmd.player,
                            &format!("You put the {name} in the {dest_name}."),
                        )?,
                        Err(e) => narrate_move_failure(session, cmd.player, &name, e)?,
                    }
                    Ok(())
                }),
            ),
        ]
    }
}

// All builtin patterns are static and known-good.
fn verb(pattern: &str, args: VerbArgsSpec, handler: crate::verbs::VerbHandler) -> VerbDef {
    VerbDef::new(pattern, args, handler).unwrap_or_else(|e| panic!("builtin verb: {e}"))
}

/// Narrate a slot complaint and yield the resolved object only when the slot
/// landed on a live one.
fn require_slot(
    world: &World,
    slot: Option<MatchResult>,
    objstr: Option<&str>,
    session: &dyn Session,
    player: Obj,
) -> Result<Option<Obj>, CommandError> {
    if match_failed(world, slot, objstr.unwrap_or(""), session, player)? {
        return Ok(None);
    }
    Ok(slot.and_then(|m| m.matched()))
}

fn describe_place(
    world: &mut World,
    session: &dyn Session,
    player: Obj,
    place: Obj,
) -> Result<(), CommandError> {
    let name = world.name_of(place)?;
    session.narrate(player, &name)?;
    let others: Vec<String> = world
        .visible_contents_of(place)?
        .into_iter()
        .filter(|o| *o != player)
        .map(|o| world.name_of(o))
        .collect::<Result<_, _>>()?;
    if !others.is_empty() {
        let listing = others.iter().join(", ");
        session.narrate(player, &format!("You see here: {listing}."))?;
    }
    Ok(())
}

/// A declined, refused, or cyclic move is a story event, not a fault.
fn narrate_move_failure(
    session: &dyn Session,
    player: Obj,
    name: &str,
    err: WorldStateError,
) -> Result<(), CommandError> {
    let msg = match err {
        WorldStateError::MoveDeclined(_, _) => format!("The {name} won't budge."),
        WorldStateError::MoveRefused(_, _) => format!("The {name} won't go there."),
        WorldStateError::RecursiveMove(_, _) => {
            "You can't put something inside itself.".to_string()
        }
        other => return Err(other.into()),
    };
    session.narrate(player, &msg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use weald_common::model::Obj;
    use weald_common::tasks::TranscriptSession;

    use super::{ContainerKind, PlayerKind, PortableKind, RoomKind};
    use crate::tasks::CommandExecutor;
    use crate::world::World;

    fn furnished() -> (World, Obj, Obj, Obj, Obj) {
        let mut world = World::new();
        let room = world.create("The Green Room", &["room"], Arc::new(RoomKind));
        let player = world.create("Porcupine", &["me"], Arc::new(PlayerKind));
        let rock = world.create("rock", &[], Arc::new(PortableKind));
        let chest = world.create("chest", &["box"], Arc::new(ContainerKind));
        world.move_to(player, room).unwrap();
        world.move_to(rock, room).unwrap();
        world.move_to(chest, room).unwrap();
        (world, room, player, rock, chest)
    }

    fn run(world: &mut World, player: Obj, cmd: &str) -> Vec<String> {
        let session = TranscriptSession::new();
        CommandExecutor::default()
            .execute(world, &session, player, cmd)
            .unwrap();
        session.lines_for(player)
    }

    #[test]
    fn test_look_describes_the_room() {
        let (mut world, _, player, _, _) = furnished();
        let lines = run(&mut world, player, "look");
        assert_eq!(
            lines,
            vec![
                "The Green Room".to_string(),
                "You see here: rock, chest.".to_string(),
            ]
        );
        // The abbreviation reaches the same verb.
        assert_eq!(run(&mut world, player, "l"), lines);
    }

    #[test]
    fn test_look_at_the_room_by_name() {
        let (mut world, _, player, _, _) = furnished();
        let lines = run(&mut world, player, "look room");
        assert_eq!(lines[0], "The Green Room");
    }

    #[test]
    fn test_get_and_inventory_and_drop() {
        let (mut world, room, player, rock, _) = furnished();

        assert_eq!(
            run(&mut world, player, "get rock"),
            vec!["You take the rock.".to_string()]
        );
        assert_eq!(world.location_of(rock).unwrap(), player);

        assert_eq!(
            run(&mut world, player, "i"),
            vec!["You are carrying:".to_string(), "  rock".to_string()]
        );

        assert_eq!(
            run(&mut world, player, "drop rock"),
            vec!["You drop the rock.".to_string()]
        );
        assert_eq!(world.location_of(rock).unwrap(), room);
    }

    #[test]
    fn test_inventory_when_empty_handed() {
        let (mut world, _, player, _, _) = furnished();
        assert_eq!(
            run(&mut world, player, "inventory"),
            vec!["You are empty-handed.".to_string()]
        );
    }

    #[test]
    fn test_get_something_absent() {
        let (mut world, _, player, _, _) = furnished();
        assert_eq!(
            run(&mut world, player, "take durian"),
            vec!["I don't see \"durian\" here.".to_string()]
        );
    }

    #[test]
    fn test_get_without_naming_anything() {
        let (mut world, _, player, _, _) = furnished();
        assert_eq!(
            run(&mut world, player, "get"),
            vec!["You must name something.".to_string()]
        );
    }

    #[test]
    fn test_drop_something_not_carried() {
        let (mut world, _, player, _, _) = furnished();
        assert_eq!(
            run(&mut world, player, "drop rock"),
            vec!["You aren't carrying that.".to_string()]
        );
    }

    #[test]
    fn test_put_in_container() {
        let (mut world, _, player, rock, chest) = furnished();
        run(&mut world, player, "get rock");
        assert_eq!(
            run(&mut world, player, "put rock in chest"),
            vec!["You put the rock in the chest.".to_string()]
        );
        assert_eq!(world.location_of(rock).unwrap(), chest);
    }

    #[test]
    fn test_put_rejects_the_degenerate_cycle() {
        let (mut world, _, player, _, chest) = furnished();
        assert_eq!(
            run(&mut world, player, "put chest in chest"),
            vec!["You can't put something inside itself.".to_string()]
        );
    }

    #[test]
    fn test_put_into_something_that_refuses() {
        let (mut world, _, player, _, _) = furnished();
        assert_eq!(
            run(&mut world, player, "put chest in rock"),
            vec!["The chest won't go there.".to_string()]
        );
    }

    #[test]
    fn test_immobile_thing_declines_the_move() {
        let (mut world, room, player, _, _) = furnished();
        let statue = world.create("statue", &[], Arc::new(crate::world::RootKind));
        // The root kind is immobile; park the statue by hand.
        world.place_unchecked(statue, room);
        assert_eq!(
            run(&mut world, player, "get statue"),
            vec!["The statue won't budge.".to_string()]
        );
    }

    #[test]
    fn test_ambiguity_is_narrated() {
        let (mut world, room, player, _, _) = furnished();
        let crate2 = world.create("crate", &["box"], Arc::new(ContainerKind));
        world.move_to(crate2, room).unwrap();
        assert_eq!(
            run(&mut world, player, "get box"),
            vec!["I'm not sure which \"box\" you mean.".to_string()]
        );
    }
}
