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

//! Full input-to-narration flows over a furnished world: one player, one
//! room, a few props, real verbs.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use weald_common::model::{NOTHING, Obj};
use weald_common::tasks::{CommandError, TranscriptSession};
use weald_kernel::builtins::{ContainerKind, PlayerKind, PortableKind, RoomKind};
use weald_kernel::config::Config;
use weald_kernel::tasks::CommandExecutor;
use weald_kernel::verbs::{PermissionPolicy, VerbDef};
use weald_kernel::world::World;

struct Fixture {
    world: World,
    executor: CommandExecutor,
    player: Obj,
    room: Obj,
    lamp: Obj,
    satchel: Obj,
}

fn fixture() -> Fixture {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let mut world = World::new();
    let room = world.create("The Reading Room", &["room"], Arc::new(RoomKind));
    let player = world.create("Wren", &[], Arc::new(PlayerKind));
    let lamp = world.create("brass lamp", &["lamp"], Arc::new(PortableKind));
    let satchel = world.create("satchel", &["bag"], Arc::new(ContainerKind));
    world.move_to(player, room).unwrap();
    world.move_to(lamp, room).unwrap();
    world.move_to(satchel, room).unwrap();
    Fixture {
        world,
        executor: CommandExecutor::default(),
        player,
        room,
        lamp,
        satchel,
    }
}

impl Fixture {
    fn run(&mut self, cmd: &str) -> Vec<String> {
        let session = TranscriptSession::new();
        self.executor
            .execute(&mut self.world, &session, self.player, cmd)
            .unwrap();
        session.lines_for(self.player)
    }
}

#[test]
fn test_fetch_and_stash_session() {
    let mut fx = fixture();

    assert_eq!(
        fx.run("look"),
        vec![
            "The Reading Room".to_string(),
            "You see here: brass lamp, satchel.".to_string(),
        ]
    );
    assert_eq!(fx.run("take lamp"), vec!["You take the brass lamp."]);
    assert_eq!(fx.run("get bag"), vec!["You take the satchel."]);
    assert_eq!(
        fx.run("inventory"),
        vec!["You are carrying:", "  brass lamp", "  satchel"]
    );
    assert_eq!(
        fx.run("put lamp in bag"),
        vec!["You put the brass lamp in the satchel."]
    );
    assert_eq!(fx.world.location_of(fx.lamp).unwrap(), fx.satchel);
    assert_eq!(fx.run("drop satchel"), vec!["You drop the satchel."]);
    assert_eq!(fx.world.location_of(fx.satchel).unwrap(), fx.room);
    // The lamp rode along inside the satchel.
    assert_eq!(fx.world.location_of(fx.lamp).unwrap(), fx.satchel);
    assert_eq!(fx.run("i"), vec!["You are empty-handed."]);
}

#[test]
fn test_prefix_matching_reaches_the_lamp() {
    let mut fx = fixture();
    // "bra" is a prefix of the lamp's name and nothing else in scope.
    assert_eq!(fx.run("take bra"), vec!["You take the brass lamp."]);
}

#[test]
fn test_multiword_prepositions_bind_longest_first() {
    let mut fx = fixture();
    // "in front of" must not be read as "in" with "front of satchel" after,
    // so the put verb (which wants the in/inside/into class) stays silent.
    assert_eq!(fx.run("put lamp in front of satchel"), vec![
        "I don't understand that."
    ]);
    // With the single-word form the verb fires.
    assert_eq!(fx.run("take lamp"), vec!["You take the brass lamp."]);
    assert_eq!(
        fx.run("put lamp into bag"),
        vec!["You put the brass lamp in the satchel."]
    );
}

#[test]
fn test_absolute_reference_resolves_anywhere() {
    let mut fx = fixture();
    let id = fx.lamp;
    assert_eq!(fx.run(&format!("take {id}")), vec!["You take the brass lamp."]);
}

#[test]
fn test_me_and_here_pronouns() {
    let mut fx = fixture();
    // "look here" targets the room through the pronoun.
    let lines = fx.run("look here");
    assert_eq!(lines[0], "The Reading Room");
    // "get me" resolves, and the verb politely declines.
    assert_eq!(fx.run("get me"), vec!["You cannot pick yourself up."]);
}

#[test]
fn test_unknown_verb_narrates_huh() {
    let mut fx = fixture();
    assert_eq!(fx.run("juggle lamp"), vec!["I don't understand that."]);
}

#[test]
fn test_blank_line_is_a_quiet_noop_when_configured() {
    let mut fx = fixture();
    fx.executor = CommandExecutor::new(Config {
        narrate_unparsed: false,
    });
    assert_eq!(fx.run(""), Vec::<String>::new());
    assert_eq!(fx.run("   "), Vec::<String>::new());
}

#[test]
fn test_ambiguity_and_no_match_flow() {
    let mut fx = fixture();
    let hat = fx.world.create("hat", &["bag"], Arc::new(PortableKind));
    fx.world.move_to(hat, fx.room).unwrap();
    assert_eq!(
        fx.run("take bag"),
        vec!["I'm not sure which \"bag\" you mean."]
    );
    assert_eq!(
        fx.run("take gramophone"),
        vec!["I don't see \"gramophone\" here."]
    );
}

#[test]
fn test_things_out_of_scope_are_invisible() {
    let mut fx = fixture();
    let attic = fx.world.create("attic", &[], Arc::new(RoomKind));
    let violin = fx.world.create("violin", &[], Arc::new(PortableKind));
    fx.world.move_to(violin, attic).unwrap();
    assert_eq!(fx.run("take violin"), vec!["I don't see \"violin\" here."]);
}

#[test]
fn test_carried_container_stays_in_scope() {
    let mut fx = fixture();
    fx.run("get bag");
    fx.run("get lamp");
    fx.run("put lamp in bag");
    // The lamp now sits two levels down but the satchel itself is still
    // matchable, so unpacking works without dropping it.
    assert_eq!(fx.world.location_of(fx.lamp).unwrap(), fx.satchel);
    assert_eq!(fx.run("look"), vec!["The Reading Room".to_string()]);
}

#[test]
fn test_denied_by_policy() {
    struct NoTouching;
    impl PermissionPolicy for NoTouching {
        fn permits(&self, _player: Obj, _host: Obj, _verb: &VerbDef) -> bool {
            false
        }
    }

    let mut fx = fixture();
    fx.executor = CommandExecutor::default().with_policy(Arc::new(NoTouching));
    let session = TranscriptSession::new();
    let err = fx
        .executor
        .execute(&mut fx.world, &session, fx.player, "take lamp")
        .unwrap_err();
    assert_eq!(err, CommandError::PermissionDenied);
    assert_eq!(fx.world.location_of(fx.lamp).unwrap(), fx.room);
}

#[test]
fn test_nowhere_player_still_parses() {
    let mut fx = fixture();
    fx.world.move_to(fx.player, NOTHING).unwrap();
    assert_eq!(fx.run("look"), vec!["You are floating in a void."]);
    // Nothing else is in scope out here.
    assert_eq!(fx.run("take lamp"), vec!["I don't see \"lamp\" here."]);
}
