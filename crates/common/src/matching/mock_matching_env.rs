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

use std::collections::HashMap;

use crate::matching::MatchEnvironment;
use crate::model::{NOTHING, Obj, WorldStateError};

pub const MOCK_ROOM1: Obj = Obj::mk_id(1);
pub const MOCK_ROOM2: Obj = Obj::mk_id(2);
pub const MOCK_PLAYER: Obj = Obj::mk_id(3);
pub const MOCK_THING1: Obj = Obj::mk_id(4);
pub const MOCK_THING2: Obj = Obj::mk_id(5);
pub const MOCK_THING3: Obj = Obj::mk_id(6);

pub struct MockObject {
    pub location: Obj,
    pub contents: Vec<Obj>,
    pub name: String,
    pub aliases: Vec<String>,
}

#[derive(Default)]
pub struct MockMatchEnv {
    objects: HashMap<Obj, MockObject>,
}

impl MatchEnvironment for MockMatchEnv {
    fn obj_valid(&mut self, oid: Obj) -> Result<bool, WorldStateError> {
        Ok(self.objects.contains_key(&oid))
    }

    fn name_of(&mut self, oid: Obj) -> Result<String, WorldStateError> {
        Ok(self
            .objects
            .get(&oid)
            .map_or_else(String::new, |o| o.name.clone()))
    }

    fn aliases_of(&mut self, oid: Obj) -> Result<Vec<String>, WorldStateError> {
        Ok(self
            .objects
            .get(&oid)
            .map_or_else(Vec::new, |o| o.aliases.clone()))
    }

    fn location_of(&mut self, oid: Obj) -> Result<Obj, WorldStateError> {
        self.objects
            .get(&oid)
            .map(|o| o.location)
            .ok_or(WorldStateError::ObjectNotFound(oid))
    }

    fn get_surroundings(&mut self, player: Obj) -> Result<Vec<Obj>, WorldStateError> {
        let mut result = vec![player];
        if let Some(player_obj) = self.objects.get(&player) {
            result.extend(player_obj.contents.iter().copied());
            if player_obj.location != NOTHING {
                result.push(player_obj.location);
                if let Some(location_obj) = self.objects.get(&player_obj.location) {
                    result.extend(
                        location_obj
                            .contents
                            .iter()
                            .copied()
                            .filter(|o| *o != player),
                    );
                }
            }
        }
        Ok(result)
    }
}

fn create_mock_object(
    env: &mut MockMatchEnv,
    oid: Obj,
    location: Obj,
    contents: &[Obj],
    name: &str,
    aliases: &[&str],
) {
    env.objects.insert(
        oid,
        MockObject {
            location,
            contents: contents.to_vec(),
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        },
    );
}

pub fn setup_mock_environment() -> MockMatchEnv {
    let mut env = MockMatchEnv::default();

    create_mock_object(&mut env, MOCK_PLAYER, MOCK_ROOM1, &[], "porcupine", &[]);
    create_mock_object(
        &mut env,
        MOCK_ROOM1,
        NOTHING,
        &[MOCK_PLAYER, MOCK_THING1, MOCK_THING2],
        "room1",
        &["r1"],
    );
    create_mock_object(&mut env, MOCK_ROOM2, NOTHING, &[MOCK_THING3], "room2", &["r2"]);
    // Both things answer to "box" so alias-tie scenarios have something to
    // chew on.
    create_mock_object(
        &mut env,
        MOCK_THING1,
        MOCK_ROOM1,
        &[],
        "thing1",
        &["t1", "box"],
    );
    create_mock_object(
        &mut env,
        MOCK_THING2,
        MOCK_ROOM1,
        &[],
        "thing2",
        &["t2", "box"],
    );
    create_mock_object(&mut env, MOCK_THING3, MOCK_ROOM2, &[], "thing3", &["t3"]);

    env
}
