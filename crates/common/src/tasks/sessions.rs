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

use std::sync::Mutex;

use thiserror::Error;

use crate::model::Obj;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SessionError {
    #[error("No connection for player: {0}")]
    NoConnection(Obj),
    #[error("Could not deliver narration: {0}")]
    DeliveryError(String),
}

/// The narration side of a user connection, as consumed by the dispatcher and
/// by verb bodies. Connection buffering, line framing, and transport live in
/// the hosts; this core only ever pushes lines of feedback through it.
pub trait Session: Send + Sync {
    /// Deliver one line of narrated feedback to the given player.
    fn narrate(&self, player: Obj, msg: &str) -> Result<(), SessionError>;
}

/// A session that records narration in memory, for asserting on in tests.
#[doc(hidden)]
#[derive(Default)]
pub struct TranscriptSession {
    transcript: Mutex<Vec<(Obj, String)>>,
}

impl TranscriptSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> Vec<(Obj, String)> {
        self.transcript.lock().unwrap().clone()
    }

    /// Just the lines narrated to one player.
    pub fn lines_for(&self, player: Obj) -> Vec<String> {
        self.transcript
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| *p == player)
            .map(|(_, l)| l.clone())
            .collect()
    }
}

impl Session for TranscriptSession {
    fn narrate(&self, player: Obj, msg: &str) -> Result<(), SessionError> {
        self.transcript
            .lock()
            .unwrap()
            .push((player, msg.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Session, TranscriptSession};
    use crate::model::Obj;

    #[test]
    fn test_transcript_records_in_narration_order() {
        let alice = Obj::mk_id(1);
        let bob = Obj::mk_id(2);
        let session = TranscriptSession::new();
        session.narrate(alice, "one").unwrap();
        session.narrate(bob, "two").unwrap();
        session.narrate(alice, "three").unwrap();

        assert_eq!(
            session.transcript(),
            vec![
                (alice, "one".to_string()),
                (bob, "two".to_string()),
                (alice, "three".to_string()),
            ]
        );
        assert_eq!(session.lines_for(alice), vec!["one", "three"]);
        assert_eq!(session.lines_for(bob), vec!["two"]);
    }
}
