//! Durable game storage with optimistic concurrency.
//!
//! Two captains scoring the same match resolve at hole-result
//! granularity: a writer submits the revision its read was based on, and
//! a stale base is rejected outright — the caller re-fetches, re-applies,
//! and retries. Nothing is ever merged behind a caller's back.

use crate::engine::Game;
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Game identifier as issued by the trip service.
pub type GameId = String;

/// Monotonically increasing revision stamp per game record.
pub type Revision = u64;

/// A stored game plus the revision stamp that guards writes to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedGame {
    pub revision: Revision,
    pub game: Game,
}

/// Storage contract the engines' callers program against.
pub trait GameStore {
    fn get(&self, id: &str) -> Option<&VersionedGame>;

    /// Writes `game` if `expected` matches the stored revision (0 for a
    /// new id) and returns the new revision. A mismatch fails with
    /// [`GameError::StaleRevision`] and stores nothing.
    fn put(&mut self, id: &str, game: Game, expected: Revision) -> Result<Revision>;
}

/// In-memory store. The trait boundary keeps real persistence swappable
/// without touching any engine.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: HashMap<GameId, VersionedGame>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            games: HashMap::new(),
        }
    }
}

impl GameStore for MemoryStore {
    fn get(&self, id: &str) -> Option<&VersionedGame> {
        self.games.get(id)
    }

    fn put(&mut self, id: &str, game: Game, expected: Revision) -> Result<Revision> {
        let actual = self.games.get(id).map(|v| v.revision).unwrap_or(0);
        if expected != actual {
            return Err(GameError::StaleRevision { expected, actual });
        }
        let revision = actual + 1;
        self.games
            .insert(id.to_string(), VersionedGame { revision, game });
        Ok(revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, SkinsConfig};
    use crate::error::ErrorKind;
    use crate::money::Money;
    use crate::roster::{Player, Roster};
    use std::str::FromStr;

    fn game() -> Game {
        let roster = Roster::new(vec![
            Player::individual("amy", "Amy", "Park"),
            Player::individual("ben", "Ben", "Ruiz"),
        ])
        .unwrap();
        Game::new(
            GameConfig::Skins(SkinsConfig {
                per_hole: Money::from_str("5.00").unwrap(),
            }),
            roster,
        )
        .unwrap()
    }

    #[test]
    fn test_new_game_starts_at_revision_one() {
        let mut store = MemoryStore::new();
        let revision = store.put("g1", game(), 0).unwrap();
        assert_eq!(revision, 1);
        assert_eq!(store.get("g1").unwrap().revision, 1);
    }

    #[test]
    fn test_stale_write_rejected_and_nothing_stored() {
        let mut store = MemoryStore::new();
        store.put("g1", game(), 0).unwrap();

        // second writer still thinks the game is new
        let err = store.put("g1", game(), 0).unwrap_err();
        assert!(matches!(
            err,
            GameError::StaleRevision {
                expected: 0,
                actual: 1
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(store.get("g1").unwrap().revision, 1);
    }

    #[test]
    fn test_retry_after_refetch_succeeds() {
        let mut store = MemoryStore::new();
        store.put("g1", game(), 0).unwrap();

        let current = store.get("g1").unwrap().revision;
        let mut fresh = store.get("g1").unwrap().game.clone();
        if let Game::Skins(engine) = &mut fresh {
            engine.record_hole_winner(1, None).unwrap();
        }
        let revision = store.put("g1", fresh, current).unwrap();
        assert_eq!(revision, 2);
    }

    #[test]
    fn test_unknown_id_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("missing").is_none());
    }
}
