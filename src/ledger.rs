//! Hole-result ledger and game lifecycle.
//!
//! The ledger is the authoritative record: one raw entry per hole,
//! re-entry overwrites. Standings and payouts are derived from it by full
//! rescan, so in-memory totals can never drift from what was recorded.

use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const FIRST_HOLE: u8 = 1;
pub const LAST_HOLE: u8 = 18;
pub const HOLE_COUNT: usize = 18;

/// Validates a hole number, returning it for chaining.
pub fn check_hole(hole: u8) -> Result<u8> {
    if (FIRST_HOLE..=LAST_HOLE).contains(&hole) {
        Ok(hole)
    } else {
        Err(GameError::HoleOutOfRange(hole))
    }
}

/// Append-or-replace store of one raw result per hole.
///
/// Recording a hole that already has an entry overwrites it: an edit is an
/// ordinary entry and never duplicates a hole. Iteration is in hole order
/// regardless of entry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleLedger<T> {
    entries: BTreeMap<u8, T>,
}

impl<T> HoleLedger<T> {
    pub fn new() -> Self {
        HoleLedger {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts or replaces the entry for a hole, returning the replaced
    /// entry if there was one.
    pub fn record(&mut self, hole: u8, entry: T) -> Result<Option<T>> {
        check_hole(hole)?;
        Ok(self.entries.insert(hole, entry))
    }

    pub fn get(&self, hole: u8) -> Option<&T> {
        self.entries.get(&hole)
    }

    /// Entries in hole order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &T)> {
        self.entries.iter().map(|(hole, entry)| (*hole, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest hole recorded so far.
    pub fn latest_hole(&self) -> Option<u8> {
        self.entries.keys().next_back().copied()
    }

    /// `true` once every hole of the round has an entry.
    pub fn is_complete(&self) -> bool {
        self.entries.len() == HOLE_COUNT
    }
}

impl<T> Default for HoleLedger<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of a game.
///
/// `Setup` until the first accepted entry, `Active` while results are
/// coming in, `Completed` once the round is settled. The only way out of
/// `Completed` is an explicit reopen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Setup,
    Active,
    Completed,
}

impl GamePhase {
    /// Rejects mutation attempts on a completed game.
    pub fn ensure_mutable(self) -> Result<()> {
        if self == GamePhase::Completed {
            Err(GameError::GameCompleted)
        } else {
            Ok(())
        }
    }
}
