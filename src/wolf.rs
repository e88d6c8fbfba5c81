//! Wolf: the tee order rotates a "wolf" every hole, who either picks a
//! partner for a 2v2 hole or goes alone — lone wolf for doubled stakes,
//! pig for tripled.

use crate::config::WolfConfig;
use crate::error::{GameError, Result};
use crate::ledger::{check_hole, GamePhase, HoleLedger, HOLE_COUNT};
use crate::roster::{PlayerId, Roster};
use crate::settlement::{rank, Standing};
use log::debug;
use serde::{Deserialize, Serialize};

/// Wolf is played by exactly four; the rotation formula assumes it.
pub const WOLF_PLAYERS: usize = 4;

/// Which side took a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WolfWinner {
    Wolf,
    Pack,
    Push,
}

impl WolfWinner {
    pub fn parse(s: &str) -> Option<WolfWinner> {
        match s {
            "wolf" => Some(WolfWinner::Wolf),
            "pack" => Some(WolfWinner::Pack),
            "push" => Some(WolfWinner::Push),
            _ => None,
        }
    }
}

/// The wolf's declaration for a hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WolfDeclaration {
    /// Wolf and partner against the other two; stakes unchanged.
    Partner(PlayerId),
    /// Wolf alone against three, stakes doubled.
    LoneWolf,
    /// Wolf alone at tripled stakes; each player gets one per round.
    Pig,
}

impl WolfDeclaration {
    pub fn multiplier(&self) -> i64 {
        match self {
            WolfDeclaration::Partner(_) => 1,
            WolfDeclaration::LoneWolf => 2,
            WolfDeclaration::Pig => 3,
        }
    }

    /// Any declaration without a partner puts the wolf alone.
    pub fn is_lone(&self) -> bool {
        !matches!(self, WolfDeclaration::Partner(_))
    }
}

/// One hole's ledger entry: the declaration, then the outcome once the
/// hole is played out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfHole {
    pub declaration: WolfDeclaration,
    pub outcome: Option<WolfWinner>,
}

/// Rotating-partner points game over 18 holes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfEngine {
    config: WolfConfig,
    roster: Roster,
    ledger: HoleLedger<WolfHole>,
    phase: GamePhase,
}

impl WolfEngine {
    /// The roster order is the rotation and cannot change mid-round.
    pub fn new(config: WolfConfig, roster: Roster) -> Result<Self> {
        if roster.len() != WOLF_PLAYERS {
            return Err(GameError::WolfRosterSize(roster.len()));
        }
        Ok(WolfEngine {
            config,
            roster,
            ledger: HoleLedger::new(),
            phase: GamePhase::Setup,
        })
    }

    pub fn config(&self) -> &WolfConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    fn rotation_wolf(&self, hole: u8) -> &PlayerId {
        &self.roster.players()[(hole as usize - 1) % self.roster.len()].id
    }

    /// Who tees off as the wolf: round-robin over the roster order,
    /// independent of anything that happened on earlier holes.
    pub fn wolf_for_hole(&self, hole: u8) -> Result<&PlayerId> {
        check_hole(hole)?;
        Ok(self.rotation_wolf(hole))
    }

    /// The hole on which `player` already spent their pig, excluding
    /// `editing_hole` so corrections to the same hole stay legal.
    fn pig_spent_on(&self, player: &str, editing_hole: u8) -> Option<u8> {
        for (hole, entry) in self.ledger.iter() {
            if hole != editing_hole
                && entry.declaration == WolfDeclaration::Pig
                && self.rotation_wolf(hole) == player
            {
                return Some(hole);
            }
        }
        None
    }

    /// Records the wolf's declaration for a hole.
    ///
    /// `wolf_id` must be the rotation's wolf for that hole — the caller
    /// states who is declaring and the engine refuses impostors. Passing
    /// a partner with `pig` set is contradictory and rejected.
    pub fn choose_wolf_partner(
        &mut self,
        hole: u8,
        wolf_id: &str,
        partner: Option<PlayerId>,
        pig: bool,
    ) -> Result<()> {
        self.phase.ensure_mutable()?;
        let expected = self.wolf_for_hole(hole)?.clone();
        if wolf_id != expected {
            return Err(GameError::WrongWolf {
                hole,
                expected,
                got: wolf_id.to_string(),
            });
        }
        let declaration = match (partner, pig) {
            (Some(_), true) => return Err(GameError::PigWithPartner),
            (Some(partner_id), false) => {
                if !self.roster.contains(&partner_id) {
                    return Err(GameError::UnknownPlayer(partner_id));
                }
                if partner_id == expected {
                    return Err(GameError::PartnerIsWolf(partner_id));
                }
                WolfDeclaration::Partner(partner_id)
            }
            (None, true) => {
                if !self.config.pig_available {
                    return Err(GameError::PigUnavailable);
                }
                if let Some(spent) = self.pig_spent_on(&expected, hole) {
                    return Err(GameError::PigAlreadyUsed {
                        player: expected,
                        hole: spent,
                    });
                }
                WolfDeclaration::Pig
            }
            (None, false) => WolfDeclaration::LoneWolf,
        };
        // A re-declared hole keeps its outcome: wolf/pack/push stays
        // meaningful whichever sides were picked.
        let outcome = self.ledger.get(hole).and_then(|entry| entry.outcome);
        self.ledger.record(hole, WolfHole { declaration, outcome })?;
        self.phase = GamePhase::Active;
        debug!("wolf: hole {} declared by {}", hole, wolf_id);
        Ok(())
    }

    /// Records which side took the hole. Requires a declaration first —
    /// without one there are no sides to award.
    pub fn record_hole_outcome(&mut self, hole: u8, winner: WolfWinner) -> Result<()> {
        self.phase.ensure_mutable()?;
        check_hole(hole)?;
        let Some(entry) = self.ledger.get(hole) else {
            return Err(GameError::MissingDeclaration(hole));
        };
        let updated = WolfHole {
            declaration: entry.declaration.clone(),
            outcome: Some(winner),
        };
        self.ledger.record(hole, updated)?;
        self.phase = GamePhase::Active;
        if self.outcomes_complete() {
            self.phase = GamePhase::Completed;
            debug!("wolf: all 18 holes played out, game completed");
        }
        Ok(())
    }

    fn outcomes_complete(&self) -> bool {
        self.ledger.len() == HOLE_COUNT
            && self.ledger.iter().all(|(_, entry)| entry.outcome.is_some())
    }

    /// Reopens a completed game for corrections.
    pub fn reopen(&mut self) -> Result<()> {
        if self.phase != GamePhase::Completed {
            return Err(GameError::GameNotCompleted);
        }
        self.phase = GamePhase::Active;
        Ok(())
    }

    /// Net points per player, in rotation order, derived by full rescan.
    ///
    /// Every member of the winning side gains the hole's multiplier and
    /// every member of the losing side loses it — awards are per player,
    /// never split fractionally across a side.
    pub fn points(&self) -> Vec<(PlayerId, i64)> {
        let mut points: Vec<(PlayerId, i64)> = self
            .roster
            .players()
            .iter()
            .map(|p| (p.id.clone(), 0i64))
            .collect();
        for (hole, entry) in self.ledger.iter() {
            let Some(outcome) = entry.outcome else {
                continue;
            };
            let wolf_won = match outcome {
                WolfWinner::Wolf => true,
                WolfWinner::Pack => false,
                WolfWinner::Push => continue,
            };
            let multiplier = entry.declaration.multiplier();
            let wolf = self.rotation_wolf(hole).clone();
            for (id, total) in points.iter_mut() {
                let on_wolf_side = *id == wolf
                    || matches!(&entry.declaration, WolfDeclaration::Partner(p) if p == id);
                let won = if wolf_won { on_wolf_side } else { !on_wolf_side };
                *total += if won { multiplier } else { -multiplier };
            }
        }
        points
    }

    /// Points-to-dollars standings, ranked descending; rotation order
    /// breaks ties.
    pub fn payouts(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .points()
            .into_iter()
            .map(|(player, pts)| Standing {
                player,
                units: pts,
                amount: self.config.buy_in * pts,
            })
            .collect();
        rank(&mut standings);
        standings
    }
}
