//! Skins: every hole is worth a fixed pot, and a tied hole pushes its pot
//! onto the next hole that produces an outright winner.

use crate::config::SkinsConfig;
use crate::error::{GameError, Result};
use crate::ledger::{GamePhase, HoleLedger};
use crate::money::Money;
use crate::roster::{PlayerId, Roster};
use crate::settlement::{rank, Standing};
use log::debug;
use serde::{Deserialize, Serialize};

/// Outcome of a single skins hole.
///
/// A hole with no entry at all is "not yet played" and is distinct from a
/// push, so a push can never be mistaken for a missing result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkinsOutcome {
    /// Outright low score: the winner takes this hole's pot plus any
    /// carry-over.
    Win { winner: PlayerId },
    /// Tied hole: the pot carries forward.
    Push,
}

/// One row of the derived skins sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinsHoleResult {
    pub hole: u8,
    pub outcome: SkinsOutcome,
    /// Pot value at this hole including carry-over. On a push this is the
    /// hole's base stake, recorded as an audit trail; it never pays out.
    pub amount: Money,
}

/// Carry-over skins over an 18-hole log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinsEngine {
    config: SkinsConfig,
    roster: Roster,
    ledger: HoleLedger<SkinsOutcome>,
    phase: GamePhase,
}

impl SkinsEngine {
    pub fn new(config: SkinsConfig, roster: Roster) -> Self {
        SkinsEngine {
            config,
            roster,
            ledger: HoleLedger::new(),
            phase: GamePhase::Setup,
        }
    }

    pub fn config(&self) -> &SkinsConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Records (or corrects) one hole. `None` marks a push.
    ///
    /// Editing an earlier hole changes the carry-over math for every hole
    /// after it; that falls out of [`SkinsEngine::results`] recomputing
    /// from the full history instead of accumulating incrementally.
    pub fn record_hole_winner(&mut self, hole: u8, winner: Option<PlayerId>) -> Result<()> {
        self.phase.ensure_mutable()?;
        let outcome = match winner {
            Some(id) => {
                if !self.roster.contains(&id) {
                    return Err(GameError::UnknownPlayer(id));
                }
                SkinsOutcome::Win { winner: id }
            }
            None => SkinsOutcome::Push,
        };
        let replaced = self.ledger.record(hole, outcome)?;
        if replaced.is_some() {
            debug!("skins: hole {} re-entered", hole);
        }
        self.phase = GamePhase::Active;
        Ok(())
    }

    /// Explicitly ends the game. Skins has no natural endpoint: the round
    /// just reduces to the last hole with a result.
    pub fn close(&mut self) -> Result<()> {
        self.phase.ensure_mutable()?;
        self.phase = GamePhase::Completed;
        debug!("skins: game closed");
        Ok(())
    }

    /// Reopens a completed game for corrections. Every reader derives from
    /// the ledger, so there are no cached totals to resume.
    pub fn reopen(&mut self) -> Result<()> {
        if self.phase != GamePhase::Completed {
            return Err(GameError::GameNotCompleted);
        }
        self.phase = GamePhase::Active;
        Ok(())
    }

    /// The derived sheet: one row per recorded hole, in hole order.
    ///
    /// Carry-over is recomputed from scratch on every call. The rescan is
    /// O(n) per read, and that is the point: a retroactive edit re-derives
    /// every downstream amount with no cascade step to forget.
    pub fn results(&self) -> Vec<SkinsHoleResult> {
        let mut carry = Money::ZERO;
        let mut sheet = Vec::with_capacity(self.ledger.len());
        for (hole, outcome) in self.ledger.iter() {
            match outcome {
                SkinsOutcome::Win { winner } => {
                    let amount = self.config.per_hole + carry;
                    carry = Money::ZERO;
                    sheet.push(SkinsHoleResult {
                        hole,
                        outcome: SkinsOutcome::Win {
                            winner: winner.clone(),
                        },
                        amount,
                    });
                }
                SkinsOutcome::Push => {
                    carry += self.config.per_hole;
                    sheet.push(SkinsHoleResult {
                        hole,
                        outcome: SkinsOutcome::Push,
                        amount: self.config.per_hole,
                    });
                }
            }
        }
        sheet
    }

    /// Pot value still waiting for a winner: pushes since the last win.
    pub fn unclaimed_carry(&self) -> Money {
        let mut carry = Money::ZERO;
        for (_, outcome) in self.ledger.iter() {
            match outcome {
                SkinsOutcome::Win { .. } => carry = Money::ZERO,
                SkinsOutcome::Push => carry += self.config.per_hole,
            }
        }
        carry
    }

    /// Winners ranked by winnings, descending; ties keep roster order.
    /// Players without a skin have nothing to settle and are omitted.
    pub fn standings(&self) -> Vec<Standing> {
        let sheet = self.results();
        let mut standings = Vec::new();
        for player in self.roster.players() {
            let mut skins = 0i64;
            let mut winnings = Money::ZERO;
            for row in &sheet {
                if let SkinsOutcome::Win { winner } = &row.outcome {
                    if winner == &player.id {
                        skins += 1;
                        winnings += row.amount;
                    }
                }
            }
            if skins > 0 {
                standings.push(Standing {
                    player: player.id.clone(),
                    units: skins,
                    amount: winnings,
                });
            }
        }
        rank(&mut standings);
        standings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Player;
    use std::str::FromStr;

    fn engine() -> SkinsEngine {
        let roster = Roster::new(vec![
            Player::individual("amy", "Amy", "Park"),
            Player::individual("ben", "Ben", "Ruiz"),
            Player::individual("cal", "Cal", "Singh"),
            Player::individual("dee", "Dee", "Okafor"),
        ])
        .unwrap();
        SkinsEngine::new(
            SkinsConfig {
                per_hole: Money::from_str("5.00").unwrap(),
            },
            roster,
        )
    }

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_two_pushes_then_win_pays_triple() {
        let mut game = engine();
        game.record_hole_winner(1, None).unwrap();
        game.record_hole_winner(2, None).unwrap();
        game.record_hole_winner(3, Some("amy".to_string())).unwrap();

        let sheet = game.results();
        assert_eq!(sheet[2].amount, money("15.00"));
        let standings = game.standings();
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].player, "amy");
        assert_eq!(standings[0].units, 1);
        assert_eq!(standings[0].amount, money("15.00"));
    }

    #[test]
    fn test_win_resets_carry() {
        let mut game = engine();
        game.record_hole_winner(1, None).unwrap();
        game.record_hole_winner(2, Some("amy".to_string())).unwrap();
        game.record_hole_winner(3, None).unwrap();
        game.record_hole_winner(4, Some("ben".to_string())).unwrap();

        let sheet = game.results();
        assert_eq!(sheet[1].amount, money("10.00"));
        assert_eq!(sheet[3].amount, money("10.00"));
    }

    #[test]
    fn test_retroactive_edit_recomputes_downstream() {
        let mut game = engine();
        game.record_hole_winner(1, None).unwrap();
        game.record_hole_winner(2, None).unwrap();
        game.record_hole_winner(3, Some("amy".to_string())).unwrap();
        assert_eq!(game.results()[2].amount, money("15.00"));

        // hole 1 turns out to have been won outright
        game.record_hole_winner(1, Some("ben".to_string())).unwrap();
        let sheet = game.results();
        assert_eq!(sheet[0].amount, money("5.00"));
        assert_eq!(sheet[2].amount, money("10.00"));

        // and back to a push again
        game.record_hole_winner(1, None).unwrap();
        assert_eq!(game.results()[2].amount, money("15.00"));
    }

    #[test]
    fn test_out_of_order_entry_derives_by_hole_order() {
        let mut game = engine();
        game.record_hole_winner(3, Some("amy".to_string())).unwrap();
        game.record_hole_winner(1, None).unwrap();
        game.record_hole_winner(2, None).unwrap();
        assert_eq!(game.results()[2].amount, money("15.00"));
    }

    #[test]
    fn test_conservation_under_edits() {
        let mut game = engine();
        for hole in 1..=18 {
            game.record_hole_winner(hole, None).unwrap();
        }
        assert_eq!(game.unclaimed_carry(), money("90.00"));

        let ids = ["amy", "ben", "cal", "dee"];
        for hole in 1..=18u8 {
            let winner = ids[(hole as usize) % 4].to_string();
            game.record_hole_winner(hole, Some(winner)).unwrap();
        }
        let awarded: Money = game.results().iter().map(|r| r.amount).sum();
        assert_eq!(awarded, money("90.00"));
        assert_eq!(game.unclaimed_carry(), Money::ZERO);
    }

    #[test]
    fn test_standings_rank_and_tiebreak() {
        let mut game = engine();
        game.record_hole_winner(1, None).unwrap();
        game.record_hole_winner(2, None).unwrap();
        game.record_hole_winner(3, Some("amy".to_string())).unwrap();
        game.record_hole_winner(4, Some("ben".to_string())).unwrap();
        game.record_hole_winner(5, None).unwrap();
        game.record_hole_winner(6, None).unwrap();
        game.record_hole_winner(7, None).unwrap();
        game.record_hole_winner(8, Some("cal".to_string())).unwrap();
        game.record_hole_winner(9, Some("amy".to_string())).unwrap();

        let standings = game.standings();
        let order: Vec<&str> = standings.iter().map(|s| s.player.as_str()).collect();
        // amy and cal both hold 20.00; amy is first on the roster
        assert_eq!(order, ["amy", "cal", "ben"]);
        assert_eq!(standings[0].amount, money("20.00"));
        assert_eq!(standings[1].amount, money("20.00"));
        assert_eq!(standings[2].amount, money("5.00"));
    }

    #[test]
    fn test_unknown_winner_rejected_without_side_effects() {
        let mut game = engine();
        let err = game
            .record_hole_winner(1, Some("zed".to_string()))
            .unwrap_err();
        assert!(matches!(err, GameError::UnknownPlayer(id) if id == "zed"));
        assert!(game.results().is_empty());
        assert_eq!(game.phase(), GamePhase::Setup);
    }

    #[test]
    fn test_lifecycle() {
        let mut game = engine();
        assert_eq!(game.phase(), GamePhase::Setup);
        game.record_hole_winner(1, None).unwrap();
        assert_eq!(game.phase(), GamePhase::Active);

        game.close().unwrap();
        assert_eq!(game.phase(), GamePhase::Completed);
        assert!(matches!(
            game.record_hole_winner(2, None),
            Err(GameError::GameCompleted)
        ));
        assert!(matches!(game.close(), Err(GameError::GameCompleted)));

        game.reopen().unwrap();
        assert_eq!(game.phase(), GamePhase::Active);
        game.record_hole_winner(2, None).unwrap();
        assert!(matches!(game.reopen(), Err(GameError::GameNotCompleted)));
    }

    #[test]
    fn test_push_amount_is_audit_only() {
        let mut game = engine();
        game.record_hole_winner(1, None).unwrap();
        let sheet = game.results();
        assert_eq!(sheet[0].amount, money("5.00"));
        assert!(game.standings().is_empty());
    }
}
