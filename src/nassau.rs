//! Nassau: three independent bets — front nine, back nine, and overall —
//! each with its own hole tally and its own ladder of presses.

use crate::config::NassauConfig;
use crate::error::{GameError, Result};
use crate::ledger::{check_hole, GamePhase, HoleLedger};
use crate::money::Money;
use crate::roster::{Roster, TeamSide};
use crate::settlement::{BetLine, NassauPayouts, SettlementResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One of the three nassau bets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nine {
    Front,
    Back,
    Overall,
}

impl Nine {
    pub const ALL: [Nine; 3] = [Nine::Front, Nine::Back, Nine::Overall];

    pub fn first_hole(self) -> u8 {
        match self {
            Nine::Front | Nine::Overall => 1,
            Nine::Back => 10,
        }
    }

    pub fn last_hole(self) -> u8 {
        match self {
            Nine::Front => 9,
            Nine::Back | Nine::Overall => 18,
        }
    }

    pub fn contains(self, hole: u8) -> bool {
        (self.first_hole()..=self.last_hole()).contains(&hole)
    }

    pub fn hole_count(self) -> u8 {
        self.last_hole() - self.first_hole() + 1
    }

    /// The bets a hole counts toward: its half of the course, plus overall.
    pub fn containing(hole: u8) -> [Nine; 2] {
        if hole <= 9 {
            [Nine::Front, Nine::Overall]
        } else {
            [Nine::Back, Nine::Overall]
        }
    }

    pub fn parse(s: &str) -> Option<Nine> {
        match s {
            "front" => Some(Nine::Front),
            "back" => Some(Nine::Back),
            "overall" => Some(Nine::Overall),
            _ => None,
        }
    }
}

impl fmt::Display for Nine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Nine::Front => "front",
            Nine::Back => "back",
            Nine::Overall => "overall",
        };
        write!(f, "{}", name)
    }
}

/// Both teams' best-ball strokes on one hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleScore {
    pub team1: u32,
    pub team2: u32,
}

impl HoleScore {
    /// Lower score takes the hole; equal scores halve it.
    pub fn winner(self) -> Option<TeamSide> {
        match self.team1.cmp(&self.team2) {
            Ordering::Less => Some(TeamSide::Team1),
            Ordering::Greater => Some(TeamSide::Team2),
            Ordering::Equal => None,
        }
    }
}

/// Holes won per team over some stretch of a nine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NineState {
    pub team1_holes: u8,
    pub team2_holes: u8,
}

impl NineState {
    pub fn leader(self) -> Option<TeamSide> {
        match self.team1_holes.cmp(&self.team2_holes) {
            Ordering::Greater => Some(TeamSide::Team1),
            Ordering::Less => Some(TeamSide::Team2),
            Ordering::Equal => None,
        }
    }

    pub fn trailer(self) -> Option<TeamSide> {
        self.leader().map(TeamSide::opponent)
    }

    /// Size of the lead, in holes.
    pub fn margin(self) -> u8 {
        self.team1_holes.abs_diff(self.team2_holes)
    }
}

/// An additional bet opened mid-nine by the trailing side, scored from
/// `at_hole` to the end of its nine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Press {
    pub id: u32,
    pub nine: Nine,
    pub pressed_by: TeamSide,
    pub at_hole: u8,
    pub value: Money,
    pub is_auto: bool,
}

/// Two-team match over 18 holes with front/back/overall bets and presses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NassauEngine {
    config: NassauConfig,
    roster: Roster,
    ledger: HoleLedger<HoleScore>,
    presses: Vec<Press>,
    next_press_id: u32,
    phase: GamePhase,
}

impl NassauEngine {
    pub fn new(config: NassauConfig, roster: Roster) -> Result<Self> {
        roster.require_two_sides()?;
        Ok(NassauEngine {
            config,
            roster,
            ledger: HoleLedger::new(),
            presses: Vec::new(),
            next_press_id: 1,
            phase: GamePhase::Setup,
        })
    }

    pub fn config(&self) -> &NassauConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn presses(&self) -> &[Press] {
        &self.presses
    }

    /// Holes won per side over `nine`, restricted to holes at or after
    /// `from`. Derived by rescan of the ledger.
    fn tally(&self, nine: Nine, from: u8) -> NineState {
        let mut state = NineState::default();
        for (hole, score) in self.ledger.iter() {
            if nine.contains(hole) && hole >= from {
                match score.winner() {
                    Some(TeamSide::Team1) => state.team1_holes += 1,
                    Some(TeamSide::Team2) => state.team2_holes += 1,
                    None => {}
                }
            }
        }
        state
    }

    /// Current standing of one nine's base bet.
    pub fn nine_state(&self, nine: Nine) -> NineState {
        self.tally(nine, nine.first_hole())
    }

    fn press_count(&self, nine: Nine) -> usize {
        self.presses.iter().filter(|p| p.nine == nine).count()
    }

    fn holes_played(&self, nine: Nine) -> u8 {
        self.ledger.iter().filter(|(h, _)| nine.contains(*h)).count() as u8
    }

    /// A nine can no longer change hands once the lead exceeds the holes
    /// left to play in it.
    pub fn is_decided(&self, nine: Nine) -> bool {
        let remaining = nine.hole_count() - self.holes_played(nine);
        self.nine_state(nine).margin() > remaining
    }

    /// Records (or corrects) one hole's team scores.
    ///
    /// Auto-press is evaluated once, right here, for each nine the hole
    /// belongs to — and only when this is the latest hole on the card, so
    /// a retroactive edit can never spawn a press in the middle of holes
    /// already played. Presses that already fired stay fired.
    pub fn record_hole_result(&mut self, hole: u8, team1_score: u32, team2_score: u32) -> Result<()> {
        self.phase.ensure_mutable()?;
        let replaced = self.ledger.record(
            hole,
            HoleScore {
                team1: team1_score,
                team2: team2_score,
            },
        )?;
        if replaced.is_some() {
            debug!("nassau: hole {} re-entered", hole);
        }
        self.phase = GamePhase::Active;

        if self.config.auto_press && self.ledger.latest_hole() == Some(hole) {
            self.evaluate_auto_press(hole);
        }

        if self.ledger.is_complete() {
            self.phase = GamePhase::Completed;
            debug!("nassau: all 18 holes recorded, game completed");
        }
        Ok(())
    }

    /// The press ladder restarts its count at each press: the trigger
    /// differential is measured over the newest press's window (or the
    /// whole nine before any press), so a side must go down by the
    /// threshold *on the live bet* to fire the next one. The press itself
    /// starts at the following hole, where the card cursor already sits.
    fn evaluate_auto_press(&mut self, hole: u8) {
        for nine in Nine::containing(hole) {
            let next = hole + 1;
            if next > nine.last_hole() {
                continue;
            }
            if self.press_count(nine) >= self.config.max_presses_per_nine as usize {
                continue;
            }
            if self.presses.iter().any(|p| p.nine == nine && p.at_hole == next) {
                continue;
            }
            if self.is_decided(nine) {
                continue;
            }
            let window_start = self
                .presses
                .iter()
                .filter(|p| p.nine == nine)
                .map(|p| p.at_hole)
                .max()
                .unwrap_or(nine.first_hole());
            let window = self.tally(nine, window_start);
            if window.margin() < self.config.auto_press_threshold {
                continue;
            }
            let Some(trailer) = window.trailer() else {
                continue;
            };
            let press = Press {
                id: self.next_press_id,
                nine,
                pressed_by: trailer,
                at_hole: next,
                value: self.config.base_value,
                is_auto: true,
            };
            debug!(
                "nassau: auto press #{} on {} at hole {} by {}",
                press.id, nine, next, trailer
            );
            self.next_press_id += 1;
            self.presses.push(press);
        }
    }

    /// Opens a press by hand. Only legal while auto-press is off; refused
    /// outright — never silently dropped — when the ladder is full or the
    /// nine is already decided.
    pub fn add_manual_press(&mut self, nine: Nine, team: TeamSide, at_hole: u8) -> Result<()> {
        self.phase.ensure_mutable()?;
        check_hole(at_hole)?;
        if self.config.auto_press {
            return Err(GameError::AutoPressOnly);
        }
        if !nine.contains(at_hole) {
            return Err(GameError::PressOutsideNine {
                nine: nine.to_string(),
                at_hole,
            });
        }
        if self.press_count(nine) >= self.config.max_presses_per_nine as usize {
            return Err(GameError::PressLimitReached {
                nine: nine.to_string(),
                max: self.config.max_presses_per_nine,
            });
        }
        if self.is_decided(nine) {
            return Err(GameError::NineDecided(nine.to_string()));
        }
        let press = Press {
            id: self.next_press_id,
            nine,
            pressed_by: team,
            at_hole,
            value: self.config.base_value,
            is_auto: false,
        };
        debug!(
            "nassau: manual press #{} on {} at hole {} by {}",
            press.id, nine, at_hole, team
        );
        self.next_press_id += 1;
        self.presses.push(press);
        Ok(())
    }

    /// Reopens a completed game for corrections.
    pub fn reopen(&mut self) -> Result<()> {
        if self.phase != GamePhase::Completed {
            return Err(GameError::GameNotCompleted);
        }
        self.phase = GamePhase::Active;
        Ok(())
    }

    /// Settles every bet on the card: the three base nines, then each
    /// press scored over its own window. Ties push and pay nothing; their
    /// value is kept on the line item as an audit trail.
    pub fn calculate_payouts(&self) -> NassauPayouts {
        let mut lines = Vec::with_capacity(3 + self.presses.len());
        for nine in Nine::ALL {
            lines.push(BetLine {
                label: nine.to_string(),
                winner: self.nine_state(nine).leader(),
                value: self.config.base_value,
            });
        }
        for press in &self.presses {
            lines.push(BetLine {
                label: format!("press {} @{}", press.nine, press.at_hole),
                winner: self.tally(press.nine, press.at_hole).leader(),
                value: press.value,
            });
        }

        let mut total_team1 = Money::ZERO;
        let mut total_team2 = Money::ZERO;
        for line in &lines {
            match line.winner {
                Some(TeamSide::Team1) => total_team1 += line.value,
                Some(TeamSide::Team2) => total_team2 += line.value,
                None => {}
            }
        }
        NassauPayouts {
            lines,
            total_team1,
            total_team2,
            settlement: SettlementResult::between(total_team1, total_team2),
        }
    }
}
