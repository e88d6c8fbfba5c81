//! Players, teams, and the ordered roster handed to a game at creation.
//!
//! The roster is read-only from the engines' perspective: it resolves
//! names, assigns team sides, and fixes the wolf rotation order. Who is
//! allowed to be on it is someone else's problem.

use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Player identifier as issued by the roster service.
pub type PlayerId = String;

/// One of the two sides of a team match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Team1 => TeamSide::Team2,
            TeamSide::Team2 => TeamSide::Team1,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            TeamSide::Team1 => 1,
            TeamSide::Team2 => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(TeamSide::Team1),
            2 => Some(TeamSide::Team2),
            _ => None,
        }
    }
}

impl TryFrom<u8> for TeamSide {
    type Error = String;

    fn try_from(n: u8) -> std::result::Result<Self, Self::Error> {
        TeamSide::from_number(n).ok_or_else(|| format!("team must be 1 or 2, got {}", n))
    }
}

impl From<TeamSide> for u8 {
    fn from(side: TeamSide) -> u8 {
        side.number()
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team{}", self.number())
    }
}

/// A rostered player. The `team` field is only meaningful for team
/// formats; individual formats ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub team: Option<TeamSide>,
}

impl Player {
    /// A player with no team assignment (skins, wolf).
    pub fn individual(id: &str, first_name: &str, last_name: &str) -> Self {
        Player {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            team: None,
        }
    }

    /// A player on one side of a team match (nassau).
    pub fn on_team(id: &str, first_name: &str, last_name: &str, team: TeamSide) -> Self {
        Player {
            team: Some(team),
            ..Player::individual(id, first_name, last_name)
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Ordered list of participants, immutable once a game starts.
///
/// Order matters twice: it is the wolf rotation, and it breaks ties in
/// ranked standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Builds a roster, rejecting blank or duplicate ids.
    pub fn new(players: Vec<Player>) -> Result<Self> {
        if players.is_empty() {
            return Err(GameError::EmptyRoster);
        }
        for (i, player) in players.iter().enumerate() {
            if player.id.trim().is_empty() {
                return Err(GameError::BlankPlayerId);
            }
            if players[..i].iter().any(|other| other.id == player.id) {
                return Err(GameError::DuplicatePlayer(player.id.clone()));
            }
        }
        Ok(Roster { players })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The side a player belongs to, if any.
    pub fn side_of(&self, id: &str) -> Option<TeamSide> {
        self.get(id).and_then(|p| p.team)
    }

    /// All players on one side, in roster order.
    pub fn side_members(&self, side: TeamSide) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.team == Some(side))
            .collect()
    }

    /// Validates that every player has a team and both sides are manned.
    pub fn require_two_sides(&self) -> Result<()> {
        for player in &self.players {
            if player.team.is_none() {
                return Err(GameError::MissingTeam(player.id.clone()));
            }
        }
        for side in [TeamSide::Team1, TeamSide::Team2] {
            if self.side_members(side).is_empty() {
                return Err(GameError::EmptySide(side.number()));
            }
        }
        Ok(())
    }
}
