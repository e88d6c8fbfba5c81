//! Shared settlement vocabulary: ranked standings, bet line items, and
//! the net transfer between two sides.

use crate::money::Money;
use crate::roster::{PlayerId, TeamSide};
use serde::Serialize;
use std::fmt;

/// One ranked row of a per-player settlement.
///
/// `units` is whatever the game counts — skins won, or net wolf points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub player: PlayerId,
    pub units: i64,
    pub amount: Money,
}

/// Ranks standings descending by amount. The sort is stable, so insertion
/// order (roster or rotation order) breaks ties.
pub fn rank(standings: &mut [Standing]) {
    standings.sort_by(|a, b| b.amount.cmp(&a.amount));
}

/// A single resolved bet: one nassau nine or one press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BetLine {
    pub label: String,
    /// `None` is a push; the value is kept as an audit trail.
    pub winner: Option<TeamSide>,
    pub value: Money,
}

/// Net transfer between the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SettlementResult {
    /// Everything halved or offsetting: nobody owes anybody.
    Even,
    Transfer {
        from: TeamSide,
        to: TeamSide,
        amount: Money,
    },
}

impl SettlementResult {
    /// Settles two totals symmetrically: the lower total owes the higher
    /// the difference.
    pub fn between(total_team1: Money, total_team2: Money) -> Self {
        if total_team1 == total_team2 {
            SettlementResult::Even
        } else if total_team1 > total_team2 {
            SettlementResult::Transfer {
                from: TeamSide::Team2,
                to: TeamSide::Team1,
                amount: total_team1 - total_team2,
            }
        } else {
            SettlementResult::Transfer {
                from: TeamSide::Team1,
                to: TeamSide::Team2,
                amount: total_team2 - total_team1,
            }
        }
    }
}

impl fmt::Display for SettlementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementResult::Even => write!(f, "push"),
            SettlementResult::Transfer { from, to, amount } => {
                write!(f, "{} owes {} {}", from, to, amount)
            }
        }
    }
}

/// Full nassau payout breakdown: every bet line plus the net transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NassauPayouts {
    pub lines: Vec<BetLine>,
    pub total_team1: Money,
    pub total_team2: Money,
    pub settlement: SettlementResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_between_is_symmetric() {
        let result = SettlementResult::between(money("30.00"), money("10.00"));
        assert_eq!(
            result,
            SettlementResult::Transfer {
                from: TeamSide::Team2,
                to: TeamSide::Team1,
                amount: money("20.00"),
            }
        );

        let mirrored = SettlementResult::between(money("10.00"), money("30.00"));
        assert_eq!(
            mirrored,
            SettlementResult::Transfer {
                from: TeamSide::Team1,
                to: TeamSide::Team2,
                amount: money("20.00"),
            }
        );
    }

    #[test]
    fn test_between_even() {
        assert_eq!(
            SettlementResult::between(money("15.00"), money("15.00")),
            SettlementResult::Even
        );
        assert_eq!(
            SettlementResult::between(Money::ZERO, Money::ZERO),
            SettlementResult::Even
        );
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let mut standings = vec![
            Standing {
                player: "amy".to_string(),
                units: 2,
                amount: money("20.00"),
            },
            Standing {
                player: "ben".to_string(),
                units: 1,
                amount: money("5.00"),
            },
            Standing {
                player: "cal".to_string(),
                units: 1,
                amount: money("20.00"),
            },
        ];
        rank(&mut standings);
        let order: Vec<&str> = standings.iter().map(|s| s.player.as_str()).collect();
        assert_eq!(order, ["amy", "cal", "ben"]);
    }

    #[test]
    fn test_display() {
        let result = SettlementResult::between(money("0.00"), money("25.00"));
        assert_eq!(result.to_string(), "team1 owes team2 25.00");
        assert_eq!(SettlementResult::Even.to_string(), "push");
    }
}
