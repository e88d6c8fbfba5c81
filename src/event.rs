//! Durable event-log records and their CSV wire form.
//!
//! The log is the source of truth for a game: every mutation the engines
//! accept has a row form here, so any state can be rebuilt by replaying
//! the rows in order.

use crate::config::GameKind;
use crate::nassau::Nine;
use crate::roster::{PlayerId, TeamSide};
use crate::wolf::WolfWinner;
use serde::Deserialize;

/// A skins log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkinsEvent {
    /// One hole's result; `None` is a push.
    Result { hole: u8, winner: Option<PlayerId> },
    /// Explicit end of the game.
    Close,
}

/// A nassau log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NassauEvent {
    Score {
        hole: u8,
        team1_score: u32,
        team2_score: u32,
    },
    ManualPress {
        nine: Nine,
        team: TeamSide,
        at_hole: u8,
    },
}

/// A wolf log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WolfEvent {
    Declare {
        hole: u8,
        partner: Option<PlayerId>,
        pig: bool,
    },
    Outcome { hole: u8, winner: WolfWinner },
}

/// Any game's log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Skins(SkinsEvent),
    Nassau(NassauEvent),
    Wolf(WolfEvent),
}

/// Raw event row as read from the log CSV.
///
/// Columns are `event,hole,arg1,arg2`; what the args mean depends on the
/// verb and the game kind:
///
/// | kind   | rows                                                      |
/// |--------|-----------------------------------------------------------|
/// | skins  | `win,3,amy,` · `push,1,,` · `close,,,`                    |
/// | nassau | `score,3,4,5` · `press,5,front,2`                         |
/// | wolf   | `partner,1,ben,` · `lone,5,,` · `pig,4,,` · `outcome,1,wolf,` |
#[derive(Debug, Deserialize)]
pub struct EventRecord {
    pub event: String,
    #[serde(default)]
    pub hole: Option<u8>,
    #[serde(default)]
    pub arg1: Option<String>,
    #[serde(default)]
    pub arg2: Option<String>,
}

impl EventRecord {
    /// Parses the raw row into a typed event for the given game kind.
    ///
    /// Returns `None` for rows that don't make sense (unknown verb,
    /// missing hole, malformed args).
    pub fn parse(&self, kind: GameKind) -> Option<GameEvent> {
        let verb = self.event.trim().to_lowercase();
        match kind {
            GameKind::Skins => self.parse_skins(&verb),
            GameKind::Nassau => self.parse_nassau(&verb),
            GameKind::Wolf => self.parse_wolf(&verb),
        }
    }

    fn text(value: &Option<String>) -> Option<&str> {
        let s = value.as_deref()?.trim();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    }

    fn parse_skins(&self, verb: &str) -> Option<GameEvent> {
        let event = match verb {
            "win" => SkinsEvent::Result {
                hole: self.hole?,
                winner: Some(Self::text(&self.arg1)?.to_string()),
            },
            "push" => SkinsEvent::Result {
                hole: self.hole?,
                winner: None,
            },
            "close" => SkinsEvent::Close,
            _ => return None,
        };
        Some(GameEvent::Skins(event))
    }

    fn parse_nassau(&self, verb: &str) -> Option<GameEvent> {
        let event = match verb {
            "score" => NassauEvent::Score {
                hole: self.hole?,
                team1_score: Self::text(&self.arg1)?.parse().ok()?,
                team2_score: Self::text(&self.arg2)?.parse().ok()?,
            },
            "press" => NassauEvent::ManualPress {
                nine: Nine::parse(Self::text(&self.arg1)?)?,
                team: TeamSide::from_number(Self::text(&self.arg2)?.parse().ok()?)?,
                at_hole: self.hole?,
            },
            _ => return None,
        };
        Some(GameEvent::Nassau(event))
    }

    fn parse_wolf(&self, verb: &str) -> Option<GameEvent> {
        let event = match verb {
            "partner" => WolfEvent::Declare {
                hole: self.hole?,
                partner: Some(Self::text(&self.arg1)?.to_string()),
                pig: false,
            },
            "lone" => WolfEvent::Declare {
                hole: self.hole?,
                partner: None,
                pig: false,
            },
            "pig" => WolfEvent::Declare {
                hole: self.hole?,
                partner: None,
                pig: true,
            },
            "outcome" => WolfEvent::Outcome {
                hole: self.hole?,
                winner: WolfWinner::parse(Self::text(&self.arg1)?)?,
            },
            _ => return None,
        };
        Some(GameEvent::Wolf(event))
    }
}
