//! # Sidegames
//!
//! A settlement engine for golf-trip side games. An ordered log of
//! per-hole results is replayed into running standings and a final
//! monetary settlement for three wagering formats:
//!
//! - **Skins** — fixed pot per hole; pushed pots carry over until
//!   somebody wins a hole outright.
//! - **Nassau** — front, back, and overall bets between two teams, each
//!   with its own ladder of automatic or manual presses.
//! - **Wolf** — rotating partner pick with lone-wolf and pig multipliers.
//!
//! ## Design Principles
//!
//! - **The log is authoritative**: every standings reader is a pure
//!   rescan of the hole-result ledger, so retroactive edits re-derive
//!   everything downstream and replaying a log always reproduces state.
//! - **All-or-nothing mutations**: a rejected entry leaves state
//!   untouched.
//! - **Fixed-point money**: 2 decimal places via `rust_decimal`.
//!
//! ## Example
//!
//! ```
//! use std::str::FromStr;
//! use sidegames::{Money, Player, Roster, SkinsConfig, SkinsEngine};
//!
//! let roster = Roster::new(vec![
//!     Player::individual("amy", "Amy", "Park"),
//!     Player::individual("ben", "Ben", "Ruiz"),
//! ]).unwrap();
//! let config = SkinsConfig { per_hole: Money::from_str("5.00").unwrap() };
//!
//! let mut game = SkinsEngine::new(config, roster);
//! game.record_hole_winner(1, None).unwrap();
//! game.record_hole_winner(2, None).unwrap();
//! game.record_hole_winner(3, Some("amy".to_string())).unwrap();
//!
//! // two carried pots plus hole 3's own
//! assert_eq!(game.standings()[0].amount.to_string(), "15.00");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod ledger;
pub mod money;
pub mod nassau;
pub mod roster;
pub mod settlement;
pub mod skins;
pub mod store;
pub mod wolf;

pub use config::{GameConfig, GameFile, GameKind, NassauConfig, SkinsConfig, WolfConfig};
pub use engine::Game;
pub use error::{ErrorKind, GameError, Result};
pub use event::{EventRecord, GameEvent, NassauEvent, SkinsEvent, WolfEvent};
pub use ledger::{GamePhase, HoleLedger};
pub use money::Money;
pub use nassau::{HoleScore, NassauEngine, Nine, NineState, Press};
pub use roster::{Player, PlayerId, Roster, TeamSide};
pub use settlement::{BetLine, NassauPayouts, SettlementResult, Standing};
pub use skins::{SkinsEngine, SkinsHoleResult, SkinsOutcome};
pub use store::{GameId, GameStore, MemoryStore, Revision, VersionedGame};
pub use wolf::{WolfDeclaration, WolfEngine, WolfHole, WolfWinner};
