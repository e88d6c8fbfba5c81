//! Error types for the settlement engine.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, GameError>;

/// Broad classification of an error, used by callers to pick a recovery:
/// fix the input (validation), re-fetch and retry (conflict), or surface a
/// rule that cannot be bent (invariant).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Invariant,
    Io,
}

/// Errors that can occur while recording results or settling a game.
///
/// Every mutation is all-or-nothing: a returned error means the state is
/// exactly as it was before the call.
#[derive(Error, Debug)]
pub enum GameError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Game file parsing error
    #[error("game file error: {0}")]
    Config(#[from] toml::de::Error),

    /// Missing CLI arguments
    #[error("missing arguments. Usage: sidegames <game.toml> <events.csv>")]
    MissingArgument,

    /// Hole number outside the round
    #[error("hole {0} is out of range (holes run 1 through 18)")]
    HoleOutOfRange(u8),

    /// Mutation attempted on a completed game
    #[error("game is completed; reopen it before recording results")]
    GameCompleted,

    /// Reopen attempted on a game that is not completed
    #[error("game is not completed; nothing to reopen")]
    GameNotCompleted,

    /// Roster with no players
    #[error("roster has no players")]
    EmptyRoster,

    /// Roster entry with a blank id
    #[error("roster has a player with a blank id")]
    BlankPlayerId,

    /// Two roster entries share an id
    #[error("duplicate player id '{0}' in roster")]
    DuplicatePlayer(String),

    /// Referenced player is not on the roster
    #[error("player '{0}' is not on the roster")]
    UnknownPlayer(String),

    /// Team game player without a team assignment
    #[error("player '{0}' has no team assignment")]
    MissingTeam(String),

    /// Team game side with nobody on it
    #[error("team {0} has no players")]
    EmptySide(u8),

    /// Wolf rotation needs exactly four players
    #[error("wolf is a four-player game; roster has {0}")]
    WolfRosterSize(usize),

    /// Manual press requested while auto-press governs the game
    #[error("manual presses are disabled while auto-press is on")]
    AutoPressOnly,

    /// Press anchored outside its nine
    #[error("hole {at_hole} is not part of the {nine} nine")]
    PressOutsideNine { nine: String, at_hole: u8 },

    /// Press ladder full for a nine
    #[error("the {nine} nine already has its maximum of {max} presses")]
    PressLimitReached { nine: String, max: u8 },

    /// Press against a nine that can no longer change hands
    #[error("the {0} nine is already decided")]
    NineDecided(String),

    /// Declaration by a player who is not the wolf on that hole
    #[error("hole {hole}: '{got}' is not the wolf ('{expected}' is)")]
    WrongWolf {
        hole: u8,
        expected: String,
        got: String,
    },

    /// Wolf named themselves as partner
    #[error("the wolf '{0}' cannot partner with themselves")]
    PartnerIsWolf(String),

    /// Pig declared alongside a partner pick
    #[error("a pig declaration cannot name a partner")]
    PigWithPartner,

    /// Pig declared in a game without pigs
    #[error("pig declarations are disabled for this game")]
    PigUnavailable,

    /// Pig declared twice by the same player
    #[error("'{player}' already declared a pig on hole {hole}")]
    PigAlreadyUsed { player: String, hole: u8 },

    /// Outcome recorded before the wolf declared
    #[error("hole {0} has no wolf declaration yet")]
    MissingDeclaration(u8),

    /// Event replayed into a game of a different kind
    #[error("event does not belong to a {game} game")]
    WrongEventKind { game: String },

    /// Write based on an out-of-date read; re-fetch and retry
    #[error("stale write: base revision {expected}, store has {actual}")]
    StaleRevision { expected: u64, actual: u64 },
}

impl GameError {
    /// Classifies the error into the coarse recovery taxonomy.
    pub fn kind(&self) -> ErrorKind {
        use GameError::*;
        match self {
            Io(_) | Csv(_) | Config(_) | MissingArgument => ErrorKind::Io,
            StaleRevision { .. } => ErrorKind::Conflict,
            PressLimitReached { .. } | NineDecided(_) => ErrorKind::Invariant,
            _ => ErrorKind::Validation,
        }
    }
}
