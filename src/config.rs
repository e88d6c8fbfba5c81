//! Game configuration and the on-disk game file.
//!
//! Configuration is set once at game creation. Only the stake and press
//! parameters feed the math; renaming or re-describing a game never
//! rescores recorded holes.

use crate::error::Result;
use crate::money::Money;
use crate::roster::Player;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side game a configuration describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Skins,
    Nassau,
    Wolf,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameKind::Skins => "skins",
            GameKind::Nassau => "nassau",
            GameKind::Wolf => "wolf",
        };
        write!(f, "{}", name)
    }
}

/// Skins parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinsConfig {
    /// Pot contribution per hole; pushed pots carry forward.
    pub per_hole: Money,
}

/// Nassau parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NassauConfig {
    /// Value of each of the three base bets, and of every press.
    pub base_value: Money,
    /// When on, presses fire automatically and manual presses are refused.
    #[serde(default)]
    pub auto_press: bool,
    /// Holes-down on the live bet that triggers an automatic press.
    #[serde(default = "default_auto_press_threshold")]
    pub auto_press_threshold: u8,
    /// Press ladder cap, applied to each nine independently.
    #[serde(default = "default_max_presses_per_nine")]
    pub max_presses_per_nine: u8,
}

fn default_auto_press_threshold() -> u8 {
    2
}

fn default_max_presses_per_nine() -> u8 {
    3
}

/// Wolf parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfConfig {
    /// Dollar value of one point.
    pub buy_in: Money,
    /// Whether the tripled-stakes pig declaration is on the table.
    #[serde(default)]
    pub pig_available: bool,
}

/// Format parameters for one game, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum GameConfig {
    Skins(SkinsConfig),
    Nassau(NassauConfig),
    Wolf(WolfConfig),
}

impl GameConfig {
    pub fn kind(&self) -> GameKind {
        match self {
            GameConfig::Skins(_) => GameKind::Skins,
            GameConfig::Nassau(_) => GameKind::Nassau,
            GameConfig::Wolf(_) => GameKind::Wolf,
        }
    }
}

/// The TOML document the CLI loads: rules plus roster.
///
/// ```toml
/// [rules]
/// game = "nassau"
/// base_value = "10.00"
/// auto_press = true
///
/// [[players]]
/// id = "amy"
/// first_name = "Amy"
/// last_name = "Park"
/// team = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFile {
    #[serde(rename = "rules")]
    pub config: GameConfig,
    pub players: Vec<Player>,
}

impl GameFile {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_skins_file() {
        let text = r#"
[rules]
game = "skins"
per_hole = "5.00"

[[players]]
id = "amy"
first_name = "Amy"
last_name = "Park"

[[players]]
id = "ben"
first_name = "Ben"
last_name = "Ruiz"
"#;
        let file = GameFile::from_toml(text).unwrap();
        assert_eq!(file.config.kind(), GameKind::Skins);
        match &file.config {
            GameConfig::Skins(cfg) => {
                assert_eq!(cfg.per_hole, Money::from_str("5.00").unwrap());
            }
            other => panic!("expected skins config, got {:?}", other),
        }
        assert_eq!(file.players.len(), 2);
        assert_eq!(file.players[0].id, "amy");
        assert_eq!(file.players[0].team, None);
    }

    #[test]
    fn test_parse_nassau_file_with_defaults() {
        let text = r#"
[rules]
game = "nassau"
base_value = "10.00"
auto_press = true

[[players]]
id = "amy"
first_name = "Amy"
last_name = "Park"
team = 1

[[players]]
id = "cal"
first_name = "Cal"
last_name = "Singh"
team = 2
"#;
        let file = GameFile::from_toml(text).unwrap();
        match &file.config {
            GameConfig::Nassau(cfg) => {
                assert!(cfg.auto_press);
                assert_eq!(cfg.auto_press_threshold, 2);
                assert_eq!(cfg.max_presses_per_nine, 3);
            }
            other => panic!("expected nassau config, got {:?}", other),
        }
        assert_eq!(
            file.players[1].team,
            Some(crate::roster::TeamSide::Team2)
        );
    }

    #[test]
    fn test_parse_wolf_file() {
        let text = r#"
[rules]
game = "wolf"
buy_in = "5.00"
pig_available = true

[[players]]
id = "amy"
first_name = "Amy"
last_name = "Park"
"#;
        let file = GameFile::from_toml(text).unwrap();
        match &file.config {
            GameConfig::Wolf(cfg) => {
                assert!(cfg.pig_available);
                assert_eq!(cfg.buy_in, Money::from_str("5").unwrap());
            }
            other => panic!("expected wolf config, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_team_number_rejected() {
        let text = r#"
[rules]
game = "skins"
per_hole = "5.00"

[[players]]
id = "amy"
first_name = "Amy"
last_name = "Park"
team = 3
"#;
        assert!(GameFile::from_toml(text).is_err());
    }

    #[test]
    fn test_unknown_game_kind_rejected() {
        let text = r#"
[rules]
game = "vegas"
per_hole = "5.00"
players = []
"#;
        assert!(GameFile::from_toml(text).is_err());
    }
}
