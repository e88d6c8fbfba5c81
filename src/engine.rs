//! The game wrapper: builds an engine from config, dispatches logged
//! events to it, replays whole logs, and writes the settlement CSV.

use crate::config::{GameConfig, GameKind};
use crate::error::{GameError, Result};
use crate::event::{EventRecord, GameEvent, NassauEvent, SkinsEvent, WolfEvent};
use crate::ledger::GamePhase;
use crate::money::Money;
use crate::nassau::NassauEngine;
use crate::roster::Roster;
use crate::settlement::SettlementResult;
use crate::skins::SkinsEngine;
use crate::wolf::WolfEngine;
use csv::{ReaderBuilder, Trim};
use log::warn;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// A configured game with its engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Game {
    Skins(SkinsEngine),
    Nassau(NassauEngine),
    Wolf(WolfEngine),
}

impl Game {
    /// Builds a fresh game in `setup` from config and roster.
    pub fn new(config: GameConfig, roster: Roster) -> Result<Game> {
        match config {
            GameConfig::Skins(cfg) => Ok(Game::Skins(SkinsEngine::new(cfg, roster))),
            GameConfig::Nassau(cfg) => Ok(Game::Nassau(NassauEngine::new(cfg, roster)?)),
            GameConfig::Wolf(cfg) => Ok(Game::Wolf(WolfEngine::new(cfg, roster)?)),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Game::Skins(_) => GameKind::Skins,
            Game::Nassau(_) => GameKind::Nassau,
            Game::Wolf(_) => GameKind::Wolf,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match self {
            Game::Skins(engine) => engine.phase(),
            Game::Nassau(engine) => engine.phase(),
            Game::Wolf(engine) => engine.phase(),
        }
    }

    /// Applies one logged event. All-or-nothing: an error leaves the
    /// state exactly as it was.
    pub fn apply(&mut self, event: &GameEvent) -> Result<()> {
        match (self, event) {
            (Game::Skins(engine), GameEvent::Skins(e)) => match e {
                SkinsEvent::Result { hole, winner } => {
                    engine.record_hole_winner(*hole, winner.clone())
                }
                SkinsEvent::Close => engine.close(),
            },
            (Game::Nassau(engine), GameEvent::Nassau(e)) => match e {
                NassauEvent::Score {
                    hole,
                    team1_score,
                    team2_score,
                } => engine.record_hole_result(*hole, *team1_score, *team2_score),
                NassauEvent::ManualPress {
                    nine,
                    team,
                    at_hole,
                } => engine.add_manual_press(*nine, *team, *at_hole),
            },
            (Game::Wolf(engine), GameEvent::Wolf(e)) => match e {
                WolfEvent::Declare { hole, partner, pig } => {
                    let wolf = engine.wolf_for_hole(*hole)?.clone();
                    engine.choose_wolf_partner(*hole, &wolf, partner.clone(), *pig)
                }
                WolfEvent::Outcome { hole, winner } => {
                    engine.record_hole_outcome(*hole, *winner)
                }
            },
            (game, _) => Err(GameError::WrongEventKind {
                game: game.kind().to_string(),
            }),
        }
    }

    /// Rebuilds a game from scratch by folding `apply` over an ordered
    /// log. Running totals are only ever a cache of this.
    pub fn replay(config: GameConfig, roster: Roster, events: &[GameEvent]) -> Result<Game> {
        let mut game = Game::new(config, roster)?;
        for event in events {
            game.apply(event)?;
        }
        Ok(game)
    }

    /// Streams an event-log CSV into the game.
    ///
    /// Records are read one at a time; rows that fail to parse and
    /// mutations the engine rejects are logged at warn level and skipped,
    /// so one bad row cannot wedge a whole round.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let kind = self.kind();
        for (row_idx, result) in csv_reader.deserialize::<EventRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => {
                    if let Some(event) = record.parse(kind) {
                        if let Err(e) = self.apply(&event) {
                            warn!("Row {}: {}", row_num, e);
                        }
                    } else {
                        warn!(
                            "Row {}: unrecognized {} event '{}'",
                            row_num, kind, record.event
                        );
                    }
                }
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Writes the settlement as CSV.
    ///
    /// Output order is deterministic: ranked standings for skins and
    /// wolf; for nassau the three base bets, then presses in the order
    /// they were opened, then the net row.
    pub fn write_settlement<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        match self {
            Game::Skins(engine) => {
                csv_writer.write_record(["player", "skins", "winnings"])?;
                for standing in engine.standings() {
                    csv_writer.write_record([
                        standing.player.clone(),
                        standing.units.to_string(),
                        standing.amount.to_string(),
                    ])?;
                }
            }
            Game::Wolf(engine) => {
                csv_writer.write_record(["player", "points", "amount"])?;
                for standing in engine.payouts() {
                    csv_writer.write_record([
                        standing.player.clone(),
                        standing.units.to_string(),
                        standing.amount.to_string(),
                    ])?;
                }
            }
            Game::Nassau(engine) => {
                csv_writer.write_record(["bet", "winner", "amount"])?;
                let payouts = engine.calculate_payouts();
                for line in &payouts.lines {
                    let winner = line
                        .winner
                        .map(|side| side.to_string())
                        .unwrap_or_else(|| "push".to_string());
                    csv_writer.write_record([
                        line.label.clone(),
                        winner,
                        line.value.to_string(),
                    ])?;
                }
                match payouts.settlement {
                    SettlementResult::Even => {
                        csv_writer.write_record([
                            "net".to_string(),
                            "push".to_string(),
                            Money::ZERO.to_string(),
                        ])?;
                    }
                    SettlementResult::Transfer { to, amount, .. } => {
                        csv_writer.write_record([
                            "net".to_string(),
                            to.to_string(),
                            amount.to_string(),
                        ])?;
                    }
                }
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NassauConfig, SkinsConfig};
    use crate::roster::{Player, TeamSide};
    use std::io::Cursor;
    use std::str::FromStr;

    fn skins_game() -> Game {
        let roster = Roster::new(vec![
            Player::individual("amy", "Amy", "Park"),
            Player::individual("ben", "Ben", "Ruiz"),
        ])
        .unwrap();
        Game::new(
            GameConfig::Skins(SkinsConfig {
                per_hole: Money::from_str("5.00").unwrap(),
            }),
            roster,
        )
        .unwrap()
    }

    fn nassau_config() -> GameConfig {
        GameConfig::Nassau(NassauConfig {
            base_value: Money::from_str("10.00").unwrap(),
            auto_press: true,
            auto_press_threshold: 2,
            max_presses_per_nine: 2,
        })
    }

    fn nassau_roster() -> Roster {
        Roster::new(vec![
            Player::on_team("amy", "Amy", "Park", TeamSide::Team1),
            Player::on_team("cal", "Cal", "Singh", TeamSide::Team2),
        ])
        .unwrap()
    }

    #[test]
    fn test_apply_rejects_foreign_events() {
        let mut game = skins_game();
        let event = GameEvent::Nassau(NassauEvent::Score {
            hole: 1,
            team1_score: 4,
            team2_score: 5,
        });
        assert!(matches!(
            game.apply(&event),
            Err(GameError::WrongEventKind { .. })
        ));
    }

    #[test]
    fn test_replay_equals_incremental_fold() {
        let events: Vec<GameEvent> = vec![
            GameEvent::Nassau(NassauEvent::Score {
                hole: 1,
                team1_score: 4,
                team2_score: 5,
            }),
            GameEvent::Nassau(NassauEvent::Score {
                hole: 2,
                team1_score: 4,
                team2_score: 5,
            }),
            GameEvent::Nassau(NassauEvent::Score {
                hole: 3,
                team1_score: 5,
                team2_score: 4,
            }),
            // correction to hole 2
            GameEvent::Nassau(NassauEvent::Score {
                hole: 2,
                team1_score: 4,
                team2_score: 4,
            }),
        ];

        let mut incremental = Game::new(nassau_config(), nassau_roster()).unwrap();
        for event in &events {
            incremental.apply(event).unwrap();
        }
        let replayed = Game::replay(nassau_config(), nassau_roster(), &events).unwrap();
        assert_eq!(incremental, replayed);
    }

    #[test]
    fn test_process_csv_skips_bad_rows() {
        let csv = "event,hole,arg1,arg2\n\
                   push,1,,\n\
                   win,99,amy,\n\
                   shank,2,,\n\
                   win,2,zed,\n\
                   win,3,amy,\n";
        let mut game = skins_game();
        game.process_csv(Cursor::new(csv)).unwrap();

        match &game {
            Game::Skins(engine) => {
                // only the push and the final win landed
                let standings = engine.standings();
                assert_eq!(standings.len(), 1);
                assert_eq!(standings[0].player, "amy");
                assert_eq!(standings[0].amount, Money::from_str("10.00").unwrap());
            }
            other => panic!("expected skins game, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_write_settlement_skins() {
        let mut game = skins_game();
        let csv = "event,hole,arg1,arg2\n\
                   push,1,,\n\
                   win,2,amy,\n\
                   win,3,ben,\n";
        game.process_csv(Cursor::new(csv)).unwrap();

        let mut output = Vec::new();
        game.write_settlement(&mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("player,skins,winnings"));
        assert!(text.contains("amy,1,10.00"));
        assert!(text.contains("ben,1,5.00"));
    }

    #[test]
    fn test_write_settlement_nassau_net_row() {
        let mut game = Game::new(nassau_config(), nassau_roster()).unwrap();
        let csv = "event,hole,arg1,arg2\n\
                   score,1,4,5\n\
                   score,2,4,5\n";
        game.process_csv(Cursor::new(csv)).unwrap();

        let mut output = Vec::new();
        game.write_settlement(&mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("bet,winner,amount"));
        assert!(text.contains("front,team1,10.00"));
        assert!(text.contains("back,push,10.00"));
        let net = text.lines().last().unwrap();
        assert!(net.starts_with("net,team1,"));
    }
}
