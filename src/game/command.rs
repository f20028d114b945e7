//! Text commands for scripted sessions
//!
//! One command per line or `;`-separated, e.g. `draw; play 3 100 80; tap 3`.
//! Card ids may be written with or without a leading `#`.

use crate::core::{InstanceId, Position};
use crate::game::GameAction;
use crate::{PlaymatError, Result};
use std::str::FromStr;

/// A parsed command: either an intent for the coordinator, or undo
#[derive(Debug, Clone, PartialEq)]
pub enum PlaymatCommand {
    Action(GameAction),
    Undo,
}

impl FromStr for PlaymatCommand {
    type Err = PlaymatError;

    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(PlaymatError::InvalidCommand("empty command".to_string()));
        };
        let args: Vec<&str> = words.collect();
        let args = Args { verb, args: &args };

        let action = match verb.to_lowercase().as_str() {
            "undo" => {
                args.expect_len(0)?;
                return Ok(PlaymatCommand::Undo);
            }
            "draw" => {
                args.expect_len(0)?;
                GameAction::Draw
            }
            "play" => GameAction::Play {
                card: args.id(0)?,
                position: args.optional_position(1)?,
            },
            "cast" => GameAction::PlayFromCommand {
                card: args.id(0)?,
                position: args.optional_position(1)?,
            },
            "return" => GameAction::ReturnToHand { card: args.single_id()? },
            "graveyard" => GameAction::SendToGraveyard { card: args.single_id()? },
            "exile" => GameAction::SendToExile { card: args.single_id()? },
            "command" => GameAction::SendToCommand { card: args.single_id()? },
            "flip" => GameAction::Flip { card: args.single_id()? },
            "tap" => GameAction::SetTapped {
                card: args.single_id()?,
                tapped: true,
            },
            "untap" => GameAction::SetTapped {
                card: args.single_id()?,
                tapped: false,
            },
            "toggle" => GameAction::ToggleTap { card: args.single_id()? },
            "stack" => GameAction::Stack {
                child: args.id(0)?,
                target: args.id(1)?,
                position: args.optional_position(2)?,
            },
            "stack-from-hand" => {
                args.expect_len(2)?;
                GameAction::StackFromHand {
                    card: args.id(0)?,
                    target: args.id(1)?,
                }
            }
            "unstack" => GameAction::UnstackTop { host: args.single_id()? },
            "move" => {
                args.expect_len(3)?;
                GameAction::MoveOnBattlefield {
                    card: args.id(0)?,
                    position: args.position(1)?,
                }
            }
            "counter+" => GameAction::AddCounter { card: args.single_id()? },
            "counter-" => GameAction::RemoveCounter { card: args.single_id()? },
            "shuffle" => {
                args.expect_len(0)?;
                GameAction::Shuffle
            }
            "next-turn" => {
                args.expect_len(0)?;
                GameAction::NextTurn
            }
            "restart" => {
                args.expect_len(0)?;
                GameAction::Restart
            }
            "life" => {
                args.expect_len(1)?;
                let value = args.args[0];
                let amount: i32 = value
                    .parse()
                    .map_err(|_| args.error(&format!("'{value}' is not a number")))?;
                if value.starts_with('+') || value.starts_with('-') {
                    GameAction::AdjustLife { delta: amount }
                } else {
                    GameAction::SetLife { life: amount }
                }
            }
            _ => return Err(PlaymatError::InvalidCommand(format!("unknown command '{verb}'"))),
        };
        Ok(PlaymatCommand::Action(action))
    }
}

/// Split a script into commands, skipping blank lines and `#` comments
pub fn parse_script(script: &str) -> Result<Vec<PlaymatCommand>> {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split(';'))
        .map(str::trim)
        .filter(|cmd| !cmd.is_empty())
        .map(str::parse::<PlaymatCommand>)
        .collect()
}

struct Args<'a> {
    verb: &'a str,
    args: &'a [&'a str],
}

impl Args<'_> {
    fn error(&self, message: &str) -> PlaymatError {
        PlaymatError::InvalidCommand(format!("{}: {message}", self.verb))
    }

    fn expect_len(&self, n: usize) -> Result<()> {
        if self.args.len() != n {
            return Err(self.error(&format!("expected {n} argument(s), got {}", self.args.len())));
        }
        Ok(())
    }

    fn id(&self, index: usize) -> Result<InstanceId> {
        let raw = self
            .args
            .get(index)
            .ok_or_else(|| self.error("missing card id"))?;
        raw.parse()
            .map_err(|_| self.error(&format!("'{raw}' is not a card id")))
    }

    fn single_id(&self) -> Result<InstanceId> {
        self.expect_len(1)?;
        self.id(0)
    }

    fn coordinate(&self, index: usize) -> Result<f32> {
        let raw = self
            .args
            .get(index)
            .ok_or_else(|| self.error("missing coordinate"))?;
        raw.parse()
            .map_err(|_| self.error(&format!("'{raw}' is not a coordinate")))
    }

    fn position(&self, index: usize) -> Result<Position> {
        Ok(Position::new(self.coordinate(index)?, self.coordinate(index + 1)?))
    }

    /// Either nothing or exactly two coordinates from `index` on
    fn optional_position(&self, index: usize) -> Result<Option<Position>> {
        match self.args.len() {
            n if n == index => Ok(None),
            n if n == index + 2 => self.position(index).map(Some),
            _ => Err(self.error("expected an id optionally followed by X Y")),
        }
    }
}
