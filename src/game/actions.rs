//! Playmat intents and the state transitions they perform
//!
//! Each [`GameAction`] maps onto one `GameState` method below. The methods
//! validate before they mutate where they can; [`GameAction::reduce`] and the
//! [`Playmat`](crate::game::Playmat) coordinator additionally run every
//! intent against a copy so a failure halfway through a compound action is
//! never observed.

use crate::config::PlaymatConfig;
use crate::core::{InstanceId, InstanceIdGenerator, Position};
use crate::game::library;
use crate::game::stacking::StackOutcome;
use crate::game::GameState;
use crate::loader::{DeckDefinition, GameInitializer};
use crate::zones::Zone;
use crate::{PlaymatError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete intent from the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameAction {
    /// Move the top card of the library into the hand
    Draw,

    /// Play a card from hand; without a position it lands in the fallback area
    Play {
        card: InstanceId,
        position: Option<Position>,
    },

    PlayFromCommand {
        card: InstanceId,
        position: Option<Position>,
    },

    ReturnToHand { card: InstanceId },

    SendToGraveyard { card: InstanceId },

    SendToExile { card: InstanceId },

    SendToCommand { card: InstanceId },

    /// Toggle face-down on any battlefield card, host or child
    Flip { card: InstanceId },

    /// Put `child` under `target`; `position` only matters for a self-stack
    Stack {
        child: InstanceId,
        target: InstanceId,
        position: Option<Position>,
    },

    /// Play a hand card straight into a battlefield stack
    StackFromHand {
        card: InstanceId,
        target: InstanceId,
    },

    UnstackTop { host: InstanceId },

    SetTapped { card: InstanceId, tapped: bool },

    ToggleTap { card: InstanceId },

    AddCounter { card: InstanceId },

    RemoveCounter { card: InstanceId },

    MoveOnBattlefield {
        card: InstanceId,
        position: Position,
    },

    Shuffle,

    /// Advance the turn, draw one card and untap everything
    NextTurn,

    SetLife { life: i32 },

    AdjustLife { delta: i32 },

    /// Rebuild the session from the deck definition
    Restart,
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn at(position: &Option<Position>) -> String {
            position.map(|p| format!(" at {p}")).unwrap_or_default()
        }

        match self {
            GameAction::Draw => write!(f, "draw"),
            GameAction::Play { card, position } => write!(f, "play {card}{}", at(position)),
            GameAction::PlayFromCommand { card, position } => {
                write!(f, "cast {card} from command{}", at(position))
            }
            GameAction::ReturnToHand { card } => write!(f, "return {card} to hand"),
            GameAction::SendToGraveyard { card } => write!(f, "send {card} to graveyard"),
            GameAction::SendToExile { card } => write!(f, "exile {card}"),
            GameAction::SendToCommand { card } => write!(f, "send {card} to command zone"),
            GameAction::Flip { card } => write!(f, "flip {card}"),
            GameAction::Stack {
                child,
                target,
                position,
            } => write!(f, "stack {child} onto {target}{}", at(position)),
            GameAction::StackFromHand { card, target } => {
                write!(f, "stack {card} from hand onto {target}")
            }
            GameAction::UnstackTop { host } => write!(f, "unstack top of {host}"),
            GameAction::SetTapped { card, tapped: true } => write!(f, "tap {card}"),
            GameAction::SetTapped { card, tapped: false } => write!(f, "untap {card}"),
            GameAction::ToggleTap { card } => write!(f, "toggle tap on {card}"),
            GameAction::AddCounter { card } => write!(f, "add counter to {card}"),
            GameAction::RemoveCounter { card } => write!(f, "remove counter from {card}"),
            GameAction::MoveOnBattlefield { card, position } => write!(f, "move {card} to {position}"),
            GameAction::Shuffle => write!(f, "shuffle library"),
            GameAction::NextTurn => write!(f, "next turn"),
            GameAction::SetLife { life } => write!(f, "set life to {life}"),
            GameAction::AdjustLife { delta } => write!(f, "adjust life by {delta:+}"),
            GameAction::Restart => write!(f, "restart"),
        }
    }
}

/// What a successful action did, for logging and callers that care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Drew(InstanceId),
    Stacked(StackOutcome),
    /// The promoted card, or `None` if the stack was already empty
    Unstacked(Option<InstanceId>),
    Tapped(bool),
    Counters(u32),
    /// `drew` is `None` when the library was empty
    TurnAdvanced {
        turn: u32,
        drew: Option<InstanceId>,
    },
    Restarted {
        cards: usize,
    },
}

/// Everything an action may need besides the state itself
pub struct ApplyContext<'a, R: Rng> {
    pub rng: &'a mut R,
    pub ids: &'a mut InstanceIdGenerator,
    pub config: &'a PlaymatConfig,
    pub deck: &'a DeckDefinition,
}

impl GameAction {
    /// Apply this action to `state` in place
    ///
    /// On error `state` may be partially modified; use [`GameAction::reduce`]
    /// or the coordinator when that matters.
    pub fn apply<R: Rng>(&self, state: &mut GameState, ctx: &mut ApplyContext<'_, R>) -> Result<ActionOutcome> {
        let config = ctx.config;
        match *self {
            GameAction::Draw => state.draw().map(ActionOutcome::Drew),
            GameAction::Play { card, position } => {
                let position = position.unwrap_or_else(|| config.fallback_area.sample(ctx.rng));
                state.play(card, Zone::Hand, position)?;
                Ok(ActionOutcome::Applied)
            }
            GameAction::PlayFromCommand { card, position } => {
                let position = position.unwrap_or_else(|| config.fallback_area.sample(ctx.rng));
                state.play(card, Zone::Command, position)?;
                Ok(ActionOutcome::Applied)
            }
            GameAction::ReturnToHand { card } => {
                state.return_to_hand(card)?;
                Ok(ActionOutcome::Applied)
            }
            GameAction::SendToGraveyard { card } => {
                state.send_from_battlefield(card, Zone::Graveyard)?;
                Ok(ActionOutcome::Applied)
            }
            GameAction::SendToExile { card } => {
                state.send_from_battlefield(card, Zone::Exile)?;
                Ok(ActionOutcome::Applied)
            }
            GameAction::SendToCommand { card } => {
                state.send_from_battlefield(card, Zone::Command)?;
                Ok(ActionOutcome::Applied)
            }
            GameAction::Flip { card } => {
                state.flip(card)?;
                Ok(ActionOutcome::Applied)
            }
            GameAction::Stack {
                child,
                target,
                position,
            } => state.stack(child, target, position).map(ActionOutcome::Stacked),
            GameAction::StackFromHand { card, target } => {
                state.stack_from_hand(card, target).map(ActionOutcome::Stacked)
            }
            GameAction::UnstackTop { host } => state
                .zones
                .battlefield_mut()
                .unstack_top(host, config.unstack_offset)
                .map(ActionOutcome::Unstacked),
            GameAction::SetTapped { card, tapped } => {
                state.zones.battlefield_mut().set_tapped(card, tapped)?;
                Ok(ActionOutcome::Tapped(tapped))
            }
            GameAction::ToggleTap { card } => state
                .zones
                .battlefield_mut()
                .toggle_tapped(card)
                .map(ActionOutcome::Tapped),
            GameAction::AddCounter { card } => state.add_counter(card).map(ActionOutcome::Counters),
            GameAction::RemoveCounter { card } => {
                state.remove_counter(card).map(ActionOutcome::Counters)
            }
            GameAction::MoveOnBattlefield { card, position } => {
                state.move_on_battlefield(card, position)?;
                Ok(ActionOutcome::Applied)
            }
            GameAction::Shuffle => {
                state.zones.library_mut().shuffle(ctx.rng);
                Ok(ActionOutcome::Applied)
            }
            GameAction::NextTurn => {
                let drew = state.next_turn();
                Ok(ActionOutcome::TurnAdvanced {
                    turn: state.turn(),
                    drew,
                })
            }
            GameAction::SetLife { life } => {
                state.counters.set_life(life);
                Ok(ActionOutcome::Applied)
            }
            GameAction::AdjustLife { delta } => {
                state.counters.adjust_life(delta);
                Ok(ActionOutcome::Applied)
            }
            GameAction::Restart => {
                *state = GameInitializer::new(ctx.deck, config).init_game(ctx.ids, ctx.rng);
                Ok(ActionOutcome::Restarted {
                    cards: state.zones.total_cards(),
                })
            }
        }
    }

    /// Apply this action to a copy of `state`, leaving the original untouched
    pub fn reduce<R: Rng>(
        &self,
        state: &GameState,
        ctx: &mut ApplyContext<'_, R>,
    ) -> Result<(GameState, ActionOutcome)> {
        let mut next = state.clone();
        let outcome = self.apply(&mut next, ctx)?;
        Ok((next, outcome))
    }
}

impl GameState {
    /// Draw the top card of the library into the hand
    pub fn draw(&mut self) -> Result<InstanceId> {
        let card = library::draw(self.zones.library_mut()).ok_or(PlaymatError::EmptyLibrary)?;
        let id = card.id;
        if let Some(hand) = self.zones.get_zone_mut(Zone::Hand) {
            hand.add(card);
        }
        Ok(id)
    }

    /// Put a card from `from` (hand or command) onto the battlefield
    pub fn play(&mut self, card: InstanceId, from: Zone, position: Position) -> Result<()> {
        self.zones.place_on_battlefield(card, from, position)
    }

    /// Return a top-level battlefield card without a stack to the hand
    pub fn return_to_hand(&mut self, card: InstanceId) -> Result<()> {
        let battlefield = self.zones.battlefield();
        battlefield.require_top_level(card, "return")?;
        if battlefield.entry(card).is_some_and(|e| e.has_stack()) {
            return Err(PlaymatError::invariant(format!(
                "card {card} has cards stacked under it; unstack them before returning it to hand"
            )));
        }
        self.zones.move_card(card, Zone::Battlefield, Zone::Hand)
    }

    /// Send a battlefield host and its whole stack to `to`
    pub fn send_from_battlefield(&mut self, card: InstanceId, to: Zone) -> Result<()> {
        if to == Zone::Battlefield {
            return Err(PlaymatError::invariant(format!(
                "card {card} is already on the battlefield"
            )));
        }
        self.zones.move_card(card, Zone::Battlefield, to)
    }

    /// Toggle face-down; returns the new value
    pub fn flip(&mut self, card: InstanceId) -> Result<bool> {
        let instance = self
            .zones
            .battlefield_mut()
            .card_mut(card)
            .ok_or_else(|| PlaymatError::not_found(card, Zone::Battlefield))?;
        instance.facedown = !instance.facedown;
        Ok(instance.facedown)
    }

    /// Stack `child` onto `target`; a self-stack only updates the position
    pub fn stack(
        &mut self,
        child: InstanceId,
        target: InstanceId,
        position: Option<Position>,
    ) -> Result<StackOutcome> {
        let battlefield = self.zones.battlefield_mut();
        let outcome = battlefield.stack(child, target)?;
        if let (StackOutcome::SelfStack, Some(position)) = (outcome, position) {
            if let Some(entry) = battlefield.entry_mut(child) {
                entry.position = position;
            }
        }
        Ok(outcome)
    }

    /// Play `card` from hand at the target's position, then stack it there
    pub fn stack_from_hand(&mut self, card: InstanceId, target: InstanceId) -> Result<StackOutcome> {
        let battlefield = self.zones.battlefield();
        battlefield.require_top_level(target, "stack onto")?;
        let position = battlefield
            .entry(target)
            .map(|e| e.position)
            .ok_or_else(|| PlaymatError::not_found(target, Zone::Battlefield))?;

        self.zones.place_on_battlefield(card, Zone::Hand, position)?;
        self.zones.battlefield_mut().stack(card, target)
    }

    /// Returns the new counter count
    pub fn add_counter(&mut self, card: InstanceId) -> Result<u32> {
        let instance = self
            .zones
            .battlefield_mut()
            .card_mut(card)
            .ok_or_else(|| PlaymatError::not_found(card, Zone::Battlefield))?;
        instance.add_counter();
        Ok(instance.counters)
    }

    /// Removing from zero counters is allowed and leaves zero
    pub fn remove_counter(&mut self, card: InstanceId) -> Result<u32> {
        let instance = self
            .zones
            .battlefield_mut()
            .card_mut(card)
            .ok_or_else(|| PlaymatError::not_found(card, Zone::Battlefield))?;
        instance.remove_counter();
        Ok(instance.counters)
    }

    pub fn move_on_battlefield(&mut self, card: InstanceId, position: Position) -> Result<()> {
        let battlefield = self.zones.battlefield_mut();
        battlefield.require_top_level(card, "move")?;
        let entry = battlefield
            .entry_mut(card)
            .ok_or_else(|| PlaymatError::not_found(card, Zone::Battlefield))?;
        entry.position = position;
        Ok(())
    }

    /// Advance the turn, draw, untap; an empty library skips the draw
    pub fn next_turn(&mut self) -> Option<InstanceId> {
        self.counters.next_turn();
        let drew = self.draw().ok();
        self.zones.battlefield_mut().untap_all();
        drew
    }
}
