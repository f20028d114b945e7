//! Three-phase drag gestures: start, over, end
//!
//! `drag_over` only records the highlighted target. `drag_end` consumes the
//! gesture and yields exactly one intent or a cancellation telling the UI
//! where to put the card back.
//!
//! Battlefield drop targets carry the pointer position. The card lands at
//! that pointer minus the offset at which it was grabbed, so it keeps its
//! place under the cursor.

use crate::core::{InstanceId, Position};
use crate::game::GameAction;
use crate::zones::Zone;
use serde::{Deserialize, Serialize};

/// What the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DropTarget {
    /// Empty battlefield space at a container coordinate
    Battlefield(Position),
    /// A top-level battlefield card
    Card(InstanceId),
    /// A zone widget (hand, graveyard, exile, command, library)
    Zone(Zone),
    /// Nothing droppable
    Outside,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    Resolved(GameAction),
    /// Put the card back; the state was not touched
    Cancelled { card: InstanceId, restore: Position },
}

/// An in-progress drag of one card
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    card: InstanceId,
    source: Zone,
    origin: Position,
    grab_offset: Position,
    highlighted: Option<DropTarget>,
}

impl DragGesture {
    /// Begin dragging `card` out of `source`
    ///
    /// `origin` is the card's drawn position and `pointer` is where the
    /// press happened, both in container coordinates.
    pub fn drag_start(card: InstanceId, source: Zone, origin: Position, pointer: Position) -> Self {
        DragGesture {
            card,
            source,
            origin,
            grab_offset: pointer - origin,
            highlighted: None,
        }
    }

    pub fn card(&self) -> InstanceId {
        self.card
    }

    pub fn source(&self) -> Zone {
        self.source
    }

    pub fn highlighted(&self) -> Option<DropTarget> {
        self.highlighted
    }

    /// Where the card would land if released with the pointer at `pointer`
    pub fn landing(&self, pointer: Position) -> Position {
        pointer - self.grab_offset
    }

    /// Track the target under the pointer; returns whether dropping there
    /// would do anything
    pub fn drag_over(&mut self, target: DropTarget) -> bool {
        self.highlighted = Some(target);
        self.resolve(target).is_some()
    }

    pub fn drag_end(self, target: DropTarget) -> DragOutcome {
        match self.resolve(target) {
            Some(action) => DragOutcome::Resolved(action),
            None => DragOutcome::Cancelled {
                card: self.card,
                restore: self.origin,
            },
        }
    }

    fn resolve(&self, target: DropTarget) -> Option<GameAction> {
        let card = self.card;
        match (self.source, target) {
            (_, DropTarget::Outside) => None,

            (Zone::Hand, DropTarget::Battlefield(pointer)) => Some(GameAction::Play {
                card,
                position: Some(self.landing(pointer)),
            }),
            (Zone::Hand, DropTarget::Card(target)) => Some(GameAction::StackFromHand { card, target }),

            (Zone::Command, DropTarget::Battlefield(pointer)) => Some(GameAction::PlayFromCommand {
                card,
                position: Some(self.landing(pointer)),
            }),

            (Zone::Battlefield, DropTarget::Battlefield(pointer)) => {
                let position = self.landing(pointer);
                (position != self.origin).then_some(GameAction::MoveOnBattlefield { card, position })
            }
            (Zone::Battlefield, DropTarget::Card(target)) if target != card => {
                Some(GameAction::Stack {
                    child: card,
                    target,
                    position: None,
                })
            }
            (Zone::Battlefield, DropTarget::Zone(zone)) => match zone {
                Zone::Hand => Some(GameAction::ReturnToHand { card }),
                Zone::Graveyard => Some(GameAction::SendToGraveyard { card }),
                Zone::Exile => Some(GameAction::SendToExile { card }),
                Zone::Command => Some(GameAction::SendToCommand { card }),
                Zone::Library | Zone::Battlefield => None,
            },

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> InstanceId {
        InstanceId::new(n)
    }

    #[test]
    fn test_hand_to_battlefield_plays_at_drop_point() {
        let origin = Position::new(500.0, 600.0);
        let gesture = DragGesture::drag_start(id(1), Zone::Hand, origin, origin);
        let outcome = gesture.drag_end(DropTarget::Battlefield(Position::new(80.0, 90.0)));
        assert_eq!(
            outcome,
            DragOutcome::Resolved(GameAction::Play {
                card: id(1),
                position: Some(Position::new(80.0, 90.0)),
            })
        );
    }

    #[test]
    fn test_battlefield_drop_on_card_stacks() {
        let gesture = DragGesture::drag_start(id(1), Zone::Battlefield, Position::ORIGIN, Position::ORIGIN);
        assert!(matches!(
            gesture.drag_end(DropTarget::Card(id(2))),
            DragOutcome::Resolved(GameAction::Stack { child, target, .. }) if child == id(1) && target == id(2)
        ));
    }

    #[test]
    fn test_drop_back_at_origin_cancels() {
        let origin = Position::new(10.0, 10.0);
        let gesture = DragGesture::drag_start(id(1), Zone::Battlefield, origin, origin);
        assert_eq!(
            gesture.clone().drag_end(DropTarget::Battlefield(origin)),
            DragOutcome::Cancelled {
                card: id(1),
                restore: origin
            }
        );
        assert!(matches!(
            gesture.drag_end(DropTarget::Card(id(1))),
            DragOutcome::Cancelled { .. }
        ));
    }

    #[test]
    fn test_drag_over_is_advisory() {
        let mut gesture = DragGesture::drag_start(id(4), Zone::Hand, Position::ORIGIN, Position::ORIGIN);
        assert!(!gesture.drag_over(DropTarget::Zone(Zone::Graveyard)));
        assert!(gesture.drag_over(DropTarget::Card(id(2))));
        assert_eq!(gesture.highlighted(), Some(DropTarget::Card(id(2))));

        assert!(matches!(
            gesture.drag_end(DropTarget::Outside),
            DragOutcome::Cancelled { .. }
        ));
    }

    #[test]
    fn test_grab_offset_is_kept_on_move() {
        let origin = Position::new(100.0, 100.0);
        let gesture = DragGesture::drag_start(id(1), Zone::Battlefield, origin, Position::new(110.0, 110.0));

        assert_eq!(
            gesture.clone().drag_end(DropTarget::Battlefield(Position::new(210.0, 210.0))),
            DragOutcome::Resolved(GameAction::MoveOnBattlefield {
                card: id(1),
                position: Position::new(200.0, 200.0),
            })
        );
        // Released where it was grabbed: the card has not moved
        assert_eq!(
            gesture.drag_end(DropTarget::Battlefield(Position::new(110.0, 110.0))),
            DragOutcome::Cancelled {
                card: id(1),
                restore: origin
            }
        );
    }

    #[test]
    fn test_grab_offset_applies_to_plays() {
        let origin = Position::new(400.0, 700.0);
        let pointer = Position::new(430.0, 760.0);
        let drop = DropTarget::Battlefield(Position::new(130.0, 160.0));

        let from_hand = DragGesture::drag_start(id(2), Zone::Hand, origin, pointer);
        assert_eq!(
            from_hand.drag_end(drop),
            DragOutcome::Resolved(GameAction::Play {
                card: id(2),
                position: Some(Position::new(100.0, 100.0)),
            })
        );

        let from_command = DragGesture::drag_start(id(3), Zone::Command, origin, pointer);
        assert_eq!(
            from_command.drag_end(drop),
            DragOutcome::Resolved(GameAction::PlayFromCommand {
                card: id(3),
                position: Some(Position::new(100.0, 100.0)),
            })
        );
    }
}
