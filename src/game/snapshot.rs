//! Render snapshots: the read-only view handed to the renderer
//!
//! A snapshot copies out all six zones and the current hand poses. It holds
//! no references into the session, so it can be serialized or sent to
//! another thread freely.

use crate::core::{CardInstance, InstanceId};
use crate::game::GameState;
use crate::layout::{HandLayoutConfig, HandPose};
use crate::zones::BattlefieldEntry;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Size of the hand container and which card (if any) the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandView {
    pub width: f32,
    pub height: f32,
    pub hovered: Option<InstanceId>,
}

impl HandView {
    pub fn new(width: f32, height: f32) -> Self {
        HandView {
            width,
            height,
            hovered: None,
        }
    }

    pub fn with_hovered(mut self, hovered: Option<InstanceId>) -> Self {
        self.hovered = hovered;
        self
    }
}

impl Default for HandView {
    fn default() -> Self {
        HandView::new(1200.0, 300.0)
    }
}

/// Everything the renderer needs after a transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub turn: u32,
    pub life: i32,

    /// Library, top card first
    pub library: Vec<CardInstance>,
    pub hand: Vec<CardInstance>,
    pub battlefield: Vec<BattlefieldEntry>,
    /// Graveyard, most recent first
    pub graveyard: Vec<CardInstance>,
    pub exile: Vec<CardInstance>,
    pub command: Vec<CardInstance>,

    /// One pose per hand card, in hand order
    pub hand_poses: Vec<HandPose>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, layout: &HandLayoutConfig, view: &HandView) -> Self {
        let zones = &state.zones;
        let hand_ids: Vec<InstanceId> = zones.hand().ids().collect();

        RenderSnapshot {
            turn: state.turn(),
            life: state.life(),
            library: zones.library().cards().to_vec(),
            hand: zones.hand().cards().to_vec(),
            battlefield: zones.battlefield().entries().to_vec(),
            graveyard: zones.graveyard().cards().to_vec(),
            exile: zones.exile().cards().to_vec(),
            command: zones.command().cards().to_vec(),
            hand_poses: layout.layout_hand(&hand_ids, view.width, view.height, view.hovered),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Number of cards in the snapshot, stack children included
    pub fn card_count(&self) -> usize {
        self.library.len()
            + self.hand.len()
            + self.battlefield.iter().map(|e| 1 + e.stack.len()).sum::<usize>()
            + self.graveyard.len()
            + self.exile.len()
            + self.command.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardRef, Position};
    use crate::zones::Zone;
    use std::sync::Arc;

    fn state() -> GameState {
        let mut state = GameState::new(40);
        for n in 0..3 {
            let card = CardInstance::new(InstanceId::new(n), Arc::new(CardRef::new(format!("Card {n}"))));
            state.zones.insert_new(card, Zone::Hand, Position::ORIGIN);
        }
        state
    }

    #[test]
    fn test_capture_lays_out_hand() {
        let state = state();
        let view = HandView::new(1000.0, 300.0).with_hovered(Some(InstanceId::new(1)));

        let snapshot = RenderSnapshot::capture(&state, &HandLayoutConfig::default(), &view);

        assert_eq!(snapshot.hand.len(), 3);
        assert_eq!(snapshot.hand_poses.len(), 3);
        assert_eq!(snapshot.hand_poses[1].card_id, InstanceId::new(1));
        assert!(snapshot.hand_poses[1].pose.hovered);
        assert_eq!(snapshot.card_count(), 3);
    }

    #[test]
    fn test_save_and_load() {
        let state = state();
        let snapshot = RenderSnapshot::capture(&state, &HandLayoutConfig::default(), &HandView::default());

        let path = std::env::temp_dir().join(format!("playmat_snapshot_{}.json", std::process::id()));
        snapshot.save_to_file(&path).unwrap();
        let loaded = RenderSnapshot::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        similar_asserts::assert_eq!(loaded, snapshot);
    }
}
