//! Main game state structure

use crate::core::InstanceId;
use crate::game::Counters;
use crate::zones::{Zone, ZoneStore};
use serde::{Deserialize, Serialize};

/// Complete state of one playmat session
///
/// Only mutated through the named operations in [`crate::game::actions`].
/// Cheap enough to clone that the coordinator applies every intent to a copy
/// and swaps it in on success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub zones: ZoneStore,

    pub counters: Counters,
}

impl GameState {
    pub fn new(starting_life: i32) -> Self {
        GameState {
            zones: ZoneStore::new(),
            counters: Counters::new(starting_life),
        }
    }

    pub fn turn(&self) -> u32 {
        self.counters.turn
    }

    pub fn life(&self) -> i32 {
        self.counters.life
    }

    /// Card counts per zone, in [`Zone::ALL`] order
    pub fn zone_sizes(&self) -> [(Zone, usize); 6] {
        Zone::ALL.map(|zone| (zone, self.zones.zone_len(zone)))
    }

    /// All instance ids, sorted
    pub fn sorted_ids(&self) -> Vec<InstanceId> {
        let mut ids = self.zones.instance_ids();
        ids.sort_unstable();
        ids
    }
}
