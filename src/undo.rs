//! Undo history for committed playmat transitions
//!
//! Every committed action is journaled together with the state it replaced.
//! Undo is a plain state swap; the RNG and the id generator keep moving
//! forward, so an undone `Restart` never hands out an id twice.

use crate::game::{GameAction, GameState};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One committed transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: GameAction,

    /// State immediately before `action` was applied
    pub before: GameState,
}

/// Bounded journal of committed transitions (most recent at the back)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionHistory {
    entries: VecDeque<HistoryEntry>,

    /// Maximum number of entries kept; 0 disables recording
    limit: usize,
}

impl ActionHistory {
    pub fn new(limit: usize) -> Self {
        ActionHistory {
            entries: VecDeque::with_capacity(limit.min(256)),
            limit,
        }
    }

    /// Create a disabled history
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    /// Record a committed action, evicting the oldest entry when full
    pub fn record(&mut self, action: GameAction, before: GameState) {
        if !self.is_enabled() {
            return;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry { action, before });
    }

    /// Get the most recent entry without removing it
    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Pop and return the most recent entry
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Committed actions, oldest first
    pub fn actions(&self) -> impl Iterator<Item = &GameAction> {
        self.entries.iter().map(|e| &e.action)
    }
}

impl Default for ActionHistory {
    fn default() -> Self {
        Self::new(64)
    }
}
