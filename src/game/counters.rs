//! Turn and life counters

use serde::{Deserialize, Serialize};

pub const DEFAULT_STARTING_LIFE: i32 = 40;

/// Turn number and life total for the single player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// Current turn, starting at 1
    pub turn: u32,

    /// Life total, never below 0
    pub life: i32,
}

impl Default for Counters {
    fn default() -> Self {
        Counters::new(DEFAULT_STARTING_LIFE)
    }
}

impl Counters {
    pub fn new(starting_life: i32) -> Self {
        Counters {
            turn: 1,
            life: starting_life.max(0),
        }
    }

    pub fn next_turn(&mut self) {
        self.turn = self.turn.saturating_add(1);
    }

    pub fn reset(&mut self, starting_life: i32) {
        *self = Counters::new(starting_life);
    }

    pub fn set_life(&mut self, life: i32) {
        self.life = life.max(0);
    }

    pub fn adjust_life(&mut self, delta: i32) {
        self.set_life(self.life.saturating_add(delta));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let counters = Counters::default();
        assert_eq!(counters.turn, 1);
        assert_eq!(counters.life, 40);
    }

    #[test]
    fn test_life_is_non_negative() {
        let mut counters = Counters::new(20);
        counters.adjust_life(-25);
        assert_eq!(counters.life, 0);

        counters.adjust_life(7);
        assert_eq!(counters.life, 7);

        counters.set_life(-3);
        assert_eq!(counters.life, 0);
    }

    #[test]
    fn test_turns_and_reset() {
        let mut counters = Counters::new(40);
        counters.next_turn();
        counters.next_turn();
        counters.adjust_life(-10);
        assert_eq!(counters.turn, 3);

        counters.reset(30);
        assert_eq!(counters, Counters::new(30));
        assert_eq!(counters.turn, 1);
    }
}
