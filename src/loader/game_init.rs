//! Game initialization from a deck definition

use crate::config::PlaymatConfig;
use crate::core::{CardInstance, InstanceIdGenerator, Position};
use crate::game::GameState;
use crate::loader::DeckDefinition;
use crate::zones::Zone;
use rand::Rng;

/// Builds a fresh [`GameState`] from a deck definition
pub struct GameInitializer<'a> {
    deck: &'a DeckDefinition,
    config: &'a PlaymatConfig,
}

impl<'a> GameInitializer<'a> {
    pub fn new(deck: &'a DeckDefinition, config: &'a PlaymatConfig) -> Self {
        GameInitializer { deck, config }
    }

    /// Instantiate every session card once, place it in its start zone, then
    /// shuffle the library
    pub fn init_game(&self, ids: &mut InstanceIdGenerator, rng: &mut impl Rng) -> GameState {
        let mut game = GameState::new(self.config.starting_life);

        for (card, start) in self.deck.session_cards() {
            let Some(zone) = start.zone() else {
                continue;
            };
            let mut instance = CardInstance::new(ids.next_id(), card.clone());
            instance.facedown = start.is_facedown();

            let position = if zone == Zone::Battlefield {
                self.config.fallback_area.sample(rng)
            } else {
                Position::ORIGIN
            };
            game.zones.insert_new(instance, zone, position);
        }

        game.zones.library_mut().shuffle(rng);
        game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardRef;
    use crate::loader::{DeckEntry, StartZone};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn deck() -> DeckDefinition {
        DeckDefinition::new(
            "Test",
            vec![
                DeckEntry::new(CardRef::new("Forest"), StartZone::Library).with_count(10),
                DeckEntry::new(CardRef::new("Sol Ring"), StartZone::Hand),
                DeckEntry::new(CardRef::new("Morph"), StartZone::BattlefieldFacedown),
                DeckEntry::new(CardRef::new("Omnath"), StartZone::Command),
                DeckEntry::new(CardRef::new("Shock"), StartZone::Sideboard).with_count(4),
            ],
        )
    }

    #[test]
    fn test_init_places_cards_by_start_zone() {
        let deck = deck();
        let config = PlaymatConfig::default();
        let mut ids = InstanceIdGenerator::new();
        let mut rng = ChaCha12Rng::seed_from_u64(3);

        let game = GameInitializer::new(&deck, &config).init_game(&mut ids, &mut rng);

        assert_eq!(game.zones.library().len(), 10);
        assert_eq!(game.zones.hand().len(), 1);
        assert_eq!(game.zones.command().len(), 1);
        assert_eq!(game.zones.zone_len(Zone::Battlefield), 1);
        assert_eq!(ids.issued(), 13);
        assert_eq!(game.life(), 40);

        let entry = &game.zones.battlefield().entries()[0];
        assert!(entry.card.facedown);
        assert!(config.fallback_area.contains(entry.position));
    }

    #[test]
    fn test_duplicates_get_distinct_ids() {
        let deck = deck();
        let config = PlaymatConfig::default();
        let mut ids = InstanceIdGenerator::new();
        let mut rng = ChaCha12Rng::seed_from_u64(3);

        let game = GameInitializer::new(&deck, &config).init_game(&mut ids, &mut rng);

        let mut sorted = game.sorted_ids();
        sorted.dedup();
        assert_eq!(sorted.len(), 13);
    }
}
