//! Game zones (Library, Hand, Battlefield, Graveyard, Exile, Command)
//!
//! The [`ZoneStore`] owns every card instance of a session. Each instance
//! lives in exactly one place: one of the five card piles, a top-level
//! battlefield entry, or the stack of a battlefield entry.

use crate::core::{CardInstance, InstanceId, Position};
use crate::{PlaymatError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Different zones where cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Exile,
    Command,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::Library,
        Zone::Hand,
        Zone::Battlefield,
        Zone::Graveyard,
        Zone::Exile,
        Zone::Command,
    ];

    /// Piles receive new cards on top (index 0); Hand and Command append.
    pub fn is_pile(&self) -> bool {
        matches!(self, Zone::Library | Zone::Graveyard | Zone::Exile)
    }
}

/// Cards moved together (a host plus its stack children)
pub type CardBundle = SmallVec<[CardInstance; 4]>;

/// A zone holding plain card instances
///
/// For piles index 0 is the top card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardZone {
    /// Zone type
    pub zone_type: Zone,

    cards: Vec<CardInstance>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    /// Add a card following the zone's ordering convention
    pub fn add(&mut self, card: CardInstance) {
        if self.zone_type.is_pile() {
            self.add_to_top(card);
        } else {
            self.cards.push(card);
        }
    }

    pub fn add_to_top(&mut self, card: CardInstance) {
        self.cards.insert(0, card);
    }

    pub fn add_to_bottom(&mut self, card: CardInstance) {
        self.cards.push(card);
    }

    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        // Order-preserving
        let pos = self.position(id)?;
        Some(self.cards.remove(pos))
    }

    pub fn position(&self, id: InstanceId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Take the top card (front of the pile)
    pub fn draw_top(&mut self) -> Option<CardInstance> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<&CardInstance> {
        self.cards.first()
    }

    pub fn cards(&self) -> &[CardInstance] {
        &self.cards
    }

    pub fn ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.cards.iter().map(|c| c.id)
    }

    /// Shuffle the zone (for Library)
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        crate::game::library::shuffle(&mut self.cards, rng);
    }
}

/// A top-level card on the battlefield with its (single level) stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlefieldEntry {
    pub card: CardInstance,

    pub position: Position,

    /// Stacked children, top-most last
    pub stack: CardBundle,
}

impl BattlefieldEntry {
    pub fn new(card: CardInstance, position: Position) -> Self {
        BattlefieldEntry {
            card,
            position,
            stack: SmallVec::new(),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.card.id
    }

    pub fn has_stack(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Host followed by its children
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        std::iter::once(&self.card).chain(self.stack.iter())
    }

    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut CardInstance> {
        std::iter::once(&mut self.card).chain(self.stack.iter_mut())
    }

    fn into_bundle(self) -> CardBundle {
        let mut bundle = CardBundle::new();
        bundle.push(self.card);
        bundle.extend(self.stack);
        bundle
    }
}

/// The battlefield: an insertion-ordered list of entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Battlefield {
    entries: Vec<BattlefieldEntry>,
}

impl Battlefield {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[BattlefieldEntry] {
        &self.entries
    }

    /// Top-level entry whose host card is `id`
    pub fn entry(&self, id: InstanceId) -> Option<&BattlefieldEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn entry_mut(&mut self, id: InstanceId) -> Option<&mut BattlefieldEntry> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    pub(crate) fn entry_index(&self, id: InstanceId) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    /// Host that `child` is stacked under, if any
    pub fn host_of(&self, child: InstanceId) -> Option<InstanceId> {
        self.entries
            .iter()
            .find(|e| e.stack.iter().any(|c| c.id == child))
            .map(BattlefieldEntry::id)
    }

    /// Any battlefield card, host or stack child
    pub fn card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.entries.iter().flat_map(|e| e.cards()).find(|c| c.id == id)
    }

    pub fn card_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.entries
            .iter_mut()
            .flat_map(|e| e.cards_mut())
            .find(|c| c.id == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.card(id).is_some()
    }

    /// Number of top-level entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cards including stack children
    pub fn card_count(&self) -> usize {
        self.entries.iter().map(|e| 1 + e.stack.len()).sum()
    }

    pub fn ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.entries.iter().flat_map(|e| e.cards()).map(|c| c.id)
    }

    pub(crate) fn push(&mut self, entry: BattlefieldEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn insert(&mut self, index: usize, entry: BattlefieldEntry) {
        let idx = index.min(self.entries.len());
        self.entries.insert(idx, entry);
    }

    pub(crate) fn take_entry(&mut self, id: InstanceId) -> Option<BattlefieldEntry> {
        let idx = self.entry_index(id)?;
        Some(self.entries.remove(idx))
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [BattlefieldEntry] {
        &mut self.entries
    }
}

/// Where a card currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub zone: Zone,

    /// For battlefield cards, the host they are stacked under
    pub stacked_under: Option<InstanceId>,
}

/// All six zones of a single-player session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneStore {
    library: CardZone,
    hand: CardZone,
    battlefield: Battlefield,
    graveyard: CardZone,
    exile: CardZone,
    command: CardZone,
}

impl Default for ZoneStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneStore {
    pub fn new() -> Self {
        ZoneStore {
            library: CardZone::new(Zone::Library),
            hand: CardZone::new(Zone::Hand),
            battlefield: Battlefield::new(),
            graveyard: CardZone::new(Zone::Graveyard),
            exile: CardZone::new(Zone::Exile),
            command: CardZone::new(Zone::Command),
        }
    }

    pub fn library(&self) -> &CardZone {
        &self.library
    }

    pub fn hand(&self) -> &CardZone {
        &self.hand
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn graveyard(&self) -> &CardZone {
        &self.graveyard
    }

    pub fn exile(&self) -> &CardZone {
        &self.exile
    }

    pub fn command(&self) -> &CardZone {
        &self.command
    }

    pub(crate) fn library_mut(&mut self) -> &mut CardZone {
        &mut self.library
    }

    pub(crate) fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.battlefield
    }

    /// Card pile for `zone`; `None` for the battlefield
    pub fn get_zone(&self, zone: Zone) -> Option<&CardZone> {
        match zone {
            Zone::Library => Some(&self.library),
            Zone::Hand => Some(&self.hand),
            Zone::Graveyard => Some(&self.graveyard),
            Zone::Exile => Some(&self.exile),
            Zone::Command => Some(&self.command),
            Zone::Battlefield => None,
        }
    }

    pub(crate) fn get_zone_mut(&mut self, zone: Zone) -> Option<&mut CardZone> {
        match zone {
            Zone::Library => Some(&mut self.library),
            Zone::Hand => Some(&mut self.hand),
            Zone::Graveyard => Some(&mut self.graveyard),
            Zone::Exile => Some(&mut self.exile),
            Zone::Command => Some(&mut self.command),
            Zone::Battlefield => None,
        }
    }

    /// Number of cards in `zone`, counting stack children on the battlefield
    pub fn zone_len(&self, zone: Zone) -> usize {
        match self.get_zone(zone) {
            Some(pile) => pile.len(),
            None => self.battlefield.card_count(),
        }
    }

    pub fn total_cards(&self) -> usize {
        Zone::ALL.iter().map(|&z| self.zone_len(z)).sum()
    }

    /// Every instance id in the store, zone by zone
    pub fn instance_ids(&self) -> Vec<InstanceId> {
        let mut ids = Vec::with_capacity(self.total_cards());
        for zone in Zone::ALL {
            match self.get_zone(zone) {
                Some(pile) => ids.extend(pile.ids()),
                None => ids.extend(self.battlefield.ids()),
            }
        }
        ids
    }

    pub fn locate(&self, id: InstanceId) -> Option<Location> {
        if self.battlefield.entry(id).is_some() {
            return Some(Location {
                zone: Zone::Battlefield,
                stacked_under: None,
            });
        }
        if let Some(host) = self.battlefield.host_of(id) {
            return Some(Location {
                zone: Zone::Battlefield,
                stacked_under: Some(host),
            });
        }
        Zone::ALL
            .iter()
            .filter_map(|&z| self.get_zone(z))
            .find(|pile| pile.contains(id))
            .map(|pile| Location {
                zone: pile.zone_type,
                stacked_under: None,
            })
    }

    /// Seed a card directly into a zone (deck setup only)
    pub(crate) fn insert_new(&mut self, card: CardInstance, zone: Zone, position: Position) {
        match self.get_zone_mut(zone) {
            Some(pile) => pile.add_to_bottom(card),
            None => self.battlefield.push(BattlefieldEntry::new(card, position)),
        }
    }

    /// Move a card from one zone to another
    ///
    /// A battlefield host brings its stack children along. Cards entering
    /// the battlefield this way land at the origin; use
    /// [`ZoneStore::place_on_battlefield`] to choose the spot.
    pub fn move_card(&mut self, id: InstanceId, from: Zone, to: Zone) -> Result<()> {
        if from == to {
            return if self.zone_contains_top_level(id, from) {
                Ok(())
            } else {
                Err(PlaymatError::not_found(id, from))
            };
        }
        let bundle = self.take(id, from)?;
        self.put(bundle, to, Position::ORIGIN);
        Ok(())
    }

    /// Move a card onto the battlefield as a new entry at `position`
    pub fn place_on_battlefield(
        &mut self,
        id: InstanceId,
        from: Zone,
        position: Position,
    ) -> Result<()> {
        if from == Zone::Battlefield {
            return Err(PlaymatError::invariant(format!(
                "card {id} is already on the battlefield"
            )));
        }
        let bundle = self.take(id, from)?;
        self.put(bundle, Zone::Battlefield, position);
        Ok(())
    }

    fn zone_contains_top_level(&self, id: InstanceId, zone: Zone) -> bool {
        match self.get_zone(zone) {
            Some(pile) => pile.contains(id),
            None => self.battlefield.entry(id).is_some(),
        }
    }

    /// Remove a card (and, for battlefield hosts, its stack) from `from`.
    ///
    /// Fails without touching anything if the card is not there as a
    /// movable unit.
    fn take(&mut self, id: InstanceId, from: Zone) -> Result<CardBundle> {
        match self.get_zone_mut(from) {
            Some(pile) => {
                let card = pile.remove(id).ok_or_else(|| PlaymatError::not_found(id, from))?;
                let mut bundle = CardBundle::new();
                bundle.push(card);
                Ok(bundle)
            }
            None => {
                if let Some(host) = self.battlefield.host_of(id) {
                    return Err(PlaymatError::invariant(format!(
                        "card {id} is stacked under {host}; unstack it first"
                    )));
                }
                self.battlefield
                    .take_entry(id)
                    .map(BattlefieldEntry::into_bundle)
                    .ok_or_else(|| PlaymatError::not_found(id, from))
            }
        }
    }

    /// Insert cards into `to`; cannot fail once `take` succeeded.
    fn put(&mut self, bundle: CardBundle, to: Zone, position: Position) {
        let cleared = bundle.into_iter().map(|mut card| {
            card.clear_battlefield_state();
            card
        });
        match self.get_zone_mut(to) {
            Some(pile) if to.is_pile() => {
                // Keep the host above its former children
                let cards: Vec<_> = cleared.collect();
                for card in cards.into_iter().rev() {
                    pile.add_to_top(card);
                }
            }
            Some(pile) => cleared.for_each(|card| pile.add(card)),
            None => {
                for card in cleared {
                    self.battlefield.push(BattlefieldEntry::new(card, position));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardRef;
    use std::sync::Arc;

    fn card(id: u32) -> CardInstance {
        CardInstance::new(InstanceId::new(id), Arc::new(CardRef::new(format!("Card {id}"))))
    }

    fn store_with_library(ids: &[u32]) -> ZoneStore {
        let mut store = ZoneStore::new();
        for &id in ids {
            store.insert_new(card(id), Zone::Library, Position::ORIGIN);
        }
        store
    }

    #[test]
    fn test_card_zone() {
        let mut zone = CardZone::new(Zone::Hand);
        assert!(zone.is_empty());

        zone.add(card(10));
        zone.add(card(11));

        assert_eq!(zone.len(), 2);
        assert!(zone.contains(InstanceId::new(10)));
        assert_eq!(zone.ids().collect::<Vec<_>>(), vec![InstanceId::new(10), InstanceId::new(11)]);

        assert!(zone.remove(InstanceId::new(10)).is_some());
        assert!(zone.remove(InstanceId::new(10)).is_none());
        assert_eq!(zone.len(), 1);
    }

    #[test]
    fn test_pile_operations() {
        let mut graveyard = CardZone::new(Zone::Graveyard);
        graveyard.add(card(1));
        graveyard.add(card(2));

        assert_eq!(graveyard.peek_top().map(|c| c.id), Some(InstanceId::new(2)));
        assert_eq!(graveyard.draw_top().map(|c| c.id), Some(InstanceId::new(2)));
        assert_eq!(graveyard.draw_top().map(|c| c.id), Some(InstanceId::new(1)));
        assert!(graveyard.draw_top().is_none());
    }

    #[test]
    fn test_move_card_between_piles() {
        let mut store = store_with_library(&[1, 2, 3]);

        store.move_card(InstanceId::new(2), Zone::Library, Zone::Hand).unwrap();

        assert_eq!(store.library().len(), 2);
        assert!(store.hand().contains(InstanceId::new(2)));
        assert_eq!(store.locate(InstanceId::new(2)).map(|l| l.zone), Some(Zone::Hand));
    }

    #[test]
    fn test_move_missing_card_leaves_state_unchanged() {
        let mut store = store_with_library(&[1, 2]);
        let before = store.clone();

        let err = store.move_card(InstanceId::new(9), Zone::Hand, Zone::Graveyard).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store, before);
    }

    #[test]
    fn test_same_zone_move_is_noop() {
        let mut store = store_with_library(&[1]);
        let before = store.clone();

        store.move_card(InstanceId::new(1), Zone::Library, Zone::Library).unwrap();
        assert_eq!(store, before);
        assert!(store.move_card(InstanceId::new(5), Zone::Library, Zone::Library).is_err());
    }

    #[test]
    fn test_host_moves_with_children() {
        let mut store = ZoneStore::new();
        let mut entry = BattlefieldEntry::new(card(1), Position::new(10.0, 10.0));
        let mut child = card(2);
        child.tapped = true;
        entry.stack.push(child);
        store.battlefield_mut().push(entry);

        store.move_card(InstanceId::new(1), Zone::Battlefield, Zone::Graveyard).unwrap();

        assert!(store.battlefield().is_empty());
        let ids: Vec<_> = store.graveyard().ids().collect();
        assert_eq!(ids, vec![InstanceId::new(1), InstanceId::new(2)]);
        assert!(store.graveyard().cards().iter().all(|c| !c.tapped));
    }

    #[test]
    fn test_stack_child_cannot_leave_directly() {
        let mut store = ZoneStore::new();
        let mut entry = BattlefieldEntry::new(card(1), Position::ORIGIN);
        entry.stack.push(card(2));
        store.battlefield_mut().push(entry);
        let before = store.clone();

        let err = store.move_card(InstanceId::new(2), Zone::Battlefield, Zone::Hand).unwrap_err();

        assert!(err.is_invariant_violation());
        assert_eq!(store, before);
        assert_eq!(
            store.locate(InstanceId::new(2)),
            Some(Location {
                zone: Zone::Battlefield,
                stacked_under: Some(InstanceId::new(1)),
            })
        );
    }

    #[test]
    fn test_place_on_battlefield() {
        let mut store = store_with_library(&[1]);
        store.move_card(InstanceId::new(1), Zone::Library, Zone::Hand).unwrap();

        store
            .place_on_battlefield(InstanceId::new(1), Zone::Hand, Position::new(10.0, 20.0))
            .unwrap();

        let entry = store.battlefield().entry(InstanceId::new(1)).unwrap();
        assert_eq!(entry.position, Position::new(10.0, 20.0));
        assert!(!entry.has_stack());
        assert_eq!(store.zone_len(Zone::Battlefield), 1);
        assert_eq!(store.total_cards(), 1);
    }
}
