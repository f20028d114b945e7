//! Card metadata and per-game card instances

use crate::core::{CardName, InstanceId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

/// Image variants offered by the card-data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Small,
    Normal,
    Large,
    Png,
    ArtCrop,
    BorderCrop,
}

/// Image references for one card face
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUris {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art_crop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_crop: Option<String>,
}

impl ImageUris {
    pub fn get(&self, size: ImageSize) -> Option<&str> {
        let uri = match size {
            ImageSize::Small => &self.small,
            ImageSize::Normal => &self.normal,
            ImageSize::Large => &self.large,
            ImageSize::Png => &self.png,
            ImageSize::ArtCrop => &self.art_crop,
            ImageSize::BorderCrop => &self.border_crop,
        };
        uri.as_deref()
    }
}

/// One face of a multi-faced card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
}

/// Immutable card metadata, as supplied by the card-data collaborator
///
/// The engine treats everything here as opaque passthrough for the renderer.
/// Fields it does not know about are kept in `raw` so nothing is lost when a
/// snapshot is serialized back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRef {
    /// External card id (not unique per copy)
    #[serde(default)]
    pub id: String,

    /// Card name (e.g., "Lightning Bolt")
    pub name: CardName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,

    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub card_faces: SmallVec<[CardFace; 2]>,

    /// Everything else the provider sent
    #[serde(flatten)]
    pub raw: serde_json::Map<String, serde_json::Value>,
}

impl CardRef {
    pub fn new(name: impl Into<CardName>) -> Self {
        CardRef {
            id: String::new(),
            name: name.into(),
            type_line: None,
            mana_cost: None,
            oracle_text: None,
            power: None,
            toughness: None,
            image_uris: None,
            card_faces: SmallVec::new(),
            raw: serde_json::Map::new(),
        }
    }

    pub fn with_type_line(mut self, type_line: impl Into<String>) -> Self {
        self.type_line = Some(type_line.into());
        self
    }

    /// Image for the front of the card, falling back to the first face
    pub fn image_url(&self, size: ImageSize) -> Option<&str> {
        self.image_uris
            .as_ref()
            .and_then(|uris| uris.get(size))
            .or_else(|| {
                self.card_faces
                    .first()
                    .and_then(|face| face.image_uris.as_ref())
                    .and_then(|uris| uris.get(size))
            })
    }

    /// Case-insensitive type line containment (e.g. "land", "creature")
    pub fn has_type(&self, word: &str) -> bool {
        self.type_line
            .as_deref()
            .map(|line| line.to_lowercase().contains(&word.to_lowercase()))
            .unwrap_or(false)
    }
}

/// One physical copy of a card during a session
///
/// Many instances can share the same `CardRef`. `tapped`, `facedown` and
/// `counters` only mean something on the battlefield and are reset whenever
/// the instance leaves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this card instance
    pub id: InstanceId,

    /// Shared card metadata
    pub card: Arc<CardRef>,

    pub tapped: bool,

    pub facedown: bool,

    /// Generic counters (the playmat does not distinguish counter kinds)
    pub counters: u32,
}

impl CardInstance {
    pub fn new(id: InstanceId, card: Arc<CardRef>) -> Self {
        CardInstance {
            id,
            card,
            tapped: false,
            facedown: false,
            counters: 0,
        }
    }

    pub fn name(&self) -> &str {
        self.card.name.as_str()
    }

    pub fn add_counter(&mut self) {
        self.counters = self.counters.saturating_add(1);
    }

    /// Remove one counter; returns false if there were none
    pub fn remove_counter(&mut self) -> bool {
        if self.counters == 0 {
            return false;
        }
        self.counters -= 1;
        true
    }

    /// Drop everything that only exists on the battlefield
    pub fn clear_battlefield_state(&mut self) {
        self.tapped = false;
        self.facedown = false;
        self.counters = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolt() -> Arc<CardRef> {
        Arc::new(CardRef::new("Lightning Bolt").with_type_line("Instant"))
    }

    #[test]
    fn test_instance_creation() {
        let card = CardInstance::new(InstanceId::new(1), bolt());

        assert_eq!(card.id, InstanceId::new(1));
        assert_eq!(card.name(), "Lightning Bolt");
        assert!(!card.tapped);
        assert!(!card.facedown);
        assert_eq!(card.counters, 0);
    }

    #[test]
    fn test_counters_never_negative() {
        let mut card = CardInstance::new(InstanceId::new(1), bolt());
        assert!(!card.remove_counter());

        card.add_counter();
        card.add_counter();
        assert!(card.remove_counter());
        assert_eq!(card.counters, 1);
    }

    #[test]
    fn test_clear_battlefield_state() {
        let mut card = CardInstance::new(InstanceId::new(1), bolt());
        card.tapped = true;
        card.facedown = true;
        card.add_counter();

        card.clear_battlefield_state();
        assert!(!card.tapped);
        assert!(!card.facedown);
        assert_eq!(card.counters, 0);
    }

    #[test]
    fn test_has_type_is_case_insensitive() {
        let card = CardRef::new("Forest").with_type_line("Basic Land - Forest");
        assert!(card.has_type("land"));
        assert!(card.has_type("LAND"));
        assert!(!card.has_type("creature"));
        assert!(!CardRef::new("Mystery").has_type("land"));
    }

    #[test]
    fn test_image_falls_back_to_first_face() {
        let json = r#"{
            "id": "abc",
            "name": "Delver of Secrets",
            "card_faces": [
                {"name": "Delver of Secrets", "image_uris": {"normal": "front.jpg"}},
                {"name": "Insectile Aberration", "image_uris": {"normal": "back.jpg"}}
            ],
            "rarity": "common"
        }"#;
        let card: CardRef = serde_json::from_str(json).unwrap();

        assert_eq!(card.image_url(ImageSize::Normal), Some("front.jpg"));
        assert_eq!(card.image_url(ImageSize::ArtCrop), None);
        assert_eq!(card.raw.get("rarity").and_then(|v| v.as_str()), Some("common"));
    }
}
