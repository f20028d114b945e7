//! Deck definition loading (JSON and Forge .dck text)

use crate::core::CardRef;
use crate::zones::Zone;
use crate::{PlaymatError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Where a deck entry starts the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartZone {
    #[default]
    Library,
    Hand,
    BattlefieldFaceup,
    BattlefieldFacedown,
    Command,
    /// Not part of the session at all
    Sideboard,
}

impl StartZone {
    /// Zone the card is placed in, `None` for sideboard cards
    pub fn zone(&self) -> Option<Zone> {
        match self {
            StartZone::Library => Some(Zone::Library),
            StartZone::Hand => Some(Zone::Hand),
            StartZone::BattlefieldFaceup | StartZone::BattlefieldFacedown => Some(Zone::Battlefield),
            StartZone::Command => Some(Zone::Command),
            StartZone::Sideboard => None,
        }
    }

    pub fn is_facedown(&self) -> bool {
        matches!(self, StartZone::BattlefieldFacedown)
    }
}

fn one() -> u32 {
    1
}

/// One line of a deck definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: Arc<CardRef>,

    #[serde(default)]
    pub start_zone: StartZone,

    /// Number of copies; each copy becomes its own instance
    #[serde(default = "one")]
    pub count: u32,
}

impl DeckEntry {
    pub fn new(card: CardRef, start_zone: StartZone) -> Self {
        DeckEntry {
            card: Arc::new(card),
            start_zone,
            count: 1,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// The immutable description of which cards exist in a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckDefinition {
    #[serde(default)]
    pub name: String,

    #[serde(alias = "cards")]
    pub entries: Vec<DeckEntry>,
}

impl DeckDefinition {
    pub fn new(name: impl Into<String>, entries: Vec<DeckEntry>) -> Self {
        DeckDefinition {
            name: name.into(),
            entries,
        }
    }

    /// One item per card copy that takes part in the session, in deck order
    pub fn session_cards(&self) -> impl Iterator<Item = (&Arc<CardRef>, StartZone)> + '_ {
        self.entries
            .iter()
            .filter(|e| e.start_zone != StartZone::Sideboard)
            .flat_map(|e| std::iter::repeat((&e.card, e.start_zone)).take(e.count as usize))
    }

    /// Cards that take part in the session
    pub fn total_cards(&self) -> usize {
        self.session_cards().count()
    }

    pub fn sideboard_size(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.start_zone == StartZone::Sideboard)
            .map(|e| e.count as usize)
            .sum()
    }

    /// Expected number of cards per zone right after setup
    pub fn zone_counts(&self) -> [(Zone, usize); 6] {
        Zone::ALL.map(|zone| {
            let n = self
                .session_cards()
                .filter(|(_, start)| start.zone() == Some(zone))
                .count();
            (zone, n)
        })
    }
}

/// Deck loader for JSON definitions and .dck files
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck, choosing the parser from the file extension
    pub fn load_from_file(path: &Path) -> Result<DeckDefinition> {
        let content = fs::read_to_string(path)?;
        Self::parse_for_path(path, &content)
    }

    pub(crate) fn parse_for_path(path: &Path, content: &str) -> Result<DeckDefinition> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::parse_json(content)
        } else {
            let mut deck = Self::parse_dck(content)?;
            if deck.name.is_empty() {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    deck.name = stem.to_string();
                }
            }
            Ok(deck)
        }
    }

    pub fn parse_json(content: &str) -> Result<DeckDefinition> {
        let deck: DeckDefinition = serde_json::from_str(content)?;
        Self::validate(deck)
    }

    /// Parse a deck from .dck text
    ///
    /// Lines look like `4 Card Name` or `4 Card Name|SET`. `[Sideboard]` and
    /// `[Commander]` switch the start zone for the lines that follow; any
    /// other section header switches back to the library.
    pub fn parse_dck(content: &str) -> Result<DeckDefinition> {
        let mut name = String::new();
        let mut entries = Vec::new();
        let mut zone = StartZone::Library;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') {
                let section = line.trim_matches(|c| c == '[' || c == ']').to_lowercase();
                zone = match section.as_str() {
                    "sideboard" => StartZone::Sideboard,
                    "commander" => StartZone::Command,
                    _ => StartZone::Library,
                };
                continue;
            }
            if let Some(value) = line.strip_prefix("Name=") {
                name = value.trim().to_string();
                continue;
            }

            let Some((count_str, rest)) = line.split_once(' ') else {
                continue;
            };
            let Ok(count) = count_str.parse::<u32>() else {
                continue;
            };

            let (card_name, set) = match rest.split_once('|') {
                Some((name, set)) => (name.trim(), Some(set.trim())),
                None => (rest.trim(), None),
            };
            let mut card = CardRef::new(card_name);
            if let Some(set) = set {
                card.raw.insert("set".to_string(), serde_json::Value::from(set));
            }
            entries.push(DeckEntry::new(card, zone).with_count(count));
        }

        Self::validate(DeckDefinition::new(name, entries))
    }

    fn validate(deck: DeckDefinition) -> Result<DeckDefinition> {
        if deck.total_cards() == 0 {
            return Err(PlaymatError::InvalidDeckFormat("Empty deck".to_string()));
        }
        Ok(deck)
    }
}
