//! MTG Playmat - single-player virtual tabletop engine
//!
//! Tracks a game in progress against one loaded deck: the six zones, card
//! state on the battlefield, one-level card stacks, shuffling and drawing,
//! and the fanned hand layout. Every change goes through a [`GameAction`]
//! applied by the [`Playmat`] coordinator, which commits it atomically.
//!
//! ```
//! use mtg_playmat_rs::{CardRef, DeckDefinition, DeckEntry, GameAction, Playmat, PlaymatConfig, StartZone};
//!
//! let deck = DeckDefinition::new(
//!     "Islands",
//!     vec![DeckEntry::new(CardRef::new("Island"), StartZone::Library).with_count(10)],
//! );
//! let mut playmat = Playmat::with_seed(deck, PlaymatConfig::default(), 1);
//! playmat.logger_mut().enable_capture();
//!
//! playmat.apply(GameAction::Draw).unwrap();
//! assert_eq!(playmat.state().zones.hand().len(), 1);
//! assert_eq!(playmat.state().zones.library().len(), 9);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod input;
pub mod layout;
pub mod loader;
pub mod undo;
pub mod zones;

pub use config::PlaymatConfig;
pub use crate::core::{CardInstance, CardRef, InstanceId, Position, Rect};
pub use error::{PlaymatError, Result};
pub use game::{GameAction, GameState, Playmat};
pub use layout::{CardPose, HandLayoutConfig, HandPose};
pub use loader::{DeckDefinition, DeckEntry, DeckLoader, StartZone};
pub use zones::Zone;
