//! Deck definition loaders and session setup
//!
//! Decks come in as JSON definitions or Forge `.dck` text.

pub mod deck;
pub mod deck_async;
pub mod game_init;

pub use deck::{DeckDefinition, DeckEntry, DeckLoader, StartZone};
pub use deck_async::load_from_file_async;
pub use game_init::GameInitializer;
