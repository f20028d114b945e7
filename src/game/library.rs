//! Library shuffling and drawing

use crate::core::CardInstance;
use crate::zones::CardZone;
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform in-place Fisher–Yates shuffle
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [CardInstance], rng: &mut R) {
    cards.shuffle(rng);
}

/// Take the front-most card of the library
///
/// Drawing never reorders the rest of the library.
pub fn draw(library: &mut CardZone) -> Option<CardInstance> {
    library.draw_top()
}
