//! Fanned hand layout
//!
//! Pure geometry: given how many cards are in hand and the size of the hand
//! container, compute where each card goes. Larger hands get smaller cards
//! and tighter overlap so the whole hand always fits; a quadratic arc lifts
//! the middle of the hand and a linear rotation fans the edges out.
//!
//! Coordinates are container pixels. `x` is the horizontal centre of the
//! card, `y` its top edge.

use crate::core::InstanceId;
use serde::{Deserialize, Serialize};

/// One row of the crowding table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeBucket {
    /// Largest hand size this bucket applies to
    pub max_cards: usize,
    pub scale: f32,
    /// Fraction of the card width between neighbouring card centres
    pub overlap: f32,
}

impl SizeBucket {
    pub const fn new(max_cards: usize, scale: f32, overlap: f32) -> Self {
        SizeBucket {
            max_cards,
            scale,
            overlap,
        }
    }
}

pub const DEFAULT_BUCKETS: [SizeBucket; 8] = [
    SizeBucket::new(7, 1.0, 0.7),
    SizeBucket::new(10, 0.95, 0.6),
    SizeBucket::new(15, 0.9, 0.5),
    SizeBucket::new(20, 0.85, 0.4),
    SizeBucket::new(25, 0.8, 0.35),
    SizeBucket::new(30, 0.75, 0.3),
    SizeBucket::new(35, 0.7, 0.25),
    SizeBucket::new(40, 0.65, 0.2),
];

/// Tunables for the hand fan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandLayoutConfig {
    pub base_card_width: f32,
    pub base_card_height: f32,
    /// Horizontal margin kept free on each side of the container
    pub side_margin: f32,
    pub bottom_padding: f32,
    /// Arc height of the middle card at scale 1.0
    pub max_lift: f32,
    /// Rotation of the outermost cards at scale 1.0
    pub max_rotation: f32,
    pub hover_lift: f32,
    pub hover_scale: f32,
    /// Crowding table, ascending by `max_cards`; hands past the last row use it
    pub buckets: Vec<SizeBucket>,
}

impl Default for HandLayoutConfig {
    fn default() -> Self {
        HandLayoutConfig {
            base_card_width: 120.0,
            base_card_height: 168.0,
            side_margin: 40.0,
            bottom_padding: 20.0,
            max_lift: 40.0,
            max_rotation: 15.0,
            hover_lift: 40.0,
            hover_scale: 1.2,
            buckets: DEFAULT_BUCKETS.to_vec(),
        }
    }
}

/// Geometry for one hand slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardPose {
    pub x: f32,
    pub y: f32,
    pub rotation_degrees: f32,
    pub scale: f32,
    /// Higher draws on top
    pub z_index: i32,
    pub hovered: bool,
}

/// A slot pose bound to the card occupying it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandPose {
    pub card_id: InstanceId,
    #[serde(flatten)]
    pub pose: CardPose,
}

impl HandLayoutConfig {
    /// Crowding bucket for a hand of `n` cards
    pub fn bucket(&self, n: usize) -> SizeBucket {
        self.buckets
            .iter()
            .find(|b| n <= b.max_cards)
            .or_else(|| self.buckets.last())
            .copied()
            .unwrap_or(DEFAULT_BUCKETS[0])
    }

    /// Poses for a hand of `n` cards in a `width` x `height` container
    ///
    /// `hovered` is the index of the card under the pointer, if any.
    pub fn layout(&self, n: usize, width: f32, height: f32, hovered: Option<usize>) -> Vec<CardPose> {
        if n == 0 {
            return Vec::new();
        }

        let bucket = self.bucket(n);
        let card_width = self.base_card_width * bucket.scale;
        let card_height = self.base_card_height * bucket.scale;
        let available = (width - 2.0 * self.side_margin).max(0.0);

        let gaps = (n - 1) as f32;
        let mut spacing = card_width * bucket.overlap;
        if n > 1 {
            spacing = spacing.min(available / gaps);
        }
        let start_x = (width - spacing * gaps) / 2.0;

        let middle = gaps / 2.0;
        let reach = middle.max(1.0);
        let max_lift = (self.max_lift * bucket.scale).min(self.max_lift);
        let max_rotation = self.max_rotation.min(self.max_rotation * bucket.scale);
        let curvature = max_lift / (reach * reach);

        (0..n)
            .map(|i| {
                let offset = i as f32 - middle;
                let lift = max_lift - curvature * offset * offset;
                let mut pose = CardPose {
                    x: start_x + i as f32 * spacing,
                    y: height - card_height - self.bottom_padding - lift,
                    rotation_degrees: max_rotation * offset / reach,
                    scale: bucket.scale,
                    z_index: fan_z_index(i, n),
                    hovered: false,
                };
                if hovered == Some(i) {
                    pose.y -= self.hover_lift;
                    pose.scale *= self.hover_scale;
                    pose.z_index = n as i32 + 1;
                    pose.hovered = true;
                }
                pose
            })
            .collect()
    }

    /// Lay out the given hand, in hand order
    pub fn layout_hand(
        &self,
        cards: &[InstanceId],
        width: f32,
        height: f32,
        hovered: Option<InstanceId>,
    ) -> Vec<HandPose> {
        let hovered_idx = hovered.and_then(|h| cards.iter().position(|&c| c == h));
        self.layout(cards.len(), width, height, hovered_idx)
            .into_iter()
            .zip(cards)
            .map(|(pose, &card_id)| HandPose { card_id, pose })
            .collect()
    }
}

/// Centre cards above edge cards, symmetric for even hands too
fn fan_z_index(i: usize, n: usize) -> i32 {
    let distance = (2 * i as i64 - (n as i64 - 1)).abs();
    n as i32 - distance as i32
}

/// [`HandLayoutConfig::layout`] with the default tunables
pub fn layout(n: usize, width: f32, height: f32, hovered: Option<usize>) -> Vec<CardPose> {
    HandLayoutConfig::default().layout(n, width, height, hovered)
}
