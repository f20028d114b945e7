//! Core playmat types: card metadata, instances and identity

pub mod card;
pub mod entity;
pub mod types;

pub use card::{CardFace, CardInstance, CardRef, ImageSize, ImageUris};
pub use entity::{InstanceId, InstanceIdGenerator};
pub use types::{CardName, Position, Rect};
