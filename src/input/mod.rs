//! UI boundary adapters
//!
//! Neither adapter touches `GameState`. The drag gesture resolves pointer
//! events into a single [`GameAction`](crate::game::GameAction) for the
//! coordinator, and the hover preview only publishes which card to enlarge.

pub mod drag;
pub mod preview;

pub use drag::{DragGesture, DragOutcome, DropTarget};
pub use preview::HoverPreview;
