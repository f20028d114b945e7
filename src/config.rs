//! Session configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```
//! use mtg_playmat_rs::PlaymatConfig;
//!
//! let config = PlaymatConfig::from_json(r#"{ "starting_life": 20 }"#).unwrap();
//! assert_eq!(config.starting_life, 20);
//! assert_eq!(config.history_limit, 64);
//! ```

use crate::core::{Position, Rect};
use crate::game::counters::DEFAULT_STARTING_LIFE;
use crate::layout::HandLayoutConfig;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaymatConfig {
    pub starting_life: i32,

    /// Where cards land when played without a drop coordinate
    pub fallback_area: Rect,

    /// Offset of a promoted card relative to the host it was unstacked from
    pub unstack_offset: Position,

    /// Number of committed transitions kept for undo (0 disables undo)
    pub history_limit: usize,

    /// Delay before a hovered card's preview is shown
    pub preview_delay_ms: u64,

    pub hand_layout: HandLayoutConfig,
}

impl Default for PlaymatConfig {
    fn default() -> Self {
        PlaymatConfig {
            starting_life: DEFAULT_STARTING_LIFE,
            fallback_area: Rect::new(50.0, 50.0, 200.0, 200.0),
            unstack_offset: Position::new(30.0, 30.0),
            history_limit: 64,
            preview_delay_ms: 500,
            hand_layout: HandLayoutConfig::default(),
        }
    }
}

impl PlaymatConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self
    }

    pub fn preview_delay(&self) -> Duration {
        Duration::from_millis(self.preview_delay_ms)
    }
}
