//! Card instance identity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Simple integer ID for one physical copy of a card in a session
///
/// IDs are handed out by an [`InstanceIdGenerator`] and never reused within a
/// session, not even across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(u32);

impl InstanceId {
    pub fn new(id: u32) -> Self {
        InstanceId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for InstanceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(InstanceId)
    }
}

/// Monotonic source of fresh instance IDs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceIdGenerator {
    next_id: u32,
}

impl InstanceIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new unique InstanceId
    pub fn next_id(&mut self) -> InstanceId {
        let id = InstanceId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of IDs handed out so far
    pub fn issued(&self) -> u32 {
        self.next_id
    }
}
