//! Playmat state, transitions and the session coordinator

pub mod actions;
pub mod command;
pub mod counters;
pub mod library;
pub mod logger;
pub mod playmat;
pub mod snapshot;
pub mod stacking;
pub mod state;

pub use actions::{ActionOutcome, ApplyContext, GameAction};
pub use command::{parse_script, PlaymatCommand};
pub use counters::Counters;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use playmat::Playmat;
pub use snapshot::{HandView, RenderSnapshot};
pub use stacking::StackOutcome;
pub use state::GameState;
