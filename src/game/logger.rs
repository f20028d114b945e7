//! Playmat event logger
//!
//! Messages are filtered by [`VerbosityLevel`] and sent to stdout, to an
//! in-memory buffer, or both. Tests and the CLI use the buffer to inspect
//! what the coordinator did without scraping stdout.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Verbosity level for playmat output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - no output
    Silent = 0,
    /// Minimal - only problems the player should notice (e.g. empty library)
    Minimal = 1,
    /// Normal - every committed or rejected transition (default)
    #[default]
    Normal = 2,
    /// Verbose - shuffles, setup and layout detail
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// Log categories used by the coordinator
pub mod category {
    pub const TRANSITION: &str = "transition";
    pub const REJECTED: &str = "rejected";
    pub const EMPTY_LIBRARY: &str = "empty_library";
    pub const SETUP: &str = "setup";
    pub const SHUFFLE: &str = "shuffle";
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    pub category: Option<String>,
}

/// Read-only access to captured log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Centralized logger for playmat events
///
/// Logging takes `&self` so read-only code paths (snapshots, layout) can log
/// too; the capture buffer lives in a `RefCell`.
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn disable_capture(&mut self) {
        self.output_mode = OutputMode::Stdout;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Print buffered entries allowed by the current verbosity, then clear
    pub fn flush_buffer(&mut self) {
        for entry in self.log_buffer.borrow().iter() {
            if entry.level <= self.verbosity {
                self.write_stdout(entry);
            }
        }
        self.clear_logs();
    }

    /// Access captured log entries without copying
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    /// Captured messages in one category
    pub fn messages_in(&self, category: &str) -> Vec<String> {
        self.log_buffer
            .borrow()
            .iter()
            .filter(|e| e.category.as_deref() == Some(category))
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Log a message at `level`, optionally tagged with a category
    pub fn log(&self, level: VerbosityLevel, category: Option<&str>, message: &str) {
        if level == VerbosityLevel::Silent {
            return;
        }
        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both)
            && level <= self.verbosity;

        if !should_capture && !should_output {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            category: category.map(str::to_string),
        };
        if should_output {
            self.write_stdout(&entry);
        }
        if should_capture {
            self.log_buffer.borrow_mut().push(entry);
        }
    }

    fn write_stdout(&self, entry: &LogEntry) {
        if entry.level == VerbosityLevel::Minimal {
            println!("{}", entry.message);
        } else {
            println!("  {}", entry.message);
        }
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

impl Clone for GameLogger {
    /// Clones settings only; the capture buffer starts empty
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_mode: self.output_mode,
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.log(VerbosityLevel::Normal, None, "test message");
        logger.log(VerbosityLevel::Minimal, None, "minimal message");
        logger.log(VerbosityLevel::Normal, Some(category::TRANSITION), "drew 3");

        let logs = logger.logs();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[2].category.as_deref(), Some("transition"));
    }

    #[test]
    fn test_capture_ignores_verbosity() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Minimal);
        logger.enable_capture();
        logger.log(VerbosityLevel::Verbose, Some(category::SETUP), "detail");
        assert_eq!(logger.logs().len(), 1);
    }

    #[test]
    fn test_silent_is_never_recorded() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.log(VerbosityLevel::Silent, None, "gone");
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_messages_in_category() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.log(VerbosityLevel::Normal, Some(category::REJECTED), "a");
        logger.log(VerbosityLevel::Normal, Some(category::TRANSITION), "b");
        logger.log(VerbosityLevel::Normal, Some(category::REJECTED), "c");

        assert_eq!(logger.messages_in(category::REJECTED), vec!["a", "c"]);
    }

    #[test]
    fn test_flush_buffer_clears() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.log(VerbosityLevel::Normal, None, "message 1");
        logger.log(VerbosityLevel::Normal, None, "message 2");

        logger.flush_buffer();
        assert_eq!(logger.logs().len(), 0);
    }

    #[test]
    fn test_clone_starts_empty() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.log(VerbosityLevel::Normal, None, "kept");
        let copy = logger.clone();
        assert!(copy.is_capturing());
        assert!(copy.logs().is_empty());
    }

    #[test]
    fn test_both_mode_writes_text_and_captures() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Minimal);
        logger.set_output_mode(OutputMode::Both);
        logger.log(VerbosityLevel::Minimal, Some(category::EMPTY_LIBRARY), "library is empty");
        logger.log(VerbosityLevel::Verbose, Some(category::SHUFFLE), "shuffle detail");

        assert!(logger.is_capturing());
        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].level, VerbosityLevel::Minimal);
        assert_eq!(logs[1].category.as_deref(), Some("shuffle"));
    }
}
