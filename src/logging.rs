//! In-memory structured logging of command dispositions
//!
//! The aggregate records what it accepted, what a guard rejected, and which
//! facts it emitted (set finished, illegal libero). Entries are plain
//! serializable values with no I/O; the host application drains and renders
//! them however it likes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log level for match logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// One structured log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    /// Event id when the entry concerns a specific log event
    pub event_id: Option<u64>,
    /// Set the entry was recorded in
    pub set_number: Option<u8>,
    pub message: String,
    /// Additional structured data
    pub metadata: Vec<(String, String)>,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(level: LogLevel, timestamp: DateTime<Utc>, message: String) -> Self {
        Self {
            level,
            timestamp,
            event_id: None,
            set_number: None,
            message,
            metadata: Vec::new(),
        }
    }

    /// Attach the event this entry concerns
    pub fn with_event(mut self, event_id: u64) -> Self {
        self.event_id = Some(event_id);
        self
    }

    /// Attach the set number
    pub fn with_set(mut self, set_number: u8) -> Self {
        self.set_number = Some(set_number);
        self
    }

    /// Attach a metadata pair
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }
}

/// Collects log entries above a minimum level, without side effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchLogger {
    entries: Vec<LogEntry>,
    min_level: LogLevel,
}

impl MatchLogger {
    /// Create a logger recording entries at or above `min_level`
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            entries: Vec::new(),
            min_level,
        }
    }

    /// Logger that captures everything
    pub fn all() -> Self {
        Self::new(LogLevel::Trace)
    }

    /// Logger that captures info and above
    pub fn with_info_level() -> Self {
        Self::new(LogLevel::Info)
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level as u8 >= self.min_level as u8
    }

    /// Record an entry if it meets the minimum level
    pub fn log(&mut self, entry: LogEntry) {
        if self.should_log(entry.level) {
            self.entries.push(entry);
        }
    }

    /// Record a debug message
    pub fn debug(&mut self, timestamp: DateTime<Utc>, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Debug, timestamp, message.into()));
    }

    /// Record an info message
    pub fn info(&mut self, timestamp: DateTime<Utc>, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Info, timestamp, message.into()));
    }

    /// Record a warning
    pub fn warn(&mut self, timestamp: DateTime<Utc>, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Warn, timestamp, message.into()));
    }

    /// Record an error
    pub fn error(&mut self, timestamp: DateTime<Utc>, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Error, timestamp, message.into()));
    }

    /// All recorded entries
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all recorded entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries at one level
    pub fn filter_by_level(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }

    /// Entries recorded during one set
    pub fn filter_by_set(&self, set_number: u8) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.set_number == Some(set_number))
            .collect()
    }
}

impl Default for MatchLogger {
    fn default() -> Self {
        Self::with_info_level()
    }
}
