//! Run log: the timestamped console stream of a workflow run
//!
//! Every simulated event appends one human-readable line. The log is
//! ordered most-recent-first so a console view can render it top-down
//! without re-sorting. Entries are immutable once appended; the log is
//! append-only within a run and cleared only when a new run starts.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// An immutable, timestamped record of one simulated event.
///
/// The timestamp is wall-clock local time formatted `HH:MM:SS` (24h).
/// It is display metadata only; scheduling never reads it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Wall-clock time of emission, formatted HH:MM:SS (24h)
    timestamp: String,

    /// Human-readable message, e.g. "NET: Encrypted payload sent..."
    message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current local time
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            message: message.into(),
        }
    }

    /// Timestamp of emission (HH:MM:SS, 24h)
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The message text
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.message)
    }
}

/// Ordered log of a single run, most-recent-first.
///
/// # Example
/// ```
/// use lending_workflow_core_rs::RunLog;
///
/// let mut log = RunLog::new();
/// log.push("INIT: Starting Secure Loan Request...");
/// log.push("CLIENT: Encrypting sensitive data...");
///
/// // Newest entry is first
/// assert!(log.newest().unwrap().message().starts_with("CLIENT"));
/// assert!(log.oldest().unwrap().message().starts_with("INIT"));
/// assert_eq!(log.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunLog {
    entries: VecDeque<LogEntry>,
}

impl RunLog {
    /// Create a new empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, stamped now, at the front of the log
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(LogEntry::new(message));
    }

    /// Number of entries in the log
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, most-recent-first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The most recently emitted entry
    pub fn newest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// The first entry emitted in this run
    pub fn oldest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Entries whose message starts with the given prefix, most-recent-first
    ///
    /// Prefixes tag the simulated subsystem ("INIT", "CLIENT:", "TEE:", ...),
    /// so this is the log's equivalent of filtering events by type.
    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.message().starts_with(prefix))
            .collect()
    }

    /// Entries in emission order (oldest first), for chronological rendering
    pub fn in_emission_order(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    /// Clear all entries (start of a new run)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let entry = LogEntry::new("INIT: hello");
        let ts = entry.timestamp();
        assert_eq!(ts.len(), 8);
        let bytes = ts.as_bytes();
        assert_eq!(bytes[2], b':');
        assert_eq!(bytes[5], b':');
        assert!(ts.chars().filter(|c| c.is_ascii_digit()).count() == 6);
    }

    #[test]
    fn test_display_includes_brackets() {
        let entry = LogEntry::new("TEE: Running risk model...");
        let rendered = entry.to_string();
        assert!(rendered.starts_with('['));
        assert!(rendered.ends_with("TEE: Running risk model..."));
    }

    #[test]
    fn test_newest_first_ordering() {
        let mut log = RunLog::new();
        log.push("first");
        log.push("second");
        log.push("third");

        let messages: Vec<&str> = log.entries().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_emission_order_is_reverse_of_storage() {
        let mut log = RunLog::new();
        log.push("first");
        log.push("second");

        let messages: Vec<&str> = log.in_emission_order().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_prefix_query() {
        let mut log = RunLog::new();
        log.push("TEE: Decrypting data inside secure hardware...");
        log.push("TEE: Running risk model...");
        log.push("NET: Encrypted payload sent.");

        assert_eq!(log.entries_with_prefix("TEE:").len(), 2);
        assert_eq!(log.entries_with_prefix("NET:").len(), 1);
        assert_eq!(log.entries_with_prefix("CHAIN:").len(), 0);
    }

    #[test]
    fn test_clear() {
        let mut log = RunLog::new();
        log.push("INIT");
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
        assert!(log.newest().is_none());
        assert!(log.oldest().is_none());
    }
}
