//! In-memory logger.
use std::sync::Mutex;

use super::types::{Level, Log, TaskEntry, TaskStatus};

/// A single captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity.
    pub level: Level,
    /// Message text.
    pub message: String,
}

/// Logger that keeps every message and task result in memory.
///
/// Used by tests and by callers embedding the build in another tool that
/// want to inspect warnings after the run.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
    tasks: Mutex<Vec<TaskEntry>>,
}

impl MemoryLog {
    /// Create an empty in-memory logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured entries in order.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Messages captured at `level`, in order.
    #[must_use]
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    /// Captured warnings, in order.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::Warn)
    }

    /// Recorded task results, in order.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| vec![], |g| g.clone())
    }
}

impl Log for MemoryLog {
    fn emit(&self, level: Level, msg: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(LogEntry {
                level,
                message: msg.to_string(),
            });
        }
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
