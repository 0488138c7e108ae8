//! Core logging types: severity, task entries and the [`Log`] trait.

/// Severity (or kind) of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Stage header.
    Stage,
    /// Informational message.
    Info,
    /// Debug message.
    Debug,
    /// Warning.
    Warn,
    /// Error.
    Error,
    /// Dry-run action.
    DryRun,
}

/// Task execution result for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    /// Human-readable task name.
    pub name: String,
    /// Final status of the task.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task completed successfully.
    Ok,
    /// Task had nothing to do for this package (e.g. no manifest).
    NotApplicable,
    /// Task was skipped because its input is missing.
    Skipped,
    /// Task ran in dry-run mode; no changes were applied.
    DryRun,
    /// Task encountered an error and could not complete.
    Failed,
}

impl TaskStatus {
    const ALL: [Self; 5] = [
        Self::Ok,
        Self::NotApplicable,
        Self::Skipped,
        Self::DryRun,
        Self::Failed,
    ];

    /// Short label used in the summary and as the `status` event field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NotApplicable => "n/a",
            Self::Skipped => "skipped",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }

    /// Inverse of [`label`](Self::label).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// Abstraction over logging backends.
///
/// Implementors provide [`emit`](Log::emit) and
/// [`record_task`](Log::record_task); the per-level helpers route through
/// `emit`. [`Logger`](super::logger::Logger) forwards to `tracing`,
/// [`MemoryLog`](super::memory::MemoryLog) keeps entries in memory so callers
/// can inspect what a run reported.
pub trait Log: Send + Sync {
    /// Emit `msg` at `level`.
    fn emit(&self, level: Level, msg: &str);

    /// Record a task result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);

    /// Log a stage header (major section).
    fn stage(&self, msg: &str) {
        self.emit(Level::Stage, msg);
    }

    /// Log an informational message.
    fn info(&self, msg: &str) {
        self.emit(Level::Info, msg);
    }

    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str) {
        self.emit(Level::Debug, msg);
    }

    /// Log a warning message.
    fn warn(&self, msg: &str) {
        self.emit(Level::Warn, msg);
    }

    /// Log an error message.
    fn error(&self, msg: &str) {
        self.emit(Level::Error, msg);
    }

    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str) {
        self.emit(Level::DryRun, msg);
    }
}
