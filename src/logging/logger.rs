//! Tracing-backed logger with task recording and the end-of-run summary.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{Level, Log, TaskEntry, TaskStatus};
use super::utils::log_file_path;

/// Target of ordinary messages.
pub(super) const DEFAULT_TARGET: &str = "dist_overlay";
/// Target of stage headers.
pub(super) const STAGE_TARGET: &str = "dist_overlay::stage";
/// Target of dry-run action lines.
pub(super) const DRY_RUN_TARGET: &str = "dist_overlay::dry_run";
/// Target of per-task summary lines; they carry a `status` field.
pub(super) const SUMMARY_TARGET: &str = "dist_overlay::summary";

/// Logger that sends every message through [`tracing`] and keeps task
/// results for the summary.
///
/// The subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) renders events on
/// the console and appends them to `<cache>/dist-overlay/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Only remembers the log file path for the summary; the file itself is
    /// written by the subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    pub(super) const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded task entries.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Count the number of failed tasks.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.tasks.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|t| t.status == TaskStatus::Failed)
                .count()
        })
    }

    /// Emit the summary of all recorded tasks.
    ///
    /// Each task becomes one event on the summary target with its status as
    /// a field; styling is left to the console formatter.
    pub fn print_summary(&self) {
        let tasks = self.task_entries();
        if tasks.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut counts = [0usize; 5];
        for task in &tasks {
            let slot = match task.status {
                TaskStatus::Ok => 0,
                TaskStatus::NotApplicable => 1,
                TaskStatus::Skipped => 2,
                TaskStatus::DryRun => 3,
                TaskStatus::Failed => 4,
            };
            if let Some(count) = counts.get_mut(slot) {
                *count += 1;
            }

            let detail = task
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            tracing::info!(
                target: SUMMARY_TARGET,
                status = task.status.label(),
                "{}{detail}",
                task.name
            );
        }

        let [ok, not_applicable, skipped, dry_run, failed] = counts;
        self.info(&format!(
            "{} tasks: {ok} ok, {not_applicable} n/a, {skipped} skipped, {dry_run} dry-run, {failed} failed",
            tasks.len()
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    fn emit(&self, level: Level, msg: &str) {
        match level {
            Level::Stage => tracing::info!(target: STAGE_TARGET, "{msg}"),
            Level::Info => tracing::info!(target: DEFAULT_TARGET, "{msg}"),
            Level::Debug => tracing::debug!(target: DEFAULT_TARGET, "{msg}"),
            Level::Warn => tracing::warn!(target: DEFAULT_TARGET, "{msg}"),
            Level::Error => tracing::error!(target: DEFAULT_TARGET, "{msg}"),
            Level::DryRun => tracing::info!(target: DRY_RUN_TARGET, "{msg}"),
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
