//! Named build steps that turn the package layout into filesystem operations.
mod context;
pub mod overlays;
mod processing;
pub mod sources;

pub use context::Context;
pub use processing::{TaskResult, TaskStats, process_operations};

use crate::error::OverlayError;
use crate::logging::TaskStatus;

/// A named, executable build step.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task has anything to do for the current package.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if a filesystem operation fails. Missing optional
    /// inputs are reported as [`TaskResult::Skipped`] instead.
    fn run(&self, ctx: &Context) -> Result<TaskResult, OverlayError>;
}

/// The build steps in execution order.
///
/// Overlays must run after the bulk copy so that they take precedence over
/// anything `src/configs/` put into `dist/configs/`.
#[must_use]
pub fn all_build_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(sources::CopySources), Box::new(overlays::ApplyOverlays)]
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Returns the task's error after logging it and recording the failure.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<(), OverlayError> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return Ok(());
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok(stats)) => {
            let summary = stats.summary(false);
            ctx.log.info(&summary);
            ctx.log
                .record_task(task.name(), TaskStatus::Ok, Some(&summary));
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun(stats)) => {
            let summary = stats.summary(true);
            ctx.log.info(&summary);
            ctx.log
                .record_task(task.name(), TaskStatus::DryRun, Some(&summary));
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&e.to_string()));
            return Err(e);
        }
    }
    Ok(())
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;
    use std::sync::Arc;
    use test_helpers::make_context;

    struct Failing;

    impl Task for Failing {
        fn name(&self) -> &str {
            "Failing"
        }

        fn should_run(&self, _: &Context) -> bool {
            true
        }

        fn run(&self, _: &Context) -> Result<TaskResult, OverlayError> {
            Err(OverlayError::NotAPackage {
                path: std::path::PathBuf::from("x"),
            })
        }
    }

    #[test]
    fn build_tasks_run_bulk_copy_first() {
        let names: Vec<String> = all_build_tasks()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["Copy sources", "Apply overlays"]);
    }

    #[test]
    fn not_applicable_task_is_recorded() {
        let tmp = tempfile::tempdir().unwrap();
        let log = Arc::new(MemoryLog::new());
        let ctx = make_context(tmp.path(), Arc::clone(&log), false);

        execute(&overlays::ApplyOverlays, &ctx).unwrap();

        let tasks = log.task_entries();
        assert_eq!(tasks[0].status, TaskStatus::NotApplicable);
    }

    #[test]
    fn skipped_task_is_recorded_with_reason() {
        let tmp = tempfile::tempdir().unwrap();
        let log = Arc::new(MemoryLog::new());
        let ctx = make_context(tmp.path(), Arc::clone(&log), false);

        execute(&sources::CopySources, &ctx).unwrap();

        let tasks = log.task_entries();
        assert_eq!(tasks[0].status, TaskStatus::Skipped);
        assert_eq!(tasks[0].message.as_deref(), Some("no src directory"));
    }

    #[test]
    fn completed_task_records_file_count() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("src/nested")).unwrap();
        std::fs::write(tmp.path().join("src/a"), b"a").unwrap();
        std::fs::write(tmp.path().join("src/nested/b"), b"b").unwrap();
        let log = Arc::new(MemoryLog::new());
        let ctx = make_context(tmp.path(), Arc::clone(&log), false);

        execute(&sources::CopySources, &ctx).unwrap();

        let tasks = log.task_entries();
        assert_eq!(tasks[0].status, TaskStatus::Ok);
        assert_eq!(
            tasks[0].message.as_deref(),
            Some("2 changed, 0 already ok, 2 file(s) copied")
        );
    }

    #[test]
    fn failure_is_recorded_and_returned() {
        let tmp = tempfile::tempdir().unwrap();
        let log = Arc::new(MemoryLog::new());
        let ctx = make_context(tmp.path(), Arc::clone(&log), false);

        let result = execute(&Failing, &ctx);

        assert!(result.is_err());
        assert_eq!(log.task_entries()[0].status, TaskStatus::Failed);
        assert_eq!(log.messages(crate::logging::Level::Error).len(), 1);
    }
}
