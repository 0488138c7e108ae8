//! Generic operation processing shared by the build tasks.

use super::context::Context;
use crate::error::OverlayError;
use crate::resources::{Applicable, Operation, ResourceChange};

/// Result of a single task execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok(TaskStats),
    /// Task was skipped because its input is missing.
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun(TaskStats),
}

/// Counters for tasks that process several operations.
///
/// # Examples
///
/// ```
/// use dist_overlay::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 2, already_ok: 1, skipped: 0, files: 0 };
/// assert_eq!(stats.summary(false), "2 changed, 1 already ok");
/// assert_eq!(stats.summary(true), "2 would change, 1 already ok");
///
/// let copied = TaskStats { files: 12, ..stats };
/// assert_eq!(copied.summary(false), "2 changed, 1 already ok, 12 file(s) copied");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Operations applied (or that would be applied).
    pub changed: u32,
    /// Operations that found nothing to do.
    pub already_ok: u32,
    /// Operations skipped because their source was missing.
    pub skipped: u32,
    /// Files written by tree copies.
    pub files: u64,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 changed, 1 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        let mut out = format!("{} {verb}, {} already ok", self.changed, self.already_ok);
        if self.skipped > 0 {
            out.push_str(&format!(", {} skipped", self.skipped));
        }
        if self.files > 0 {
            out.push_str(&format!(", {} file(s) copied", self.files));
        }
        out
    }

    /// Wrap the counters in the [`TaskResult`] matching the run mode.
    #[must_use]
    pub const fn finish(self, ctx: &Context) -> TaskResult {
        if ctx.dry_run {
            TaskResult::DryRun(self)
        } else {
            TaskResult::Ok(self)
        }
    }
}

/// Apply `ops` in order, or describe them when the context is a dry run.
///
/// Each operation is added to the context journal before it is applied, so a
/// dry run and a real run over the same inputs produce the same journal.
///
/// # Errors
///
/// Stops at and returns the first operation that fails.
pub fn process_operations(ctx: &Context, ops: &[Operation]) -> Result<TaskStats, OverlayError> {
    let mut stats = TaskStats::new();
    for op in ops {
        ctx.record(op);
        let desc = op.description();

        if ctx.dry_run {
            ctx.log.dry_run(&format!("would {desc}"));
            stats.changed += 1;
            continue;
        }

        match op.apply()? {
            ResourceChange::Applied => {
                ctx.log.debug(&desc);
                stats.changed += 1;
            }
            ResourceChange::Copied { files } => {
                ctx.log.debug(&format!("{desc} ({files} file(s))"));
                ctx.add_files_copied(files);
                stats.changed += 1;
                stats.files += files;
            }
            ResourceChange::AlreadyCorrect => {
                ctx.log.debug(&format!("ok: {desc}"));
                stats.already_ok += 1;
            }
            ResourceChange::Skipped { reason } => {
                ctx.log.warn(&format!("skipped {desc}: {reason}"));
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}
