use super::{Context, Task, TaskResult, process_operations};
use crate::error::OverlayError;
use crate::resources::Operation;

/// Copy the package's whole `src/` tree into `dist/`.
#[derive(Debug)]
pub struct CopySources;

impl Task for CopySources {
    fn name(&self) -> &str {
        "Copy sources"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult, OverlayError> {
        let src = ctx.config.src_dir();
        if !src.is_dir() {
            ctx.log.warn(&format!(
                "source directory not found: {}, skipping bulk copy",
                src.display()
            ));
            return Ok(TaskResult::Skipped("no src directory".to_string()));
        }

        let dist = ctx.config.dist_dir();
        let ops = [
            Operation::CreateDir { path: dist.clone() },
            Operation::CopyTree {
                source: src,
                destination: dist,
            },
        ];
        Ok(process_operations(ctx, &ops)?.finish(ctx))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;
    use crate::tasks::test_helpers::make_context;
    use std::fs;
    use std::sync::Arc;

    #[test]
    fn copies_src_into_dist() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src/nested")).unwrap();
        fs::write(tmp.path().join("src/index.txt"), b"A").unwrap();
        fs::write(tmp.path().join("src/nested/.keep"), b"").unwrap();
        let ctx = make_context(tmp.path(), Arc::new(MemoryLog::new()), false);

        let result = CopySources.run(&ctx).unwrap();

        assert!(matches!(result, TaskResult::Ok(stats) if stats.files == 2));
        assert_eq!(fs::read(tmp.path().join("dist/index.txt")).unwrap(), b"A");
        assert!(tmp.path().join("dist/nested/.keep").is_file());
        assert_eq!(ctx.journal().len(), 2);
    }

    #[test]
    fn missing_src_is_skipped_with_warning() {
        let tmp = tempfile::tempdir().unwrap();
        let log = Arc::new(MemoryLog::new());
        let ctx = make_context(tmp.path(), Arc::clone(&log), false);

        let result = CopySources.run(&ctx).unwrap();

        assert!(matches!(result, TaskResult::Skipped(_)));
        assert!(!tmp.path().join("dist").exists());
        assert!(ctx.journal().is_empty());
        assert!(log.warnings()[0].contains("source directory not found"));
    }

    #[test]
    fn dry_run_reports_dry_run() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        let ctx = make_context(tmp.path(), Arc::new(MemoryLog::new()), true);

        assert!(matches!(
            CopySources.run(&ctx).unwrap(),
            TaskResult::DryRun(stats) if stats.changed == 2 && stats.files == 0
        ));
        assert!(!tmp.path().join("dist").exists());
    }
}
