use std::sync::Arc;

use crate::config::{Config, PackageKind, RunOptions};
use crate::error::OverlayError;
use crate::logging::Log;
use crate::resources::Operation;
use crate::tasks::{self, Context};

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Every operation applied (or, in a dry run, planned), in order.
    pub operations: Vec<Operation>,
    /// Whether the run was a dry run.
    pub dry_run: bool,
    /// Files written by the run (zero in a dry run).
    pub files_copied: u64,
}

impl BuildReport {
    /// One-line description of the outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use dist_overlay::commands::build::BuildReport;
    ///
    /// let report = BuildReport { operations: Vec::new(), dry_run: false, files_copied: 3 };
    /// assert_eq!(report.describe(), "0 operation(s) applied, 3 file(s) copied");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        if self.dry_run {
            format!(
                "dry run: {} operation(s) planned, nothing written",
                self.operations.len()
            )
        } else {
            format!(
                "{} operation(s) applied, {} file(s) copied",
                self.operations.len(),
                self.files_copied
            )
        }
    }
}

/// Run the build: bulk-copy `src/` into `dist/`, then apply manifest overlays.
///
/// Package detection and manifest decoding complete before anything is
/// written, so a bad manifest leaves the filesystem untouched.
///
/// # Errors
///
/// Returns [`OverlayError::NotAPackage`] if the root is not a package,
/// [`OverlayError::Manifest`] if `build.json` cannot be read or decoded, and
/// the first filesystem error otherwise.
pub fn run(opts: &RunOptions, log: Arc<dyn Log>) -> Result<BuildReport, OverlayError> {
    let root = opts.package_root()?;

    log.stage("Loading package");
    let config = Config::load(&root)?;
    match config.kind {
        PackageKind::Manifest => log.info(&format!(
            "{}: {} copy directive(s)",
            config.manifest_path().display(),
            config.directives().len()
        )),
        PackageKind::Marker => log.info(&format!(
            "{}: no build.json, overlays disabled",
            root.display()
        )),
    }

    let ctx = Context::new(Arc::new(config), log, opts.dry_run);
    for task in tasks::all_build_tasks() {
        tasks::execute(task.as_ref(), &ctx)?;
    }

    let files_copied = ctx.files_copied();
    Ok(BuildReport {
        operations: ctx.into_journal(),
        dry_run: opts.dry_run,
        files_copied,
    })
}
