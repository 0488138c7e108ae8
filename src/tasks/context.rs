use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::logging::Log;
use crate::overlay::{self, ConfigCopy};
use crate::resources::Operation;

/// Shared context for task execution.
pub struct Context {
    /// Detected package and its manifest.
    pub config: Arc<Config>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to log planned operations instead of applying them.
    pub dry_run: bool,
    /// Overlays resolved before any task touched the filesystem.
    overlays: Vec<ConfigCopy>,
    /// Every operation processed so far, in order.
    journal: Mutex<Vec<Operation>>,
    /// Files written by applied copy operations.
    files_copied: AtomicU64,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("overlays", &self.overlays)
            .field("journal", &self.journal)
            .field("files_copied", &self.files_copied)
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    ///
    /// The manifest's overlays are resolved here, while `dist/` is still
    /// untouched, so a `from` that passes through `dist/` resolves the same
    /// way in a dry run and in a real run.
    #[must_use]
    pub fn new(config: Arc<Config>, log: Arc<dyn Log>, dry_run: bool) -> Self {
        let overlays = overlay::resolve(
            &config.root,
            &config.dist_dir(),
            config.directives(),
            log.as_ref(),
        );
        Self {
            config,
            log,
            dry_run,
            overlays,
            journal: Mutex::new(Vec::new()),
            files_copied: AtomicU64::new(0),
        }
    }

    /// Config overlays to apply, in manifest order.
    #[must_use]
    pub fn overlays(&self) -> &[ConfigCopy] {
        &self.overlays
    }

    /// Append `op` to the journal.
    pub(super) fn record(&self, op: &Operation) {
        self.journal
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(op.clone());
    }

    /// Add `files` to the count of files written.
    pub(super) fn add_files_copied(&self, files: u64) {
        self.files_copied.fetch_add(files, Ordering::Relaxed);
    }

    /// Files written so far (always zero in a dry run).
    #[must_use]
    pub fn files_copied(&self) -> u64 {
        self.files_copied.load(Ordering::Relaxed)
    }

    /// The operations applied (or, in a dry run, planned) so far.
    #[must_use]
    pub fn journal(&self) -> Vec<Operation> {
        self.journal
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Consume the context and return its journal.
    #[must_use]
    pub fn into_journal(self) -> Vec<Operation> {
        self.journal
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
