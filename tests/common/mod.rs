// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed workspace holding one or more
// packages, plus a fluent builder so each integration test can lay out
// `src/`, `configs/` and `build.json` without repeating filesystem
// boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dist_overlay::commands::build::{self, BuildReport};
use dist_overlay::config::RunOptions;
use dist_overlay::error::OverlayError;
use dist_overlay::logging::{Log, MemoryLog};

/// Name of the package directory the builder writes into.
pub const APP: &str = "app";

/// An isolated workspace backed by a [`tempfile::TempDir`].
///
/// Packages live side by side under the workspace root so that manifests can
/// refer to siblings as `../<name>`.
pub struct Workspace {
    /// Temporary directory containing the packages.
    pub root: tempfile::TempDir,
}

impl Workspace {
    /// Path to the package named `name`.
    pub fn package(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Path to the main package.
    pub fn app(&self) -> PathBuf {
        self.package(APP)
    }

    /// Run a build of the main package with an in-memory log.
    pub fn build(&self, dry_run: bool) -> (Result<BuildReport, OverlayError>, Arc<MemoryLog>) {
        let log = Arc::new(MemoryLog::new());
        let opts = RunOptions {
            package: Some(self.app()),
            dry_run,
        };
        let shared: Arc<dyn Log> = Arc::clone(&log) as Arc<dyn Log>;
        let result = build::run(&opts, shared);
        (result, log)
    }

    /// Run a real build and panic on failure.
    pub fn build_ok(&self) -> BuildReport {
        self.build(false).0.expect("build succeeds")
    }

    /// Write `contents` to `rel` under the main package, creating parents.
    pub fn write(&self, rel: &str, contents: &str) {
        write_file(&self.app(), rel, contents);
    }

    /// Read `rel` under the main package.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.app().join(rel))
            .unwrap_or_else(|e| panic!("read {rel}: {e}"))
    }

    /// Snapshot every file under `rel` of the main package as
    /// `relative path -> contents`.
    pub fn tree(&self, rel: &str) -> BTreeMap<String, Vec<u8>> {
        let base = self.app().join(rel);
        let mut files = BTreeMap::new();
        if base.exists() {
            collect(&base, &base, &mut files);
        }
        files
    }
}

fn collect(base: &Path, dir: &Path, files: &mut BTreeMap<String, Vec<u8>>) {
    for entry in std::fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            collect(base, &path, files);
        } else {
            let rel = path
                .strip_prefix(base)
                .expect("under base")
                .to_string_lossy()
                .replace('\\', "/");
            files.insert(rel, std::fs::read(&path).expect("read file"));
        }
    }
}

fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(&path, contents).expect("write file");
}

/// Fluent builder for [`Workspace`].
///
/// # Example
///
/// ```ignore
/// let ws = WorkspaceBuilder::new()
///     .manifest(r#"{"copy":[{"from":".","configs":["base"]}]}"#)
///     .src_file("index.txt", "A")
///     .config(".", "base", "env.txt", "B")
///     .build();
/// ```
pub struct WorkspaceBuilder {
    manifest: Option<String>,
    marker: bool,
    files: Vec<(String, String, String)>,
}

impl WorkspaceBuilder {
    /// Start an empty workspace with a main package and no identifying file.
    pub fn new() -> Self {
        Self {
            manifest: None,
            marker: false,
            files: Vec::new(),
        }
    }

    /// Give the main package a `build.json`.
    pub fn manifest(mut self, json: &str) -> Self {
        self.manifest = Some(json.to_string());
        self
    }

    /// Give the main package a `package.json` marker.
    pub fn marker(mut self) -> Self {
        self.marker = true;
        self
    }

    /// Add `src/<rel>` to the main package.
    pub fn src_file(mut self, rel: &str, contents: &str) -> Self {
        self.files
            .push((APP.to_string(), format!("src/{rel}"), contents.to_string()));
        self
    }

    /// Add `src/configs/<name>/<rel>` to the package `from` (relative to the
    /// main package, as written in a manifest).
    pub fn config(mut self, from: &str, name: &str, rel: &str, contents: &str) -> Self {
        let package = if from == "." {
            APP.to_string()
        } else {
            from.trim_start_matches("../").to_string()
        };
        self.files.push((
            package,
            format!("src/configs/{name}/{rel}"),
            contents.to_string(),
        ));
        self
    }

    /// Add an arbitrary file `<rel>` to the main package (e.g. under `dist/`).
    pub fn file(mut self, rel: &str, contents: &str) -> Self {
        self.files
            .push((APP.to_string(), rel.to_string(), contents.to_string()));
        self
    }

    /// Create the workspace on disk.
    pub fn build(self) -> Workspace {
        let root = tempfile::tempdir().expect("create temp dir");
        let app = root.path().join(APP);
        std::fs::create_dir_all(&app).expect("create package dir");
        if let Some(json) = &self.manifest {
            write_file(&app, "build.json", json);
        }
        if self.marker {
            write_file(&app, "package.json", "{}");
        }
        for (package, rel, contents) in &self.files {
            write_file(&root.path().join(package), rel, contents);
        }
        Workspace { root }
    }
}
