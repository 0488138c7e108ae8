//! Package detection, layout paths and run options.
pub mod json_loader;
pub mod manifest;

use std::path::{Path, PathBuf};

use crate::error::OverlayError;
use manifest::{CopyEntry, MANIFEST_FILE, Manifest};

/// Marker file that identifies a package without a manifest.
pub const MARKER_FILE: &str = "package.json";

/// Source tree copied into the distribution tree.
pub const SRC_DIR: &str = "src";

/// Distribution tree written by a run.
pub const DIST_DIR: &str = "dist";

/// Directory holding named configs, both under a source package's `src/`
/// and under the distribution tree.
pub const CONFIGS_DIR: &str = "configs";

/// Options for a single run, built from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Package root; `None` means the current working directory.
    pub package: Option<PathBuf>,
    /// Log planned operations instead of applying them.
    pub dry_run: bool,
}

impl RunOptions {
    /// Resolve the package root to an absolute path.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Io`] if the current directory cannot be read,
    /// and [`OverlayError::NotAPackage`] if the path does not exist.
    pub fn package_root(&self) -> Result<PathBuf, OverlayError> {
        let requested = match &self.package {
            Some(path) => path.clone(),
            None => std::env::current_dir().map_err(|source| OverlayError::Io {
                context: "reading current directory".to_string(),
                source,
            })?,
        };
        dunce::canonicalize(&requested).map_err(|_| OverlayError::NotAPackage { path: requested })
    }
}

/// How a directory was recognised as a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// `build.json` is present.
    Manifest,
    /// Only the `package.json` marker is present; overlays are skipped.
    Marker,
}

/// A detected package and its layout.
#[derive(Debug, Clone)]
pub struct Config {
    /// Package root (absolute).
    pub root: PathBuf,
    /// How the package was recognised.
    pub kind: PackageKind,
    /// Decoded manifest, if the package has one.
    pub manifest: Option<Manifest>,
}

impl Config {
    /// Detect the package at `root` and load its manifest.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Manifest`] if `build.json` exists but cannot be
    /// decoded, and [`OverlayError::NotAPackage`] if neither `build.json` nor
    /// `package.json` exists.
    pub fn load(root: &Path) -> Result<Self, OverlayError> {
        let manifest = Manifest::load(root)?;
        let kind = if manifest.is_some() {
            PackageKind::Manifest
        } else if root.join(MARKER_FILE).is_file() {
            PackageKind::Marker
        } else {
            return Err(OverlayError::NotAPackage {
                path: root.to_path_buf(),
            });
        };

        Ok(Self {
            root: root.to_path_buf(),
            kind,
            manifest,
        })
    }

    /// `<root>/src`.
    #[must_use]
    pub fn src_dir(&self) -> PathBuf {
        self.root.join(SRC_DIR)
    }

    /// `<root>/dist`.
    #[must_use]
    pub fn dist_dir(&self) -> PathBuf {
        self.root.join(DIST_DIR)
    }

    /// `<root>/dist/configs`.
    #[must_use]
    pub fn dist_configs_dir(&self) -> PathBuf {
        self.dist_dir().join(CONFIGS_DIR)
    }

    /// `<root>/build.json`.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Overlay entries in manifest order (empty without a manifest).
    ///
    /// Malformed entries are included; the overlay resolver reports them.
    #[must_use]
    pub fn directives(&self) -> &[CopyEntry] {
        self.manifest
            .as_ref()
            .map(|m| m.copy.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ManifestError;

    #[test]
    fn detects_manifest_package() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), r#"{"copy":[]}"#).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.kind, PackageKind::Manifest);
        assert!(config.directives().is_empty());
    }

    #[test]
    fn manifest_wins_over_marker() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{}").unwrap();
        std::fs::write(dir.path().join(MARKER_FILE), "{}").unwrap();
        assert_eq!(
            Config::load(dir.path()).unwrap().kind,
            PackageKind::Manifest
        );
    }

    #[test]
    fn detects_marker_package() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MARKER_FILE), "{}").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.kind, PackageKind::Marker);
        assert!(config.manifest.is_none());
        assert!(config.directives().is_empty());
    }

    #[test]
    fn bare_directory_is_not_a_package() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(OverlayError::NotAPackage { .. })
        ));
    }

    #[test]
    fn invalid_manifest_is_fatal_even_with_marker() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "[1,").unwrap();
        std::fs::write(dir.path().join(MARKER_FILE), "{}").unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(OverlayError::Manifest(ManifestError::Parse { .. }))
        ));
    }

    #[test]
    fn layout_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MARKER_FILE), "{}").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.src_dir(), dir.path().join("src"));
        assert_eq!(config.dist_dir(), dir.path().join("dist"));
        assert_eq!(
            config.dist_configs_dir(),
            dir.path().join("dist").join("configs")
        );
        assert_eq!(config.manifest_path(), dir.path().join("build.json"));
    }

    #[test]
    fn package_root_uses_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let opts = RunOptions {
            package: Some(dir.path().to_path_buf()),
            dry_run: false,
        };
        assert_eq!(
            opts.package_root().unwrap(),
            dunce::canonicalize(dir.path()).unwrap()
        );
    }

    #[test]
    fn package_root_missing_path_is_not_a_package() {
        let dir = tempfile::tempdir().unwrap();
        let opts = RunOptions {
            package: Some(dir.path().join("nope")),
            dry_run: false,
        };
        assert!(matches!(
            opts.package_root(),
            Err(OverlayError::NotAPackage { .. })
        ));
    }
}
