//! Domain-specific error types for the overlay tool.
//!
//! Internal modules return typed errors built with [`thiserror`]; the binary
//! maps the top-level [`OverlayError`] to a process exit status via
//! [`OverlayError::exit_status`].
//!
//! # Error hierarchy
//!
//! ```text
//! OverlayError
//! ├── NotAPackage           : no build.json and no package.json marker
//! ├── Manifest(ManifestError): build.json unreadable or not valid JSON
//! ├── Copy(CopyError)       : a tree copy failed part-way
//! └── Io                    : any other fatal filesystem failure
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type returned by the build orchestrator.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// The directory has neither a manifest nor the package marker file.
    #[error("{} is not a package: neither build.json nor package.json found", path.display())]
    NotAPackage {
        /// Package root that was inspected.
        path: PathBuf,
    },

    /// The manifest exists but could not be read or decoded.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A tree copy failed.
    #[error(transparent)]
    Copy(#[from] CopyError),

    /// Any other fatal I/O failure (e.g. resolving the package root).
    #[error("{context}: {source}")]
    Io {
        /// What the tool was doing when the failure occurred.
        context: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised while loading `build.json`.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file exists but could not be read.
    #[error("failed to read manifest {}: {source}", path.display())]
    Io {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest is not valid JSON, or a known field has the wrong type.
    #[error("failed to parse manifest {}: {source}", path.display())]
    Parse {
        /// Path to the manifest.
        path: PathBuf,
        /// Decoder error, including line and column.
        source: serde_json::Error,
    },
}

/// Errors raised by the tree copier.
#[derive(Error, Debug)]
pub enum CopyError {
    /// Reading, creating or copying an entry failed.
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Io {
        /// Source entry.
        from: PathBuf,
        /// Destination entry.
        to: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The destination holds a file where the source has a directory, or the
    /// other way round.
    #[error("cannot copy {} over {}: one is a directory and the other is not", from.display(), to.display())]
    KindMismatch {
        /// Source entry.
        from: PathBuf,
        /// Conflicting destination entry.
        to: PathBuf,
    },
}

/// Process exit status reported by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Run completed, possibly with warnings.
    Success,
    /// Fatal filesystem failure during the run.
    Failure,
    /// Bad command-line arguments.
    Usage,
    /// The target directory is not a package.
    NotAPackage,
    /// The manifest could not be read or decoded.
    Manifest,
}

impl ExitStatus {
    /// Numeric exit code for this status.
    ///
    /// `Usage` matches the code clap uses when it rejects arguments itself.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Usage => 2,
            Self::NotAPackage => 3,
            Self::Manifest => 4,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        Self::from(status.code())
    }
}

impl OverlayError {
    /// Exit status the binary reports for this error.
    #[must_use]
    pub const fn exit_status(&self) -> ExitStatus {
        match self {
            Self::NotAPackage { .. } => ExitStatus::NotAPackage,
            Self::Manifest(_) => ExitStatus::Manifest,
            Self::Copy(_) | Self::Io { .. } => ExitStatus::Failure,
        }
    }
}
