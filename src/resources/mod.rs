//! Planned filesystem operations and their apply step.
pub mod fs;

use std::fmt;
use std::path::PathBuf;

use crate::error::CopyError;

/// Interface for resources that can be described and applied.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem change cannot be made.
    fn apply(&self) -> Result<ResourceChange, CopyError>;
}

/// Result of applying a resource change.
///
/// # Examples
///
/// ```
/// use dist_overlay::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let skipped = ResourceChange::Skipped { reason: "source missing".into() };
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, skipped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// The change was made.
    Applied,
    /// A tree copy ran and wrote `files` files.
    Copied {
        /// Number of files written.
        files: u64,
    },
    /// Nothing to do (e.g. the directory already exists).
    AlreadyCorrect,
    /// The resource was skipped and nothing was touched.
    Skipped {
        /// Why the resource was skipped.
        reason: String,
    },
}

/// One filesystem mutation in a run's plan.
///
/// A run produces the same sequence of operations whether or not it is a dry
/// run; only the apply step differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create a directory and any missing parents.
    CreateDir {
        /// Directory to create.
        path: PathBuf,
    },
    /// Copy the contents of `source` into `destination` (see [`fs::copy_tree`]).
    CopyTree {
        /// Source directory.
        source: PathBuf,
        /// Destination directory.
        destination: PathBuf,
    },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path } => write!(f, "create directory {}", path.display()),
            Self::CopyTree {
                source,
                destination,
            } => write!(f, "copy {} -> {}", source.display(), destination.display()),
        }
    }
}

impl Applicable for Operation {
    fn description(&self) -> String {
        self.to_string()
    }

    fn apply(&self) -> Result<ResourceChange, CopyError> {
        match self {
            Self::CreateDir { path } => {
                if path.is_dir() {
                    return Ok(ResourceChange::AlreadyCorrect);
                }
                std::fs::create_dir_all(path).map_err(|source| CopyError::Io {
                    from: path.clone(),
                    to: path.clone(),
                    source,
                })?;
                Ok(ResourceChange::Applied)
            }
            Self::CopyTree {
                source,
                destination,
            } => match fs::copy_tree(source, destination)? {
                fs::CopyOutcome::Copied { files } => Ok(ResourceChange::Copied { files }),
                fs::CopyOutcome::SourceMissing => Ok(ResourceChange::Skipped {
                    reason: format!("source not found: {}", source.display()),
                }),
            },
        }
    }
}
