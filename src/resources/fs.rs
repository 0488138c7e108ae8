//! Additive recursive tree copy.
use std::path::Path;

use crate::error::CopyError;

/// Result of a [`copy_tree`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The tree was copied.
    Copied {
        /// Number of regular files written.
        files: u64,
    },
    /// The source does not exist; nothing was touched.
    SourceMissing,
}

/// Recursively copy the contents of `source` into `destination`.
///
/// `destination` and any missing parents are created. The copy is additive:
/// entries already in `destination` that have no counterpart in `source` are
/// left alone, files present in both are overwritten, and subdirectories are
/// merged. Dot-prefixed entries are copied like any other.
///
/// Symlinks in the source tree are followed, so their targets are
/// materialised rather than re-linked. File permissions are carried over by
/// [`std::fs::copy`]; timestamps are not.
///
/// # Errors
///
/// Returns [`CopyError::KindMismatch`] if a file in one tree collides with a
/// directory in the other, and [`CopyError::Io`] for any other failure. The
/// destination is left as it was at the point of failure.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<CopyOutcome, CopyError> {
    if !source.exists() {
        return Ok(CopyOutcome::SourceMissing);
    }
    let mut files = 0;
    copy_dir_into(source, destination, &mut files)?;
    Ok(CopyOutcome::Copied { files })
}

fn copy_dir_into(src: &Path, dst: &Path, files: &mut u64) -> Result<(), CopyError> {
    let io_err = |source| CopyError::Io {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    };

    if dst.exists() && !dst.is_dir() {
        return Err(CopyError::KindMismatch {
            from: src.to_path_buf(),
            to: dst.to_path_buf(),
        });
    }
    std::fs::create_dir_all(dst).map_err(io_err)?;

    // Sorted by name.
    let mut entries = std::fs::read_dir(src)
        .and_then(|rd| rd.collect::<std::io::Result<Vec<_>>>())
        .map_err(io_err)?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in entries {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_into(&src_path, &dst_path, files)?;
        } else {
            if dst_path.is_dir() {
                return Err(CopyError::KindMismatch {
                    from: src_path,
                    to: dst_path,
                });
            }
            std::fs::copy(&src_path, &dst_path).map_err(|source| CopyError::Io {
                from: src_path.clone(),
                to: dst_path.clone(),
                source,
            })?;
            *files += 1;
        }
    }
    Ok(())
}
