//! JSON document decoding.
//!
//! The manifest reader only depends on [`parse`] and [`load_optional`]; the
//! concrete decoder is `serde_json`.
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ManifestError;

/// Decode `bytes` into `T`.
///
/// Unknown fields are ignored unless `T` opts into `deny_unknown_fields`.
///
/// # Errors
///
/// Returns the decoder error if `bytes` is not valid JSON or does not match
/// the shape of `T`.
pub fn parse<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    serde_json::from_slice(bytes)
}

/// Read and decode the JSON file at `path`.
///
/// Returns `Ok(None)` when the file does not exist, so callers can tell an
/// absent document apart from an empty one.
///
/// # Errors
///
/// Returns [`ManifestError::Io`] if the file exists but cannot be read, and
/// [`ManifestError::Parse`] if its contents cannot be decoded.
pub fn load_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ManifestError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ManifestError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    parse(&bytes).map(Some).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
