//! The `build.json` manifest: ordered overlay directives.
//!
//! Only the top-level shape is strict: the document must be valid JSON and
//! `copy`, when present, must be an array. Individual entries are decoded
//! leniently so that one malformed directive is reported and skipped by the
//! resolver instead of failing the whole run.
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::json_loader;
use crate::error::ManifestError;

/// File name of the manifest inside a package root.
pub const MANIFEST_FILE: &str = "build.json";

/// A manifest value that either has the expected shape or is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    /// Decoded as `T`.
    Valid(T),
    /// Anything else, kept so the resolver can say what it found.
    Invalid(Value),
}

/// One entry of the manifest's `copy` array.
pub type CopyEntry = Lenient<CopyDirective>;

/// Decoded `build.json`.
///
/// # Examples
///
/// ```
/// use dist_overlay::config::manifest::{Lenient, Manifest};
///
/// let m = Manifest::from_slice(br#"{"copy":[{"from":".","configs":["base"]}, 7]}"#).unwrap();
/// assert_eq!(m.copy.len(), 2);
/// let Lenient::Valid(first) = &m.copy[0] else { panic!("first entry is well formed") };
/// assert_eq!(first.source(), Some("."));
/// assert_eq!(first.config_names(), vec!["base"]);
/// assert!(matches!(m.copy[1], Lenient::Invalid(_)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Overlay directives in declaration order. Absent means no overlays.
    #[serde(default)]
    pub copy: Vec<CopyEntry>,
}

/// A well-formed `copy` entry: a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CopyDirective {
    /// Source package directory, relative to the package root.
    #[serde(default)]
    pub from: Option<Lenient<String>>,
    /// Config names to overlay from `<from>/src/configs/`.
    #[serde(default)]
    pub configs: Vec<Lenient<String>>,
}

impl CopyDirective {
    /// Build a directive from plain strings.
    #[must_use]
    pub fn new(from: Option<&str>, configs: &[&str]) -> Self {
        Self {
            from: from.map(|f| Lenient::Valid(f.to_string())),
            configs: configs
                .iter()
                .map(|c| Lenient::Valid((*c).to_string()))
                .collect(),
        }
    }

    /// The `from` value if it is a non-empty string.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match &self.from {
            Some(Lenient::Valid(from)) if !from.is_empty() => Some(from),
            _ => None,
        }
    }

    /// The config names that are strings, in order.
    #[must_use]
    pub fn config_names(&self) -> Vec<&str> {
        self.configs
            .iter()
            .filter_map(|c| match c {
                Lenient::Valid(name) => Some(name.as_str()),
                Lenient::Invalid(_) => None,
            })
            .collect()
    }
}

/// Name of the JSON type of `value`, for warnings.
#[must_use]
pub const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object with mistyped fields",
    }
}

impl Manifest {
    /// Decode a manifest from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the bytes are not valid JSON, the
    /// document is not an object, or `copy` is not an array.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        json_loader::parse(bytes)
    }

    /// Load `build.json` from `package_root`.
    ///
    /// Returns `Ok(None)` if the package has no manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be read or decoded.
    pub fn load(package_root: &Path) -> Result<Option<Self>, ManifestError> {
        json_loader::load_optional(&package_root.join(MANIFEST_FILE))
    }
}
