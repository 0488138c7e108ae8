//! Overlay resolution: turn manifest directives into concrete config copies.
//!
//! For every directive, `from` is resolved against the package root and each
//! listed config name maps
//!
//! ```text
//! <root>/<from>/src/configs/<name>  ->  <root>/dist/configs/<name>
//! ```
//!
//! Order is preserved (directives first, then configs within a directive), so
//! when two copies target the same config the later one wins. Anything that
//! cannot be resolved is skipped with a warning; resolution itself never
//! fails.
use std::path::{Path, PathBuf};

use crate::config::manifest::{CopyEntry, Lenient, json_kind};
use crate::config::{CONFIGS_DIR, SRC_DIR};
use crate::logging::Log;

/// One resolved config overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCopy {
    /// Config name as written in the manifest.
    pub name: String,
    /// `<from>/src/configs/<name>`.
    pub source: PathBuf,
    /// `<dist>/configs/<name>`.
    pub destination: PathBuf,
}

/// Resolve `entries` into an ordered list of config copies.
///
/// Skips, with a warning naming the entry index:
/// - entries that are not a directive object (or whose fields have the
///   wrong JSON type),
/// - directives without a `from` string (missing, empty or mistyped),
/// - directives whose `from` is not an existing directory,
/// - config names that are not strings or not a single path segment,
/// - configs whose source subtree does not exist.
///
/// All checks only read the filesystem, so a dry run resolves exactly the
/// same list as a real run provided nothing has been written yet.
pub fn resolve(
    package_root: &Path,
    dist_root: &Path,
    entries: &[CopyEntry],
    log: &dyn Log,
) -> Vec<ConfigCopy> {
    let dist_configs = dist_root.join(CONFIGS_DIR);
    let mut copies = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let directive = match entry {
            Lenient::Valid(directive) => directive,
            Lenient::Invalid(value) => {
                log.warn(&format!(
                    "copy[{index}]: malformed directive, expected {{\"from\": string, \"configs\": [string]}} but found {}, skipping",
                    json_kind(value)
                ));
                continue;
            }
        };

        let from = match (&directive.from, directive.source()) {
            (_, Some(from)) => from,
            (Some(Lenient::Invalid(value)), None) => {
                log.warn(&format!(
                    "copy[{index}]: 'from' must be a string but found {}, skipping {} config(s)",
                    json_kind(value),
                    directive.configs.len()
                ));
                continue;
            }
            (_, None) => {
                log.warn(&format!(
                    "copy[{index}]: missing 'from' field, skipping {} config(s)",
                    directive.configs.len()
                ));
                continue;
            }
        };

        let package_dir = package_root.join(from);
        if !package_dir.is_dir() {
            log.warn(&format!(
                "copy[{index}]: source package not found: {}, skipping",
                package_dir.display()
            ));
            continue;
        }

        if directive.configs.is_empty() {
            log.debug(&format!("copy[{index}]: no configs listed for '{from}'"));
            continue;
        }

        let configs_root = package_dir.join(SRC_DIR).join(CONFIGS_DIR);
        for name in &directive.configs {
            let name = match name {
                Lenient::Valid(name) => name,
                Lenient::Invalid(value) => {
                    log.warn(&format!(
                        "copy[{index}]: config name must be a string but found {}, skipping",
                        json_kind(value)
                    ));
                    continue;
                }
            };

            if let Some(reason) = invalid_config_name(name) {
                log.warn(&format!(
                    "copy[{index}]: invalid config name '{name}' ({reason}), skipping"
                ));
                continue;
            }

            let source = configs_root.join(name);
            if !source.is_dir() {
                log.warn(&format!(
                    "copy[{index}]: config '{name}' not found at {}, skipping",
                    source.display()
                ));
                continue;
            }

            copies.push(ConfigCopy {
                name: name.clone(),
                source,
                destination: dist_configs.join(name),
            });
        }
    }

    copies
}

/// Return why `name` cannot be used as a config directory name, if it can't.
fn invalid_config_name(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("empty name")
    } else if name.contains(['/', '\\']) {
        Some("contains a path separator")
    } else if name == "." || name == ".." {
        Some("not a directory name")
    } else {
        None
    }
}
