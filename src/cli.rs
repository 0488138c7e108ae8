use std::path::PathBuf;

use clap::Parser;

use crate::config::RunOptions;

/// Build a package's `dist/` tree from `src/` and the overlays in `build.json`.
#[derive(Parser, Debug)]
#[command(
    name = "dist-overlay",
    about = "Copy src/ into dist/ and overlay named configs from build.json",
    version = option_env!("DIST_OVERLAY_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Package root (defaults to the current directory)
    #[arg(short = 'p', long, value_name = "DIR")]
    pub package: Option<PathBuf>,

    /// Preview operations without writing anything
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Options for [`commands::build::run`](crate::commands::build::run).
    #[must_use]
    pub fn to_run_options(&self) -> RunOptions {
        RunOptions {
            package: self.package.clone(),
            dry_run: self.dry_run,
        }
    }
}
