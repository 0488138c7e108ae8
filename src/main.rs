use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dist_overlay::cli::Cli;
use dist_overlay::commands::build;
use dist_overlay::error::{ExitStatus, OverlayError};
use dist_overlay::logging::{self, Log, Logger};

const COMMAND: &str = "build";

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose, COMMAND);
    let log = Arc::new(Logger::new(COMMAND));

    let status = match run(&args, &log) {
        Ok(()) => ExitStatus::Success,
        Err(e) => {
            if log.failure_count() == 0 {
                log.error(&format!("{e:#}"));
            }
            e.downcast_ref::<OverlayError>()
                .map_or(ExitStatus::Failure, OverlayError::exit_status)
        }
    };
    log.print_summary();
    status.into()
}

fn run(args: &Cli, log: &Arc<Logger>) -> anyhow::Result<()> {
    let report = build::run(&args.to_run_options(), Arc::clone(log) as Arc<dyn Log>)?;
    log.info(&report.describe());
    Ok(())
}
