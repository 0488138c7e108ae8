//! Tracing subscriber setup: styled console output plus a plain-text log file.
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use console::Style;
use tracing::field::{Field, Visit};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, format::Writer};
use tracing_subscriber::registry::LookupSpan;

use super::logger::{DRY_RUN_TARGET, STAGE_TARGET, SUMMARY_TARGET};
use super::types::TaskStatus;
use super::utils::{UtcTime, log_file_path};

/// Environment variable holding a console filter directive (e.g. `debug`).
const LOG_ENV: &str = "DIST_OVERLAY_LOG";

/// The fields the console formatter cares about.
#[derive(Debug, Default)]
struct EventFields {
    message: String,
    status: Option<String>,
}

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => {
                let _ = write!(self.message, "{value:?}");
            }
            "status" => self.status = Some(format!("{value:?}")),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message.push_str(value),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Marker and colour for a summary line.
fn summary_style(status: Option<TaskStatus>) -> (&'static str, Style) {
    match status {
        Some(TaskStatus::Ok) => ("✓", Style::new().green()),
        Some(TaskStatus::NotApplicable) => ("·", Style::new().dim()),
        Some(TaskStatus::Skipped) => ("○", Style::new().yellow()),
        Some(TaskStatus::DryRun) => ("~", Style::new().white()),
        Some(TaskStatus::Failed) => ("✗", Style::new().red()),
        None => ("-", Style::new()),
    }
}

/// Console rendering: stage headers, indented messages, `[DRY RUN]` lines,
/// coloured WARN/ERROR prefixes and summary markers.
///
/// Colours come from [`console`], which turns them off when the stream is
/// not a terminal.
#[derive(Debug)]
struct ConsoleFormatter;

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut fields = EventFields::default();
        event.record(&mut fields);
        let msg = &fields.message;

        match (*metadata.level(), metadata.target()) {
            (tracing::Level::ERROR, _) => {
                writeln!(writer, "{} {msg}", Style::new().red().for_stderr().apply_to("ERROR"))
            }
            (tracing::Level::WARN, _) => {
                writeln!(writer, "{}  {msg}", Style::new().yellow().for_stderr().apply_to("WARN"))
            }
            (tracing::Level::INFO, STAGE_TARGET) => writeln!(
                writer,
                "{} {}",
                Style::new().blue().bold().apply_to("==>"),
                Style::new().bold().apply_to(msg)
            ),
            (tracing::Level::INFO, DRY_RUN_TARGET) => writeln!(
                writer,
                "  {} {msg}",
                Style::new().yellow().apply_to("[DRY RUN]")
            ),
            (tracing::Level::INFO, SUMMARY_TARGET) => {
                let status = fields.status.as_deref().and_then(TaskStatus::from_label);
                let (marker, style) = summary_style(status);
                writeln!(writer, "  {}", style.apply_to(format!("{marker} {msg}")))
            }
            (tracing::Level::INFO, _) => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  {}", Style::new().dim().apply_to(msg)),
        }
    }
}

/// Build the file layer: truncate `path`, write a run header, then append
/// every event as a timestamped plain-text line.
pub(super) fn file_layer<S>(path: &Path) -> Option<impl tracing_subscriber::Layer<S> + use<S>>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let version = option_env!("DIST_OVERLAY_VERSION")
        .unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
    let header = format!(
        "# dist-overlay {version} {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    fs::write(path, header).ok()?;
    let file = fs::OpenOptions::new().append(true).open(path).ok()?;

    Some(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_timer(UtcTime)
            .with_target(true)
            .with_writer(Mutex::new(file)),
    )
}

/// Initialise the global [`tracing`] subscriber.
///
/// Warnings and errors go to stderr, everything else to stdout. All events,
/// including `debug`, are also appended to `<cache>/dist-overlay/<command>.log`.
/// `DIST_OVERLAY_LOG`, when set, overrides the console filter chosen by
/// `verbose`. Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::default().add_directive(if verbose {
            LevelFilter::DEBUG.into()
        } else {
            LevelFilter::INFO.into()
        })
    });

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_filter);

    let log_file = log_file_path(command)
        .and_then(|path| file_layer(&path))
        .map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(log_file)
        .init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn summary_style_covers_every_status() {
        assert_eq!(summary_style(Some(TaskStatus::Ok)).0, "✓");
        assert_eq!(summary_style(Some(TaskStatus::Failed)).0, "✗");
        assert_eq!(summary_style(None).0, "-");
    }

    #[test]
    fn file_layer_fails_for_unwritable_path() {
        let tmp = tempfile::tempdir().unwrap();
        let missing_parent = tmp.path().join("no/such/dir/run.log");
        assert!(file_layer::<tracing_subscriber::Registry>(&missing_parent).is_none());
    }
}
