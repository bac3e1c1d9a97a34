//! FILENAME: app/cli/src/logging.rs
// PURPOSE: Unified logging for the CLI.
// CONTEXT: A tracing-subscriber `fmt` subscriber with a custom event format
// turns every event into one line `seq|level|category|message`, written to
// the log file when one is configured and to stderr otherwise. The library
// crates log through the `log` facade with short upper-case targets (CLEAN,
// XLSX); `try_init` installs the log bridge, and their target arrives in the
// `log.target` field.

use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// UNIFIED LOGGING SYSTEM
// ============================================================================

/// Global sequence counter, one per emitted line.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Render one line in unified format.
pub fn format_line(seq: u64, level: &str, category: &str, message: &str) -> String {
    format!("{}|{}|{}|{}", seq, level, category, message)
}

/// Category column for an event target. Module-path targets from third-party
/// crates collapse to their crate name.
pub fn category(target: &str) -> String {
    target.split("::").next().unwrap_or(target).to_uppercase()
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

/// Event format producing the unified line.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnifiedFormat;

impl<S, N> FormatEvent<S, N> for UnifiedFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = LineFields::default();
        event.record(&mut fields);

        let metadata = event.metadata();
        let category = category(fields.log_target.as_deref().unwrap_or(metadata.target()));
        let message = fields.into_message();
        writeln!(
            writer,
            "{}",
            format_line(next_seq(), metadata.level().as_str(), &category, &message)
        )
    }
}

/// Collects the message, the bridged `log` target, and any other fields as
/// ` key=value` pairs to go after the message.
#[derive(Default)]
struct LineFields {
    message: String,
    extra: String,
    log_target: Option<String>,
}

impl LineFields {
    fn into_message(self) -> String {
        self.message + &self.extra
    }
}

impl Visit for LineFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "log.target" => self.log_target = Some(value.to_string()),
            name if name.starts_with("log.") => {}
            name => self.extra.push_str(&format!(" {}={}", name, value)),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            name if name.starts_with("log.") => {}
            name => self.extra.push_str(&format!(" {}={:?}", name, value)),
        }
    }
}

/// Install the unified subscriber. The log file, if any, is truncated.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            install(config.level, Mutex::new(file))
        }
        None => install(config.level, io::stderr),
    }
}

fn install<W>(level: LevelFilter, writer: W) -> Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(writer)
        .event_format(UnifiedFormat)
        .try_init()
        .map_err(|e| anyhow!("logger already installed: {}", e))
}
