//! Tracing setup for the binary.
//!
//! Records go to stderr so reports on stdout stay machine-readable. A log
//! file can be attached after startup; until then the file layer discards.

use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// `timestamp LEVEL target: fields`, timestamp in local time.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if writer.has_ansi_escapes() {
            let color = match *meta.level() {
                Level::ERROR => "1;31",
                Level::WARN => "1;33",
                Level::INFO => "1;32",
                Level::DEBUG => "1;34",
                Level::TRACE => "1;35",
            };
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m \x1b[{color}m{:>5}\x1b[0m \x1b[36m{}\x1b[0m: ",
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// A writer target that can be pointed at a file after initialization.
#[derive(Clone, Default)]
struct FileSlot(Arc<Mutex<Option<File>>>);

impl FileSlot {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.lock())
    }
}

/// Picks the filter directive: an explicit flag wins, then `RUST_LOG`,
/// then the configured level.
///
/// # Errors
///
/// Fails when the chosen directive does not parse.
pub fn resolve_filter(
    flag: Option<&str>,
    configured: &str,
) -> Result<EnvFilter> {
    if let Some(directive) = flag {
        return EnvFilter::try_new(directive)
            .with_context(|| format!("invalid --log-level '{directive}'"));
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(configured)
        .with_context(|| format!("invalid log_level '{configured}' in config"))
}

/// Live controls over the installed subscriber.
pub struct LogHandle {
    level: reload::Handle<EnvFilter, Registry>,
    file: FileSlot,
}

impl LogHandle {
    /// Replaces the active filter with any `EnvFilter` directive.
    ///
    /// # Errors
    ///
    /// Fails for an unparsable directive or a dropped subscriber.
    pub fn set_level(
        &self,
        directive: &str,
    ) -> Result<()> {
        let filter = EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level '{directive}'"))?;
        self.level.reload(filter).context("log filter reload failed")
    }

    /// Also appends records to `path`, replacing any file already attached.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be opened for appending.
    pub fn log_to_file(
        &self,
        path: &Path,
    ) -> Result<()> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file '{}'", path.display()))?;
        *self.file.lock() = Some(file);
        Ok(())
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Fails when a global subscriber is already set.
pub fn init(filter: EnvFilter) -> Result<LogHandle> {
    let (level_layer, level) = reload::Layer::new(filter);
    let file = FileSlot::default();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);
    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(file.clone());

    tracing_subscriber::registry()
        .with(level_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")?;

    Ok(LogHandle { level, file })
}

#[cfg(test)]
mod tests {
    use tracing::{info, warn};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn plain_format_has_level_target_and_fields() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(LocalFmt)
            .with_writer(captured.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            warn!(country = "SG", "rate missing");
        });

        let line = captured.text();
        assert!(line.contains(" WARN salary_cli::logging::tests: "));
        assert!(line.contains("rate missing"));
        assert!(line.contains("country=\"SG\""));
        assert!(line.ends_with('\n'));
        assert!(!line.contains('\x1b'));
    }

    #[test]
    fn explicit_level_overrides_config() {
        let filter = resolve_filter(Some("debug"), "warn").unwrap();

        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn bad_directive_is_reported() {
        assert!(resolve_filter(Some("salary=loud"), "info").is_err());
    }

    #[test]
    fn file_slot_discards_until_attached() {
        let slot = FileSlot::default();
        let subscriber = tracing_subscriber::fmt()
            .event_format(LocalFmt)
            .with_writer(slot.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || info!("dropped"));

        assert!(slot.lock().is_none());
    }
}
