use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Output sink kind attached to a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Daily-rotating log file.
    File,
    /// Stderr console output.
    Console,
}

/// Runtime-adjustable level threshold.
///
/// Post-setup mutation is unsynchronized with concurrent reads on purpose;
/// relaxed ordering is enough for a monotonic "lower to DEBUG" adjustment.
pub(crate) struct LevelFlag(AtomicUsize);

const LEVELS: [LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

impl LevelFlag {
    pub(crate) fn new(filter: LevelFilter) -> Self {
        Self(AtomicUsize::new(filter as usize))
    }

    pub(crate) fn get(&self) -> LevelFilter {
        LEVELS[self.0.load(Ordering::Relaxed)]
    }

    pub(crate) fn set(&self, filter: LevelFilter) {
        self.0.store(filter as usize, Ordering::Relaxed);
    }
}

/// Formats one record the way every kilink sink does:
/// `<timestamp>  <logger name, 22 cols>  <LEVEL, 8 cols> <message>`.
fn format_record(out: fern::FormatCallback, message: &std::fmt::Arguments, record: &Record) {
    out.finish(format_args!(
        "{}  {:<22}  {:<8} {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
    ));
}

struct HandlerInner {
    kind: HandlerKind,
    level: LevelFlag,
    sink: Box<dyn Log>,
}

/// An output sink with its own severity threshold and the shared line format.
///
/// Cloning shares the underlying sink and threshold; loggers that receive the
/// same `Handler` write to the same file descriptor and see each other's
/// level adjustments.
#[derive(Clone)]
pub struct Handler(Arc<HandlerInner>);

impl Handler {
    fn new(kind: HandlerKind, default_level: LevelFilter, output: fern::Output) -> Self {
        let (_, sink) = fern::Dispatch::new()
            .format(format_record)
            .chain(output)
            .into_log();
        Self(Arc::new(HandlerInner {
            kind,
            level: LevelFlag::new(default_level),
            sink,
        }))
    }

    /// Daily-rotating file handler writing `<prefix><YYYY-MM-DD>`.
    ///
    /// The file itself is opened lazily on the first record; the parent
    /// directory must already exist. Rotated files are kept indefinitely.
    /// Defaults to pass-through (TRACE): what reaches the file is governed
    /// by the logger level, so a DEBUG-level logger still reaches the file
    /// in production.
    #[must_use]
    pub fn daily_file(prefix: PathBuf) -> Self {
        let output = fern::DateBased::new(prefix, "%Y-%m-%d");
        Self::new(HandlerKind::File, LevelFilter::Trace, output.into())
    }

    /// Stderr console handler, DEBUG threshold.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(HandlerKind::Console, LevelFilter::Debug, std::io::stderr().into())
    }

    /// Test-only handler collecting formatted lines into a shared vector.
    #[cfg(test)]
    pub(crate) fn collecting(
        default_level: LevelFilter,
        lines: Arc<std::sync::Mutex<Vec<String>>>,
    ) -> Self {
        let output = fern::Output::call(move |record| {
            lines
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(record.args().to_string());
        });
        Self::new(HandlerKind::Console, default_level, output)
    }

    #[must_use]
    pub fn kind(&self) -> HandlerKind {
        self.0.kind
    }

    #[must_use]
    pub fn level(&self) -> LevelFilter {
        self.0.level.get()
    }

    pub fn set_level(&self, filter: LevelFilter) {
        self.0.level.set(filter);
    }

    /// Whether two `Handler` values are the same shared object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn passes(&self, level: Level) -> bool {
        level <= self.0.level.get()
    }
}

impl Log for Handler {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.passes(metadata.level())
    }

    fn log(&self, record: &Record) {
        if self.passes(record.level()) {
            self.0.sink.log(record);
        }
    }

    fn flush(&self) {
        self.0.sink.flush();
    }
}
