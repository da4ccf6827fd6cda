//! Process-wide logging setup.
//!
//! One shared named logger (`"kilink"`) owns the output handlers. The first
//! call to [`setup_logging`] creates the log directory, attaches a daily
//! rotating file handler (plus a console handler when verbose) and installs
//! the panic hook; every call then shares those same handler objects with the
//! caller-supplied logger.

pub mod handler;
mod panic_hook;

pub use self::handler::{Handler, HandlerKind};

use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use eyre::Result;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::config::Config;
use self::handler::LevelFlag;

/// Name of the shared logger every other logger borrows handlers from.
pub const NAMED_LOGGER_NAME: &str = "kilink";

/// Base name of the log file; daily files are `linkode.log.<YYYY-MM-DD>`.
pub const LOG_FILE_NAME: &str = "linkode.log";

// Guards the check-then-attach sequence on the named logger so concurrent
// first calls cannot double-attach handler sets.
static SETUP_LOCK: Mutex<()> = Mutex::new(());

struct LoggerInner {
    name: String,
    level: LevelFlag,
    handlers: RwLock<Vec<Handler>>,
}

/// A named logger: a level threshold plus a list of shared [`Handler`]s.
///
/// Cloning is cheap and shares all state, so a `Logger` can be handed to the
/// `log` facade and kept around for direct use at the same time.
#[derive(Clone)]
pub struct Logger(Arc<LoggerInner>);

impl Logger {
    /// Creates a logger with no handlers and a WARN threshold, the effective
    /// level of a logger that never went through setup.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(LoggerInner {
            name: name.into(),
            level: LevelFlag::new(LevelFilter::Warn),
            handlers: RwLock::new(Vec::new()),
        }))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[must_use]
    pub fn level(&self) -> LevelFilter {
        self.0.level.get()
    }

    pub fn set_level(&self, filter: LevelFilter) {
        self.0.level.set(filter);
    }

    /// Attaches a handler, unless that same handler object is already
    /// attached. Repeated setup on one logger is therefore a no-op.
    pub fn add_handler(&self, handler: Handler) {
        let mut handlers = self
            .0
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !handlers.iter().any(|attached| attached.ptr_eq(&handler)) {
            handlers.push(handler);
        }
    }

    /// Snapshot of the attached handlers (each sharing its sink).
    #[must_use]
    pub fn handlers(&self) -> Vec<Handler> {
        self.0
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    fn emit(&self, level: Level, message: &str) {
        // Single statement so the format_args temporaries outlive the record.
        self.log(
            &Record::builder()
                .args(format_args!("{message}"))
                .level(level)
                .target(&self.0.name)
                .build(),
        );
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.0.level.get()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        for handler in self
            .0
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            handler.log(record);
        }
    }

    fn flush(&self) {
        for handler in self
            .0
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            handler.flush();
        }
    }
}

fn named_logger_ref() -> &'static Logger {
    static NAMED: OnceLock<Logger> = OnceLock::new();
    NAMED.get_or_init(|| Logger::new(NAMED_LOGGER_NAME))
}

/// Returns the process-wide named logger (a shared clone).
#[must_use]
pub fn named_logger() -> Logger {
    named_logger_ref().clone()
}

/// Really do the setup; not thread-safe by itself.
fn configure(log_directory: &Path, verbose: bool) -> Result<()> {
    std::fs::create_dir_all(log_directory)?;

    let named = named_logger();
    let mut prefix = log_directory.join(LOG_FILE_NAME).into_os_string();
    prefix.push(".");
    named.add_handler(Handler::daily_file(prefix.into()));
    named.set_level(LevelFilter::Debug);

    if verbose {
        named.add_handler(Handler::stderr());
    }

    panic_hook::install();

    // Route `log` facade macros through the named logger too. The facade can
    // only be claimed once per process; a unit test may already hold it.
    let _ = log::set_boxed_logger(Box::new(named));
    log::set_max_level(LevelFilter::Trace);

    Ok(())
}

/// Set up the logging.
///
/// Thread-safe and idempotent: the expensive part (directory creation,
/// handler construction, panic hook) runs only for the first caller; the
/// verbose flag of that first call decides whether a console handler exists.
/// Every call attaches the named logger's handler objects to `target`,
/// shared rather than copied, and outside production lowers both the
/// handler thresholds and `target`'s level to DEBUG.
///
/// # Errors
/// * If the log directory cannot be created
pub fn setup_logging(config: &Config, target: &Logger, verbose: bool) -> Result<()> {
    {
        let _guard = SETUP_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        if named_logger_ref().handlers().is_empty() {
            configure(&config.log_directory, verbose)?;
        }
    }

    for handler in named_logger_ref().handlers() {
        if !config.is_production() {
            handler.set_level(LevelFilter::Debug);
        }
        target.add_handler(handler);
    }

    if !config.is_production() {
        target.set_level(LevelFilter::Debug);
    }

    Ok(())
}
