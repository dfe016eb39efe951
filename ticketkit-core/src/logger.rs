//! Bridge from the `log` facade to a logger supplied by the host app.
//!
//! Every record emitted inside the core goes through [`log`]. Once the host calls
//! [`set_logger`], records are forwarded to its [`Logger`] implementation, with
//! debug and trace output from dependencies filtered out.

use std::sync::{Arc, OnceLock};

/// Receives log messages emitted by `TicketKit`.
///
/// Implemented by the host app and exported via `UniFFI`.
///
/// # Examples
///
/// ```rust
/// use ticketkit_core::logger::{LogLevel, Logger};
///
/// struct ConsoleLogger;
///
/// impl Logger for ConsoleLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         println!("[{level:?}] {message}");
///     }
/// }
/// ```
///
/// ## Swift
///
/// ```swift
/// final class TicketKitLoggerBridge: TicketKit.Logger {
///     static let shared = TicketKitLoggerBridge()
///
///     func log(level: TicketKit.LogLevel, message: String) {
///         os_log("%{public}@", message)
///     }
/// }
///
/// TicketKit.setLogger(logger: TicketKitLoggerBridge.shared) // once, at launch
/// ```
#[uniffi::export(with_foreign)]
pub trait Logger: Sync + Send {
    /// Records a message forwarded from the core.
    ///
    /// # Arguments
    ///
    /// * `level` - Severity of the record.
    /// * `message` - Formatted record text. Credentials and tokens never appear here.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a log message.
///
/// Mirrors [`log::Level`] so hosts can map it onto `os_log` or `android.util.Log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum LogLevel {
    /// Very detailed diagnostics.
    Trace,
    /// Debugging information.
    Debug,
    /// Normal progress.
    Info,
    /// Something unexpected that the operation recovered from.
    Warn,
    /// A failed operation.
    Error,
}

/// Converts a `log::Level` to the exported [`LogLevel`].
///
/// The mapping is one to one.
impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// `log::Log` implementation that forwards records to the host [`Logger`].
///
/// Installed as the global logger by [`set_logger`].
struct ForeignLogger;

/// Debug and trace records are only forwarded when they come from `TicketKit` itself,
/// so that dependencies such as `reqwest` do not flood the host log.
fn should_forward(level: log::Level, module_path: Option<&str>) -> bool {
    let is_verbose = matches!(level, log::Level::Debug | log::Level::Trace);
    !is_verbose || module_path.is_some_and(|path| path.starts_with("ticketkit"))
}

impl log::Log for ForeignLogger {
    /// Accepts every record. Filtering by origin happens in `log`.
    ///
    /// # Arguments
    ///
    /// * `_metadata` - Metadata about the record.
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    /// Forwards `record` to the host logger.
    ///
    /// Debug and trace records from outside `ticketkit` modules are dropped. If no
    /// host logger is installed the record goes to stderr.
    ///
    /// # Arguments
    ///
    /// * `record` - The record with its message and metadata.
    fn log(&self, record: &log::Record) {
        if !should_forward(record.level(), record.module_path()) {
            return;
        }

        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(record.level().into(), record.args().to_string());
        } else {
            eprintln!("Logger not set: {}", record.args());
        }
    }

    /// Flushes buffered records.
    ///
    /// Records are handed to the host immediately, so there is nothing to flush.
    fn flush(&self) {}
}

/// Installs the host logger and routes the `log` facade to it.
///
/// Call once at app launch. Later calls leave the first logger in place and
/// print a notice to stderr.
///
/// # Arguments
///
/// * `logger` - Host implementation of [`Logger`].
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>) {
    if LOGGER_INSTANCE.set(logger).is_err() {
        eprintln!("Logger already set");
        return;
    }

    static LOGGER: ForeignLogger = ForeignLogger;
    if let Err(e) = log::set_logger(&LOGGER) {
        eprintln!("Failed to set logger: {e}");
        return;
    }
    log::set_max_level(log::LevelFilter::Trace);
}
