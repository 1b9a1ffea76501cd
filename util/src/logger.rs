//! Generic logger utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use fern;
use log::{self, info};
use std::fmt;
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Crates whose name is dropped from log targets.
const TRIMMED_CRATES: [&str; 3] = ["arm_lib", "arm_exec", "util"];

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// Messages are written to stdout and to the session's log file, prefixed
/// with the number of seconds elapsed since the session started.
///
/// # Notes
///
/// - `min_level` must be `INFO` or more verbose, startup information is
///   logged at `INFO` and must never be filtered out.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    min_level: self::LevelFilter,
    session: &session::Session,
) -> Result<(), LoggerInitError> {
    if min_level < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level));
    }

    let log_file = fern::log_file(session.log_file_path.clone())
        .map_err(LoggerInitError::LogFileInitError)?;

    fern::Dispatch::new()
        .format(|out, message, record| format_record(out, message, record))
        .level(min_level)
        .chain(std::io::stdout())
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Log level: {:?}", min_level);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Format a single log line.
///
/// Debug and trace lines include the (shortened) target so the module which
/// emitted them can be found.
fn format_record(out: fern::FormatCallback, message: &fmt::Arguments, record: &log::Record) {
    if record.level() > log::Level::Info {
        out.finish(format_args!(
            "[{:10.6} {}] {}: {}",
            session::get_elapsed_seconds(),
            level_to_str(record.level()),
            short_target(record.target()),
            message
        ))
    } else {
        out.finish(format_args!(
            "[{:10.6} {}] {}",
            session::get_elapsed_seconds(),
            level_to_str(record.level()),
            message
        ))
    }
}

/// Strip the crate name from targets in this workspace.
fn short_target(target: &str) -> &str {
    for prefix in TRIMMED_CRATES.iter() {
        if let Some(rest) = target.strip_prefix(prefix) {
            if let Some(module) = rest.strip_prefix("::") {
                return module;
            }
        }
    }

    target
}

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info => "INF".normal(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_level_to_str() {
        // Compare the uncoloured text, colouring depends on the terminal
        assert_eq!(&*level_to_str(log::Level::Info), "INF");
        assert_eq!(&*level_to_str(log::Level::Warn), "WRN");
        assert_eq!(&*level_to_str(log::Level::Trace), "TRC");
    }

    #[test]
    fn test_short_target() {
        assert_eq!(
            short_target("arm_lib::arm_ctrl::inverse_kinematics"),
            "arm_ctrl::inverse_kinematics"
        );
        assert_eq!(short_target("util::session"), "session");
        assert_eq!(short_target("arm_exec"), "arm_exec");
        assert_eq!(short_target("arm_library::servo"), "arm_library::servo");
        assert_eq!(short_target("csv::writer"), "csv::writer");
    }
}
