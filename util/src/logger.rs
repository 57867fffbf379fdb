//! Logger setup
//!
//! All executables log through `log`, dispatched by `fern` to stdout and the session's log file.
//! Each line carries the seconds elapsed since the session started.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{self, info};
use serde::Deserialize;
use std::{collections::BTreeMap, fmt};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Logging parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct LogParams {
    /// Lowest level logged, one of `info`, `debug` or `trace`
    #[serde(default = "default_level")]
    pub level: String,

    /// Levels for individual modules, overriding `level`, keyed by module path
    #[serde(default)]
    pub modules: BTreeMap<String, String>,

    /// Whether to also log to stdout
    #[serde(default = "default_stdout")]
    pub stdout: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Unknown log level \"{0}\"")]
    UnknownLevel(String),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LogParams {
    /// Parameters logging everything at or above `level` to stdout and the log file.
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level: level.to_string(),
            modules: BTreeMap::new(),
            stdout: true,
        }
    }

    /// The lowest level logged, which must be at least `INFO`.
    pub fn min_level(&self) -> Result<LevelFilter, LoggerInitError> {
        let level = parse_level(&self.level)?;

        if level < log::Level::Info {
            return Err(LoggerInitError::InvalidMinLogLevel(level));
        }

        Ok(level)
    }

    /// Per-module level overrides.
    pub fn module_levels(&self) -> Result<Vec<(String, LevelFilter)>, LoggerInitError> {
        self.modules
            .iter()
            .map(|(m, l)| Ok((m.clone(), parse_level(l)?)))
            .collect()
    }
}

impl Default for LogParams {
    fn default() -> Self {
        Self::new(LevelFilter::Info)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution, logging everything at or above `min_level`.
///
/// # Notes
///
/// - `min_level` must be at least `log::Level::Info`.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    min_level: LevelFilter,
    session: &session::Session,
) -> Result<(), LoggerInitError> {
    logger_init_with(&LogParams::new(min_level), session)
}

/// Initialise the logger for this execution from parameters.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init_with(
    params: &LogParams,
    session: &session::Session,
) -> Result<(), LoggerInitError> {
    let min_level = params.min_level()?;
    let module_levels = params.module_levels()?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}",
                LogLine {
                    elapsed_s: session::get_elapsed_seconds(),
                    level: record.level(),
                    target: record.target(),
                    message,
                }
            ))
        })
        .level(min_level);

    for (module, level) in module_levels.iter() {
        dispatch = dispatch.level_for(module.clone(), *level);
    }

    if params.stdout {
        dispatch = dispatch.chain(std::io::stdout());
    }

    let log_file =
        fern::log_file(&session.log_file_path).map_err(LoggerInitError::LogFileInitError)?;

    dispatch
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Log level: {:?}", min_level);
    for (module, level) in module_levels.iter() {
        info!("    {}: {:?}", module, level);
    }
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE ITEMS
// ---------------------------------------------------------------------------

/// One formatted log line.
///
/// Debug and trace lines include the record's target, others don't.
struct LogLine<'a, M> {
    elapsed_s: f64,
    level: log::Level,
    target: &'a str,
    message: M,
}

impl<'a, M: fmt::Display> fmt::Display for LogLine<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.level > log::Level::Info {
            write!(
                f,
                "[{:10.6} {}] {}: {}",
                self.elapsed_s,
                level_to_str(self.level),
                self.target,
                self.message
            )
        } else {
            write!(
                f,
                "[{:10.6} {}] {}",
                self.elapsed_s,
                level_to_str(self.level),
                self.message
            )
        }
    }
}

fn default_level() -> String {
    "info".into()
}

fn default_stdout() -> bool {
    true
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggerInitError> {
    level
        .trim()
        .parse()
        .map_err(|_| LoggerInitError::UnknownLevel(level.to_string()))
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
    fn test_params() {
        let params: LogParams = crate::params::from_str(
            r#"
            level = "debug"
            stdout = false

            [modules]
            "plan_lib::route" = "trace"
            "#,
        )
        .unwrap();

        assert_eq!(params.min_level().unwrap(), LevelFilter::Debug);
        assert!(!params.stdout);
        assert_eq!(
            params.module_levels().unwrap(),
            vec![("plan_lib::route".to_string(), LevelFilter::Trace)]
        );
    }

    #[test]
    fn test_min_level() {
        assert_eq!(
            LogParams::default().min_level().unwrap(),
            LevelFilter::Info
        );
        assert!(matches!(
            LogParams::new(LevelFilter::Warn).min_level(),
            Err(LoggerInitError::InvalidMinLogLevel(LevelFilter::Warn))
        ));

        let mut params = LogParams::default();
        params.level = "loud".into();
        assert!(matches!(
            params.min_level(),
            Err(LoggerInitError::UnknownLevel(_))
        ));
    }

    #[test]
    fn test_log_line() {
        colored::control::set_override(false);

        let info = LogLine {
            elapsed_s: 1.5,
            level: log::Level::Info,
            target: "plan_lib::plugin",
            message: "OK",
        };
        assert_eq!(info.to_string(), "[  1.500000 INF] OK");

        let debug = LogLine {
            level: log::Level::Debug,
            ..info
        };
        assert_eq!(debug.to_string(), "[  1.500000 DBG] plan_lib::plugin: OK");
    }
}
