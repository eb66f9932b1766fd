//! Log setup and the debug-only logging macros.
//!
//! The full-screen UI owns the terminal, so in that mode log lines go to
//! `<cache dir>/wordle-assistant/wordle-assistant.log` instead of stderr.

use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Where log lines should be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    File,
}

/// Maps the number of `-v` flags to a level, starting from `warn`.
#[must_use]
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[must_use]
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| {
        dir.join(env!("CARGO_PKG_NAME"))
            .join(concat!(env!("CARGO_PKG_NAME"), ".log"))
    })
}

/// Installs the global logger. `RUST_LOG` wins over `verbosity` when set.
///
/// Fails if the log file cannot be opened or a logger is already installed.
pub fn init(verbosity: u8, destination: LogDestination) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(
        level_for_verbosity(verbosity).as_str().to_lowercase(),
    ));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if destination == LogDestination::File
        && let Some(path) = log_file_path()
    {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}
