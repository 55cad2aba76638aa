#![cfg(feature = "std")]

use log::{self, LevelFilter, Metadata, Record, SetLoggerError};
use std::env;

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    // stderr, so JSON on stdout stays clean.
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

/// Install the logger with a level taken from `BATTLESHIP_LOG`
/// (`error`, `warn`, `info`, `debug`, `trace`). Falls back to `default`.
///
/// Fails if a logger is already installed; the level is left untouched then.
pub fn init_logging(default: LevelFilter) -> Result<(), SetLoggerError> {
    let level = env::var("BATTLESHIP_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(default);
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected() {
        assert!(init_logging(LevelFilter::Warn).is_ok());
        let level = log::max_level();
        assert!(init_logging(LevelFilter::Trace).is_err());
        assert_eq!(log::max_level(), level);
    }
}
