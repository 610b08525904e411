//! `Reporter` implementation that forwards to the `log` facade

use log::{Level, LevelFilter};

use crate::core::ports::Reporter;

/// Log target used for every forwarded message
pub const LOG_TARGET: &str = "taskpack";

/// Forwards messages at or above a configured level to `log`
///
/// The backend (e.g. `env_logger`) is installed by the binary; this type
/// only decides what is worth forwarding.
#[derive(Debug, Clone, Copy)]
pub struct LogReporter {
    level: LevelFilter,
}

impl Default for LogReporter {
    fn default() -> Self {
        Self::new(LevelFilter::Info)
    }
}

impl LogReporter {
    /// Create a reporter that keeps messages up to `level`
    #[must_use]
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Debug detail when verbose, info otherwise
    #[must_use]
    pub const fn from_verbosity(verbose: bool) -> Self {
        if verbose {
            Self::new(LevelFilter::Debug)
        } else {
            Self::new(LevelFilter::Info)
        }
    }

    /// Configured level
    #[must_use]
    pub const fn level(&self) -> LevelFilter {
        self.level
    }
}

impl Reporter for LogReporter {
    fn enabled(&self, level: Level) -> bool {
        level <= self.level && log::log_enabled!(target: LOG_TARGET, level)
    }

    fn report(&self, level: Level, message: &str) {
        log::log!(target: LOG_TARGET, level, "{message}");
    }
}
