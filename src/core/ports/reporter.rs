//! Reporter port
//!
//! The logging collaborator handed to every component that emits
//! diagnostics. Components never configure logging themselves; the caller
//! decides where messages go and how verbose they are.

use log::Level;

/// Sink for human-readable diagnostics
pub trait Reporter: Send + Sync {
    /// Check whether messages at `level` would be kept
    fn enabled(&self, level: Level) -> bool;

    /// Emit a message
    fn report(&self, level: Level, message: &str);

    /// Emit at error level
    fn error(&self, message: &str) {
        if self.enabled(Level::Error) {
            self.report(Level::Error, message);
        }
    }

    /// Emit at warn level
    fn warn(&self, message: &str) {
        if self.enabled(Level::Warn) {
            self.report(Level::Warn, message);
        }
    }

    /// Emit at info level
    fn info(&self, message: &str) {
        if self.enabled(Level::Info) {
            self.report(Level::Info, message);
        }
    }

    /// Emit at debug level
    fn debug(&self, message: &str) {
        if self.enabled(Level::Debug) {
            self.report(Level::Debug, message);
        }
    }
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn report(&self, _level: Level, _message: &str) {}
}
