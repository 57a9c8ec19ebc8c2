// ── Function logger ──
//
// Emits a tracing event tagged with the function name and returns the
// formatted line, so the line can be forwarded to chat as-is. The level
// tags written here are the markers the dispatcher recognizes to skip its
// own prefix.

use std::fmt::Display;

use tracing::{Level, debug, error, info, warn};

/// Level tags written at the start of every logger line.
pub const LOG_MARKERS: [&str; 4] = ["[INFO]", "[WARN]", "[ERROR]", "[DEBUG]"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionLogger {
    function: String,
}

impl FunctionLogger {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
        }
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn info(&self, message: impl Display) -> String {
        info!(function = %self.function, "{message}");
        self.line(Level::INFO, &message)
    }

    pub fn warn(&self, message: impl Display) -> String {
        warn!(function = %self.function, "{message}");
        self.line(Level::WARN, &message)
    }

    pub fn error(&self, message: impl Display) -> String {
        error!(function = %self.function, "{message}");
        self.line(Level::ERROR, &message)
    }

    pub fn debug(&self, message: impl Display) -> String {
        debug!(function = %self.function, "{message}");
        self.line(Level::DEBUG, &message)
    }

    /// `"[LEVEL] {function} >>> {message}"`
    fn line(&self, level: Level, message: &dyn Display) -> String {
        format!("[{level}] {} >>> {message}", self.function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_start_with_a_recognized_marker() {
        let logger = FunctionLogger::new("billing-sync");
        let lines = [
            logger.info("started"),
            logger.warn("slow"),
            logger.error("boom"),
            logger.debug("payload"),
        ];
        for (line, marker) in lines.iter().zip(LOG_MARKERS) {
            assert!(line.starts_with(marker), "{line} should start with {marker}");
        }
        assert_eq!(lines[0], "[INFO] billing-sync >>> started");
    }
}
