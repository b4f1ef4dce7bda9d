//! Logger module
//!
//! Console logging for the mock server:
//! - Server lifecycle logging (startup banner, shutdown)
//! - Access logging with multiple formats
//! - Error and warning logging
//!
//! Stdout carries the startup banner and the shutdown message only; every
//! other line goes to stderr.

mod format;

pub use format::AccessLogEntry;

use crate::config::AccessLogFormat;

/// Console stream a line is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogTarget {
    Stdout,
    Stderr,
}

/// Kind of log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogEvent {
    Banner,
    Shutdown,
    Signal,
    Access,
    Warning,
    Error,
}

impl LogEvent {
    #[cfg(test)]
    const ALL: [Self; 6] = [
        Self::Banner,
        Self::Shutdown,
        Self::Signal,
        Self::Access,
        Self::Warning,
        Self::Error,
    ];

    const fn target(self) -> LogTarget {
        match self {
            Self::Banner | Self::Shutdown => LogTarget::Stdout,
            Self::Signal | Self::Access | Self::Warning | Self::Error => LogTarget::Stderr,
        }
    }
}

fn write(event: LogEvent, message: &str) {
    match event.target() {
        LogTarget::Stdout => println!("{message}"),
        LogTarget::Stderr => eprintln!("{message}"),
    }
}

pub fn log_server_start(base_url: &str) {
    write(
        LogEvent::Banner,
        &format!("Mock Django sentiment server running on {base_url}"),
    );
    write(
        LogEvent::Banner,
        &format!("Try: {base_url}/sentiment/analyze/eurusd/"),
    );
}

pub fn log_shutdown() {
    write(LogEvent::Shutdown, "\nShutting down server...");
}

pub fn log_signal(name: &str) {
    write(LogEvent::Signal, &format!("[SIGNAL] {name} received"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write(
        LogEvent::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_error(message: &str) {
    write(LogEvent::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write(LogEvent::Warning, &format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: AccessLogFormat) {
    write(LogEvent::Access, &entry.format(format));
}
