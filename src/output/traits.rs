//! Notification traits and sinks
//!
//! This module defines the reporting interface the checker talks to and
//! the sinks that deliver notifications to the user.

use std::fmt;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// How urgent a notification is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        write!(f, "{}", label)
    }
}

/// A single human-readable message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Delivers notifications to the user
///
/// The checker only emits; where the message ends up (console, log,
/// a dialog) is up to the implementation.
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

/// Prints notifications to stdout, errors to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: &Notification) {
        match notification.severity {
            Severity::Error => eprintln!("{}", notification),
            Severity::Info | Severity::Warning => println!("{}", notification),
        }
    }
}

/// Sends notifications to the `tracing` subscriber
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notification: &Notification) {
        match notification.severity {
            Severity::Info => tracing::info!("{}", notification.message),
            Severity::Warning => tracing::warn!("{}", notification.message),
            Severity::Error => tracing::error!("{}", notification.message),
        }
    }
}

/// Keeps notifications in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub notifications: Vec<Notification>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received with the given severity
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.notifications
            .iter()
            .filter(|n| n.severity == severity)
            .map(|n| n.message.as_str())
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_display() {
        assert_eq!(
            Notification::warning("Websites down: alpha").to_string(),
            "[WARNING] Websites down: alpha"
        );
        assert_eq!(Notification::info("x").severity, Severity::Info);
        assert_eq!(Notification::error("x").severity, Severity::Error);
    }

    #[test]
    fn test_memory_notifier_filters_by_severity() {
        let mut notifier = MemoryNotifier::new();
        notifier.notify(&Notification::info("one"));
        notifier.notify(&Notification::warning("two"));
        notifier.notify(&Notification::info("three"));

        assert_eq!(notifier.notifications.len(), 3);
        assert_eq!(notifier.messages(Severity::Info), vec!["one", "three"]);
        assert_eq!(notifier.messages(Severity::Warning), vec!["two"]);
        assert!(notifier.messages(Severity::Error).is_empty());
    }
}
