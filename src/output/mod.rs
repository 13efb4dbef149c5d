//! Output module for reporting check results
//!
//! This module handles:
//! - Collecting the four result categories of a run
//! - Turning them into notifications with a severity
//! - Delivering notifications to the console, the log or memory
//! - Writing an optional markdown summary

mod markdown;
mod report;
mod traits;

pub use markdown::{format_markdown_summary, write_markdown_summary};
pub use report::CheckReport;
pub use traits::{
    ConsoleNotifier, MemoryNotifier, Notification, Notifier, OutputError, OutputResult, Severity,
    TracingNotifier,
};
