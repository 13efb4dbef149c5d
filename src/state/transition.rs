/// Site transition definitions for classifying check results
///
/// This module defines the categories a site can land in after a check.
use crate::output::Severity;
use std::fmt;

/// A change in a site's observed state during one check
///
/// A site can produce more than one transition per run (`Added` with `Down`,
/// or `Up` with `Changed`), but never `Changed` together with `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Transition {
    /// Site had no stored fingerprint before this run
    Added,

    /// Site content fingerprint differs from the stored one
    Changed,

    /// Site was marked down and is reachable again
    Up,

    /// Site was reachable (or new) and could not be fetched
    Down,
}

impl Transition {
    /// All transitions in report order
    pub const ALL: [Transition; 4] = [Self::Added, Self::Changed, Self::Up, Self::Down];

    /// Message prefix used when reporting this category
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Added => "Websites added",
            Self::Changed => "Websites changed",
            Self::Up => "Websites up again",
            Self::Down => "Websites down",
        }
    }

    /// Severity of the notification for this category
    pub fn severity(&self) -> Severity {
        match self {
            Self::Added | Self::Up => Severity::Info,
            Self::Changed | Self::Down => Severity::Warning,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Added => "added",
            Self::Changed => "changed",
            Self::Up => "up",
            Self::Down => "down",
        };
        write!(f, "{}", name)
    }
}
