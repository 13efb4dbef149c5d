//! Categorized result of one check run

use crate::output::traits::{Notification, Notifier};
use crate::state::Transition;

/// Site names per category, in the order the sites were checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Number of site checks performed, duplicates included
    pub checked: usize,
    pub added: Vec<String>,
    pub changed: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a site under each of its transitions
    pub fn record(&mut self, name: &str, transitions: &[Transition]) {
        self.checked += 1;
        for transition in transitions {
            self.list_mut(*transition).push(name.to_string());
        }
    }

    /// Names recorded under one category
    pub fn list(&self, transition: Transition) -> &[String] {
        match transition {
            Transition::Added => &self.added,
            Transition::Changed => &self.changed,
            Transition::Up => &self.up,
            Transition::Down => &self.down,
        }
    }

    fn list_mut(&mut self, transition: Transition) -> &mut Vec<String> {
        match transition {
            Transition::Added => &mut self.added,
            Transition::Changed => &mut self.changed,
            Transition::Up => &mut self.up,
            Transition::Down => &mut self.down,
        }
    }

    /// True if no site landed in any category
    pub fn is_empty(&self) -> bool {
        Transition::ALL.iter().all(|t| self.list(*t).is_empty())
    }

    /// One notification per non-empty category, in report order
    pub fn notifications(&self) -> Vec<Notification> {
        Transition::ALL
            .iter()
            .filter(|t| !self.list(**t).is_empty())
            .map(|t| {
                Notification::new(
                    t.severity(),
                    format!("{}: {}", t.heading(), self.list(*t).join(", ")),
                )
            })
            .collect()
    }

    /// Sends every notification to `notifier`
    pub fn deliver(&self, notifier: &mut dyn Notifier) {
        for notification in self.notifications() {
            notifier.notify(&notification);
        }
    }
}
