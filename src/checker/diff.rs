//! Diff engine
//!
//! Compares a fetch outcome with a site's stored state, updates the record
//! in place and returns the transitions to report.
//!
//! | Prior hash | Prior down | Outcome | Result |
//! |------------|------------|---------|--------|
//! | absent | - | fetched | hash set, up; Added |
//! | absent | - | unavailable | sentinel stored, down; Added + Down |
//! | present | false | same hash | nothing |
//! | present | false | new hash | hash updated; Changed |
//! | present | false | unavailable | down; Down |
//! | present | true | fetched | up; Up (+ Changed if hash differs) |
//! | present | true | unavailable | nothing |

use crate::checker::FetchOutcome;
use crate::registry::{Site, StoredHash};
use crate::state::Transition;

/// Applies one check result to a site record
///
/// Returns the transitions in report order. `Changed` is only produced for a
/// reachable site, so it never appears together with `Down`.
pub fn apply_outcome(site: &mut Site, outcome: &FetchOutcome) -> Vec<Transition> {
    let mut transitions = Vec::new();

    let Some(previous) = site.hash.as_ref() else {
        transitions.push(Transition::Added);
        match outcome {
            FetchOutcome::Fetched(fingerprint) => {
                site.hash = Some(StoredHash::Digest(fingerprint.clone()));
                site.down = false;
            }
            FetchOutcome::Unavailable { .. } => {
                site.hash = Some(StoredHash::Unavailable);
                site.down = true;
                transitions.push(Transition::Down);
            }
        }
        return transitions;
    };

    match outcome {
        FetchOutcome::Unavailable { .. } => {
            if !site.down {
                site.down = true;
                transitions.push(Transition::Down);
            }
        }
        FetchOutcome::Fetched(fingerprint) => {
            let changed = !previous.matches(fingerprint);

            if changed {
                site.hash = Some(StoredHash::Digest(fingerprint.clone()));
                transitions.push(Transition::Changed);
            }

            if site.down {
                site.down = false;
                transitions.push(Transition::Up);
            }
        }
    }

    transitions.sort();
    transitions
}
