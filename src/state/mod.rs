//! State module for classifying check results
//!
//! - `Transition`: the category a site lands in after being checked

mod transition;

pub use transition::Transition;
