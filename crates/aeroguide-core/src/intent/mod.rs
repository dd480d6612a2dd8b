//! Intent classification for inbound messages.
//!
//! - `classifier`: the `IntentClassifier` trait and its result type
//! - `box_classifier`: object-safe wrapper for runtime backend selection
//! - `rules`: deterministic regex + gazetteer rules, no I/O
//! - `delegated`: one completion call with a tag-prefix reply contract

pub mod box_classifier;
pub mod classifier;
pub mod delegated;
pub mod rules;
