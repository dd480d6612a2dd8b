//! Multi-turn indoor navigation: zone topology, the dialogue state machine,
//! and the localized replies it speaks with.

pub mod dialogue;
pub mod messages;
pub mod topology;
