//! Shared domain types for aeroguide.
//!
//! This crate contains the vocabulary used across the assistant: conversation
//! turns, the airport gazetteer (zones, locations, aliases), classified
//! intents, navigation session state, HTTP wire DTOs, configuration, and the
//! error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod intent;
pub mod llm;
pub mod location;
pub mod session;
pub mod wire;
