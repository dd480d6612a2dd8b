//! Infrastructure layer for aeroguide.
//!
//! Contains implementations of the provider traits defined in
//! `aeroguide-core`: the Gemini completion/embedding client, the Pinecone
//! knowledge index, the Spotify music catalog, and the Frankfurter exchange
//! rates. Also owns configuration and credential loading.

pub mod config;
pub mod gemini;
mod http;
pub mod pinecone;
pub mod rates;
pub mod retry;
pub mod spotify;
