//! Google Gemini adapter: completion and embedding over one HTTP client.

mod client;
mod types;

pub use client::GeminiClient;
