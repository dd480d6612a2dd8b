//! Completion and retrieval request/response types.
//!
//! These model the data shapes the provider traits in `aeroguide-core`
//! exchange with their upstream adapters: completion calls, embeddings,
//! and knowledge-base retrieval.

use serde::{Deserialize, Serialize};

use crate::chat::ChatTurn;

/// Request to a completion model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System instruction prepended to the conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    /// The new user message.
    pub user: String,
    /// Cap on generated tokens; the adapter's configured default applies
    /// when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl CompletionRequest {
    /// A bare request carrying only the user message.
    pub fn from_user(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ..Self::default()
        }
    }
}

/// Response from a completion model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    /// Generated text, exactly as the model returned it.
    pub text: String,
}

/// One retrieved knowledge-base chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeChunk {
    /// Source document the chunk was cut from.
    pub filename: String,
    /// The chunk text itself.
    pub text: String,
    /// Similarity score reported by the index, best match highest.
    pub score: f32,
}
