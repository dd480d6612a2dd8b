//! IntentClassifier trait definition.
//!
//! This is the seam between message understanding and everything downstream.
//! Uses RPITIT for `classify`; the object-safe wrapper lives in
//! `box_classifier`.

use aeroguide_types::chat::{ChatTurn, Lang};
use aeroguide_types::error::UpstreamError;
use aeroguide_types::intent::Intent;

/// Outcome of classifying one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    /// Populated when the classifying backend already produced the
    /// informational answer, letting the caller skip a second completion
    /// call.
    pub answer: Option<String>,
}

impl Classification {
    pub fn of(intent: Intent) -> Self {
        Self {
            intent,
            answer: None,
        }
    }

    pub fn answered(text: impl Into<String>) -> Self {
        Self {
            intent: Intent::Information,
            answer: Some(text.into()),
        }
    }
}

/// Trait for intent classification backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// `LocalRulesClassifier` resolves without any I/O;
/// `DelegatedLlmClassifier` makes one completion call.
pub trait IntentClassifier: Send + Sync {
    /// Backend name (e.g., "local_rules", "delegated"), for logs.
    fn name(&self) -> &str;

    /// Classify one user message.
    fn classify(
        &self,
        message: &str,
        history: &[ChatTurn],
        lang: Lang,
    ) -> impl std::future::Future<Output = Result<Classification, UpstreamError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answered_is_information() {
        let classification = Classification::answered("Gates open at 4am. ✈️");
        assert_eq!(classification.intent, Intent::Information);
        assert_eq!(classification.answer.as_deref(), Some("Gates open at 4am. ✈️"));
    }

    #[test]
    fn test_of_carries_no_answer() {
        let classification = Classification::of(Intent::Information);
        assert!(classification.answer.is_none());
    }
}
