//! Delegated intent classification: one completion call with a tag-prefix
//! reply contract.
//!
//! The model is instructed to reply either with a single
//! `INTENT:<TAG>: <payload>` line or with a direct answer. The prefix is
//! parsed exactly once, here; downstream code only ever sees a
//! `Classification`. A direct answer doubles as the informational reply, so
//! the serving layer can skip a second completion call.

use regex::Regex;

use aeroguide_types::chat::{ChatTurn, Lang};
use aeroguide_types::error::UpstreamError;
use aeroguide_types::intent::{CurrencyQuery, Intent, PlaylistQuery};
use aeroguide_types::llm::CompletionRequest;

use super::classifier::{Classification, IntentClassifier};
use crate::answer::{language_directive, CompletionModel, PERSONA};

/// Classifier backend that delegates understanding to a completion model.
pub struct DelegatedLlmClassifier<C> {
    completion: C,
    tag: Regex,
}

impl<C> DelegatedLlmClassifier<C> {
    pub fn new(completion: C) -> Self {
        Self {
            completion,
            tag: Regex::new(r"(?s)^INTENT:\s*(NAVIGATION|CURRENCY|PLAYLIST)\s*:\s*(.*)$")
                .expect("intent tag pattern compiles"),
        }
    }

    /// Map one model reply onto a `Classification`.
    ///
    /// Payload failures degrade instead of erroring: malformed currency JSON
    /// and empty playlist genres both fall back to `Information`, which the
    /// information path then answers normally. An empty navigation payload
    /// falls back to the original user message.
    fn parse_reply(&self, reply: &str, message: &str) -> Classification {
        let Some(captures) = self.tag.captures(reply) else {
            return Classification::answered(reply);
        };
        let payload = captures[2].trim().to_string();
        match &captures[1] {
            "NAVIGATION" => {
                let utterance = if payload.is_empty() {
                    message.to_string()
                } else {
                    payload
                };
                Classification::of(Intent::Navigation { utterance })
            }
            "CURRENCY" => match serde_json::from_str::<CurrencyQuery>(&payload) {
                Ok(query) => Classification::of(Intent::Currency(query)),
                Err(error) => {
                    tracing::warn!(%error, "malformed currency payload from classifier");
                    Classification::of(Intent::Information)
                }
            },
            "PLAYLIST" if !payload.is_empty() => Classification::of(Intent::Playlist(
                PlaylistQuery {
                    genre: payload.to_lowercase(),
                },
            )),
            _ => Classification::of(Intent::Information),
        }
    }
}

fn classifier_instruction(lang: Lang) -> String {
    let directive = language_directive(lang);
    format!(
        "{PERSONA}\n\n\
         Before answering, decide what the user wants. Exactly four cases exist:\n\
         1. NAVIGATION -- the user asks how to get somewhere inside the airport, for directions or for a map. Your whole reply must be:\n\
         INTENT:NAVIGATION: <the user's message, unchanged>\n\
         2. CURRENCY -- the user asks to convert an amount of money. Your whole reply must be:\n\
         INTENT:CURRENCY: {{\"amount\": <number>, \"from\": \"<3-letter code>\", \"to\": \"<3-letter code>\"}}\n\
         3. PLAYLIST -- the user asks for music or a playlist. Your whole reply must be:\n\
         INTENT:PLAYLIST: <music genre, one or two words>\n\
         4. Anything else -- answer the user yourself, following the golden rules:\n\
         - BE FRIENDLY AND CONCISE: answer briefly, on topic and in a warm tone. Use emoji where they fit.\n\
         - IF YOU DO NOT KNOW: when you are not sure, your only allowed reply is:\n\
         (PL) \"Hmm, nie jestem pewien tej informacji 🤔. Najlepiej sprawdzić to na oficjalnej stronie lotniska: [Strona Główna Lotniska w Edynburgu](https://www.edinburghairport.com/) 🌐\"\n\
         (EN) \"Hmm, I'm not sure about that information 🤔. The best place to check is the official airport website: [Edinburgh Airport Homepage](https://www.edinburghairport.com/) 🌐\"\n\
         - NO FORMATTING: never use Markdown formatting characters such as asterisks (*), except links written as [text](URL).\n\n\
         {directive}"
    )
}

impl<C: CompletionModel> IntentClassifier for DelegatedLlmClassifier<C> {
    fn name(&self) -> &str {
        "delegated"
    }

    async fn classify(
        &self,
        message: &str,
        history: &[ChatTurn],
        lang: Lang,
    ) -> Result<Classification, UpstreamError> {
        let request = CompletionRequest {
            system: Some(classifier_instruction(lang)),
            history: history.to_vec(),
            user: message.to_string(),
            max_output_tokens: None,
        };
        let outcome = self.completion.complete(&request).await?;
        let classification = self.parse_reply(outcome.text.trim(), message);
        tracing::debug!(intent = classification.intent.tag(), "message classified");
        Ok(classification)
    }
}
