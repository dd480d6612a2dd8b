//! The assistant service: one entry point per inbound chat turn.
//!
//! `AssistantService` wires the classifier, the gazetteer, the navigation
//! dialogue machine and the retrieval pipeline together. It owns the order
//! of interpretation for a turn: a pending navigation session is offered the
//! message first (zone answer, then route restatement); a clearly different
//! intent clears the session before being handled; everything else flows
//! through the classifier.
//!
//! Generic over the provider traits so tests run against fakes;
//! the classifier is boxed because the backend is picked from configuration
//! at startup.

use std::sync::Arc;

use thiserror::Error;

use aeroguide_types::chat::{ChatTurn, Lang};
use aeroguide_types::error::{SessionStoreError, UpstreamError};
use aeroguide_types::intent::Intent;
use aeroguide_types::llm::CompletionRequest;
use aeroguide_types::location::{Location, Zone};
use aeroguide_types::session::NavSession;
use aeroguide_types::wire::{AskReply, AskRequest};

use crate::answer::{self, answer_question, CompletionModel, KnowledgeIndex, TextEmbedder, PERSONA};
use crate::compose;
use crate::gazetteer::Gazetteer;
use crate::intent::box_classifier::BoxIntentClassifier;
use crate::nav::dialogue::{self, NavDirective, NavInput};
use crate::session::SessionStore;

/// Errors a turn can end with.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Session(#[from] SessionStoreError),
}

/// Orchestrates one `/api/ask` turn end to end.
pub struct AssistantService<C, E, K, S> {
    completion: C,
    embedder: E,
    index: K,
    sessions: S,
    classifier: BoxIntentClassifier,
    gazetteer: Arc<Gazetteer>,
    top_k: usize,
    max_zone_retries: u8,
}

impl<C, E, K, S> AssistantService<C, E, K, S>
where
    C: CompletionModel,
    E: TextEmbedder,
    K: KnowledgeIndex,
    S: SessionStore,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        completion: C,
        embedder: E,
        index: K,
        sessions: S,
        classifier: BoxIntentClassifier,
        gazetteer: Arc<Gazetteer>,
        top_k: usize,
        max_zone_retries: u8,
    ) -> Self {
        Self {
            completion,
            embedder,
            index,
            sessions,
            classifier,
            gazetteer,
            top_k,
            max_zone_retries,
        }
    }

    /// Handle one inbound chat turn for a session.
    ///
    /// Turns for the same session id serialize on the store's per-id lease;
    /// session state is only written after every upstream call for the turn
    /// has succeeded, so a failed turn can simply be retried.
    pub async fn handle_ask(
        &self,
        session_id: &str,
        request: &AskRequest,
    ) -> Result<AskReply, AssistantError> {
        let _lease = self.sessions.acquire(session_id).await;
        let question = request.question.trim();
        let lang = request.lang;
        let history = &request.chat_history;

        if let Some(pending) = self.sessions.load(session_id).await? {
            tracing::debug!(destination = %pending.destination.id, "turn joins a pending navigation dialogue");
            return self
                .continue_navigation(session_id, pending, question, history, lang)
                .await;
        }

        let classification = self.classifier.classify(question, history, lang).await?;
        tracing::info!(
            intent = classification.intent.tag(),
            classifier = self.classifier.name(),
            %lang,
            "turn classified"
        );
        match classification.intent {
            Intent::Navigation { utterance } => {
                let input = self.resolve_nav_input(&utterance, lang);
                self.advance(session_id, None, input, question, history, lang)
                    .await
            }
            other => {
                self.dispatch_side(other, classification.answer, question, history, lang)
                    .await
            }
        }
    }

    /// A turn arriving while the dialogue is awaiting the user's position.
    ///
    /// Interpretation order: a recognizable position phrase wins; then the
    /// classifier decides. A navigation restatement feeds the machine a new
    /// route; currency/playlist/information clear the stale session and run
    /// normally; a navigation turn that resolves nothing counts as a failed
    /// position answer (bounded retries).
    async fn continue_navigation(
        &self,
        session_id: &str,
        pending: NavSession,
        question: &str,
        history: &[ChatTurn],
        lang: Lang,
    ) -> Result<AskReply, AssistantError> {
        if let Some(zone) = self.gazetteer.find_user_zone(question, lang) {
            return self
                .advance(
                    session_id,
                    Some(pending),
                    NavInput::Position(Some(zone)),
                    question,
                    history,
                    lang,
                )
                .await;
        }

        let classification = self.classifier.classify(question, history, lang).await?;
        match classification.intent {
            Intent::Navigation { utterance } => {
                let input = match self.resolve_nav_input(&utterance, lang) {
                    NavInput::Route {
                        start: None,
                        end: None,
                    } => NavInput::Position(None),
                    resolved => resolved,
                };
                self.advance(session_id, Some(pending), input, question, history, lang)
                    .await
            }
            other => {
                tracing::info!(intent = other.tag(), "navigation dialogue interrupted, clearing session");
                self.sessions.clear(session_id).await?;
                self.dispatch_side(other, classification.answer, question, history, lang)
                    .await
            }
        }
    }

    /// Resolve an utterance to the dialogue machine's input form: a full
    /// start/end route first, a lone destination second.
    fn resolve_nav_input(&self, utterance: &str, lang: Lang) -> NavInput {
        if let Some((start, end)) = self.gazetteer.resolve_route(utterance, lang) {
            return NavInput::Route {
                start: Some(start),
                end: Some(end),
            };
        }
        NavInput::Route {
            start: None,
            end: self.gazetteer.find_destination(utterance, lang),
        }
    }

    /// Advance the dialogue machine and compose the directive's reply.
    ///
    /// The `Directions` directive makes one completion call to phrase the
    /// route; if that call fails the session is left untouched so the user
    /// can retry the turn.
    async fn advance(
        &self,
        session_id: &str,
        current: Option<NavSession>,
        input: NavInput,
        question: &str,
        history: &[ChatTurn],
        lang: Lang,
    ) -> Result<AskReply, AssistantError> {
        let (directive, next) = dialogue::step(current, input, self.max_zone_retries);
        tracing::debug!(pending = next.is_some(), "navigation dialogue advanced");

        let reply = match &directive {
            NavDirective::Directions { start_zone, dest } => {
                let text = self
                    .generate_directions(*start_zone, dest, question, history, lang)
                    .await?;
                compose::directions_reply(&text, dest)
            }
            NavDirective::CrossSecurityFirst { dest } => compose::cross_security_reply(lang, dest),
            NavDirective::Unreachable { dest } => compose::unreachable_reply(lang, dest),
            NavDirective::AskPosition { dest } => compose::ask_position_reply(lang, dest),
            NavDirective::RepeatPosition { dest: _ } => compose::repeat_position_reply(lang),
            NavDirective::Aborted { dest } => compose::aborted_reply(lang, dest),
            NavDirective::NotUnderstood => compose::not_understood_reply(lang),
        };

        match next {
            Some(session) => self.sessions.store(session_id, session).await?,
            None => self.sessions.clear(session_id).await?,
        }
        Ok(reply)
    }

    /// One completion call phrasing walking directions for a resolved route.
    async fn generate_directions(
        &self,
        start_zone: Zone,
        dest: &Location,
        question: &str,
        history: &[ChatTurn],
        lang: Lang,
    ) -> Result<String, UpstreamError> {
        let request = CompletionRequest {
            system: Some(directions_instruction(start_zone, dest, lang)),
            history: history.to_vec(),
            user: question.to_string(),
            max_output_tokens: None,
        };
        let outcome = self.completion.complete(&request).await?;
        Ok(outcome.text.trim().to_string())
    }

    /// Currency, playlist and information turns.
    async fn dispatch_side(
        &self,
        intent: Intent,
        premade_answer: Option<String>,
        question: &str,
        history: &[ChatTurn],
        lang: Lang,
    ) -> Result<AskReply, AssistantError> {
        match intent {
            Intent::Currency(query) => Ok(AskReply::trigger_currency(&query)),
            Intent::Playlist(query) => Ok(AskReply::trigger_playlist(query.genre)),
            Intent::Information => {
                if let Some(text) = premade_answer {
                    // the delegated classifier already answered; no second call
                    let text = compose::strip_intent_prefix(&text).to_string();
                    let image = self
                        .gazetteer
                        .find_map(question, lang)
                        .or_else(|| self.gazetteer.find_map(&text, lang))
                        .map(str::to_string);
                    let mut reply = AskReply::answer(text);
                    reply.image_url = image;
                    return Ok(reply);
                }
                let answer = answer_question(
                    &self.completion,
                    &self.embedder,
                    &self.index,
                    &self.gazetteer,
                    question,
                    history,
                    lang,
                    self.top_k,
                )
                .await?;
                let mut reply = AskReply::answer(compose::strip_intent_prefix(&answer.text));
                reply.source_context = answer.source;
                reply.image_url = answer.image_url;
                Ok(reply)
            }
            Intent::Navigation { .. } => unreachable!("navigation is dispatched by the caller"),
        }
    }

    /// One-or-two-sentence Polish summary of a text (the summarize feature's
    /// fixed contract).
    pub async fn summarize(&self, text: &str) -> Result<String, UpstreamError> {
        let request = CompletionRequest {
            system: Some(
                "Streść poniższy tekst w jednym lub dwóch zdaniach, po polsku, bez żadnego formatowania."
                    .to_string(),
            ),
            history: Vec::new(),
            user: text.to_string(),
            max_output_tokens: None,
        };
        let outcome = self.completion.complete(&request).await?;
        Ok(outcome.text.trim().to_string())
    }

    /// Translate a text into English (the translate feature always targets
    /// English).
    pub async fn translate(&self, text: &str) -> Result<String, UpstreamError> {
        let request = CompletionRequest {
            system: Some(
                "Translate the following text into English. Reply with the translation only, no commentary and no formatting."
                    .to_string(),
            ),
            history: Vec::new(),
            user: text.to_string(),
            max_output_tokens: None,
        };
        let outcome = self.completion.complete(&request).await?;
        Ok(outcome.text.trim().to_string())
    }
}

fn zone_phrase(zone: Zone, lang: Lang) -> &'static str {
    match (zone, lang) {
        (Zone::BeforeSecurity, Lang::En) => "the public landside area, before security control",
        (Zone::BeforeSecurity, Lang::Pl) => {
            "część ogólnodostępną terminalu, przed kontrolą bezpieczeństwa"
        }
        (Zone::AfterSecurity, Lang::En) => "the departures area, after security control",
        (Zone::AfterSecurity, Lang::Pl) => "strefę odlotów, za kontrolą bezpieczeństwa",
        (Zone::TransitionPoint, Lang::En) => "the security control area",
        (Zone::TransitionPoint, Lang::Pl) => "okolicę kontroli bezpieczeństwa",
    }
}

/// System instruction for phrasing directions, grounded in the destination's
/// gazetteer description.
fn directions_instruction(start_zone: Zone, dest: &Location, lang: Lang) -> String {
    let directive = answer::language_directive(lang);
    let area = zone_phrase(start_zone, lang);
    let name = dest.name.get(lang);
    let grounding = dest.description.get(lang);
    format!(
        "{PERSONA}\n\n\
         The traveller is currently in {area} and wants to reach: {name}.\n\
         What we know about the destination: {grounding}\n\n\
         Give short, friendly step-by-step walking directions (two to four steps), \
         mention the destination by name, and remind the traveller that the route \
         is marked on the attached map. Never use Markdown formatting characters \
         such as asterisks (*).\n\n\
         {directive}"
    )
}
