//! Application state wiring all services together.
//!
//! The assistant service is generic over the provider traits; AppState pins
//! it to the concrete infra implementations. Everything the handlers touch
//! lives behind an `Arc`, so the state clones per request.

use std::path::Path;
use std::sync::Arc;

use aeroguide_core::assistant::AssistantService;
use aeroguide_core::currency::RateTable;
use aeroguide_core::gazetteer::Gazetteer;
use aeroguide_core::intent::box_classifier::BoxIntentClassifier;
use aeroguide_core::intent::delegated::DelegatedLlmClassifier;
use aeroguide_core::intent::rules::LocalRulesClassifier;
use aeroguide_core::session::InMemorySessionStore;
use aeroguide_infra::config::load_secrets;
use aeroguide_infra::gemini::GeminiClient;
use aeroguide_infra::pinecone::PineconeIndex;
use aeroguide_infra::rates::load_rate_table;
use aeroguide_infra::spotify::SpotifyCatalog;
use aeroguide_types::config::{AppConfig, ClassifierMode};

/// Concrete type alias for the assistant generics pinned to infra
/// implementations. The Gemini client fills both the completion and the
/// embedding seat.
pub type ConcreteAssistant =
    AssistantService<GeminiClient, GeminiClient, PineconeIndex, Arc<InMemorySessionStore>>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<ConcreteAssistant>,
    pub catalog: Arc<SpotifyCatalog>,
    pub rates: Arc<RateTable>,
    pub sessions: Arc<InMemorySessionStore>,
}

impl AppState {
    /// Wire the upstream adapters into the assistant.
    ///
    /// Fails fast on missing credentials or an unset Pinecone host; a broken
    /// rates file only degrades the currency feature, so it does not.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let secrets = load_secrets()?;

        if config.pinecone.index_host.trim().is_empty() {
            anyhow::bail!("pinecone.index_host must be set in the config file");
        }

        let gazetteer = Arc::new(match &config.gazetteer.path {
            Some(path) => Gazetteer::load(Path::new(path)).await?,
            None => Gazetteer::bundled(),
        });
        tracing::info!(
            locations = gazetteer.locations().len(),
            "gazetteer loaded"
        );

        let gemini = GeminiClient::new(secrets.google_api_key, &config.gemini);
        let index = PineconeIndex::new(
            secrets.pinecone_api_key,
            config.pinecone.index_host.clone(),
        );

        let classifier = match config.classifier {
            ClassifierMode::LocalRules => {
                BoxIntentClassifier::new(LocalRulesClassifier::new(Arc::clone(&gazetteer)))
            }
            ClassifierMode::Delegated => {
                BoxIntentClassifier::new(DelegatedLlmClassifier::new(gemini.clone()))
            }
        };
        tracing::info!(classifier = %config.classifier, "intent classifier selected");

        let sessions = Arc::new(InMemorySessionStore::new(config.session.ttl_secs));

        let assistant = AssistantService::new(
            gemini.clone(),
            gemini,
            index,
            Arc::clone(&sessions),
            classifier,
            gazetteer,
            config.pinecone.top_k,
            config.session.max_zone_retries,
        );

        let catalog = SpotifyCatalog::new(
            secrets.spotify_client_id,
            secrets.spotify_client_secret,
        );

        let rates = load_rate_table(Path::new(&config.rates.path)).await;

        Ok(Self {
            assistant: Arc::new(assistant),
            catalog: Arc::new(catalog),
            rates: Arc::new(rates),
            sessions,
        })
    }
}
