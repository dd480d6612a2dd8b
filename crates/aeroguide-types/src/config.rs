//! Service configuration types.
//!
//! `AppConfig` represents the top-level `aerog.toml`. Every field has a
//! default, so a missing file yields a runnable configuration. Credentials
//! are never config-file fields -- they come from the environment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level configuration for the aeroguide service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub classifier: ClassifierMode,
    pub gemini: GeminiConfig,
    pub pinecone: PineconeConfig,
    pub session: SessionConfig,
    pub rates: RatesConfig,
    pub gazetteer: GazetteerConfig,
}

/// Bind address for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Which intent-classification strategy the assistant runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierMode {
    /// Deterministic regex/keyword rules, no upstream call.
    LocalRules,
    /// One completion call with a structured-prefix reply contract.
    #[default]
    Delegated,
}

impl fmt::Display for ClassifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierMode::LocalRules => write!(f, "local_rules"),
            ClassifierMode::Delegated => write!(f, "delegated"),
        }
    }
}

/// Model names for the completion and embedding endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub completion_model: String,
    pub embedding_model: String,
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            completion_model: "gemini-1.5-pro-latest".to_string(),
            embedding_model: "embedding-001".to_string(),
            max_output_tokens: 500,
        }
    }
}

/// Vector index endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PineconeConfig {
    /// Full https host of the serverless index, e.g.
    /// `https://airport-navigator-embeddings-xxxx.svc.aped-4627-b74a.pinecone.io`.
    pub index_host: String,
    pub top_k: usize,
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            index_host: String::new(),
            top_k: 5,
        }
    }
}

/// Navigation session lifetime and retry bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ttl_secs: u64,
    /// Consecutive not-understood position answers before the dialogue
    /// aborts.
    pub max_zone_retries: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 1800,
            max_zone_retries: 3,
        }
    }
}

/// Where the cached exchange-rate table lives on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    pub path: String,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            path: "rates.json".to_string(),
        }
    }
}

/// Optional override for the bundled gazetteer dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GazetteerConfig {
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.classifier, ClassifierMode::Delegated);
        assert_eq!(config.gemini.completion_model, "gemini-1.5-pro-latest");
        assert_eq!(config.gemini.embedding_model, "embedding-001");
        assert_eq!(config.gemini.max_output_tokens, 500);
        assert_eq!(config.pinecone.top_k, 5);
        assert_eq!(config.session.ttl_secs, 1800);
        assert_eq!(config.session.max_zone_retries, 3);
        assert_eq!(config.rates.path, "rates.json");
        assert!(config.gazetteer.path.is_none());
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.pinecone.index_host, "");
    }

    #[test]
    fn test_app_config_deserialize_partial() {
        let config: AppConfig = toml::from_str(
            r#"
            classifier = "local_rules"

            [server]
            port = 3000

            [pinecone]
            index_host = "https://idx.example.pinecone.io"
            "#,
        )
        .unwrap();
        assert_eq!(config.classifier, ClassifierMode::LocalRules);
        assert_eq!(config.server.port, 3000);
        // untouched sections keep their defaults
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.pinecone.top_k, 5);
        assert_eq!(config.pinecone.index_host, "https://idx.example.pinecone.io");
    }

    #[test]
    fn test_classifier_mode_display() {
        assert_eq!(ClassifierMode::LocalRules.to_string(), "local_rules");
        assert_eq!(ClassifierMode::Delegated.to_string(), "delegated");
    }
}
