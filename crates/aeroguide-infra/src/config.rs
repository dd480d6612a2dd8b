//! Configuration and credential loading.
//!
//! Reads `aerog.toml` from the working directory (or a path given on the
//! command line) and deserializes it into [`AppConfig`]. Falls back to
//! defaults when the file is missing or malformed, so a bare checkout runs.
//!
//! Credentials never live in the config file. They come from the
//! environment (loaded from `.env` by the binary) and are checked once at
//! startup, so a missing key fails the process before it accepts traffic.

use std::path::Path;

use secrecy::SecretString;

use aeroguide_types::config::AppConfig;
use aeroguide_types::error::ConfigError;

/// Environment variable names for the required credentials.
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_PINECONE_API_KEY: &str = "PINECONE_API_KEY";
pub const ENV_SPOTIFY_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const ENV_SPOTIFY_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";

/// All upstream credentials, loaded once at startup.
///
/// Secrets are wrapped in [`SecretString`] and only exposed when building
/// request headers; the derived `Debug` output redacts them.
#[derive(Debug)]
pub struct Secrets {
    pub google_api_key: SecretString,
    pub pinecone_api_key: SecretString,
    pub spotify_client_id: String,
    pub spotify_client_secret: SecretString,
}

/// Load service configuration from a TOML file.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the
///   default.
pub async fn load_config(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Load all required credentials from the process environment.
///
/// Fails on the first missing variable; the error names it so the operator
/// knows what to set.
pub fn load_secrets() -> Result<Secrets, ConfigError> {
    load_secrets_from(|name| std::env::var(name).ok())
}

/// Credential loading against an arbitrary lookup, for tests.
pub fn load_secrets_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Secrets, ConfigError> {
    let require = |name: &str| {
        lookup(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnv(name.to_string()))
    };

    Ok(Secrets {
        google_api_key: SecretString::from(require(ENV_GOOGLE_API_KEY)?),
        pinecone_api_key: SecretString::from(require(ENV_PINECONE_API_KEY)?),
        spotify_client_id: require(ENV_SPOTIFY_CLIENT_ID)?,
        spotify_client_secret: SecretString::from(require(ENV_SPOTIFY_CLIENT_SECRET)?),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use aeroguide_types::config::ClassifierMode;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("aerog.toml")).await;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.classifier, ClassifierMode::Delegated);
    }

    #[tokio::test]
    async fn test_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("aerog.toml");
        tokio::fs::write(
            &path,
            r#"
classifier = "local_rules"

[server]
port = 3000

[pinecone]
index_host = "https://idx.example.pinecone.io"
top_k = 3
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.classifier, ClassifierMode::LocalRules);
        assert_eq!(config.pinecone.top_k, 3);
        // untouched sections keep defaults
        assert_eq!(config.session.ttl_secs, 1800);
    }

    #[tokio::test]
    async fn test_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("aerog.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.server.port, 8080);
    }

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (ENV_GOOGLE_API_KEY, "google-key"),
            (ENV_PINECONE_API_KEY, "pinecone-key"),
            (ENV_SPOTIFY_CLIENT_ID, "spotify-id"),
            (ENV_SPOTIFY_CLIENT_SECRET, "spotify-secret"),
        ])
    }

    #[test]
    fn test_secrets_load_when_all_present() {
        let env = full_env();
        let secrets = load_secrets_from(|name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(secrets.spotify_client_id, "spotify-id");
    }

    #[test]
    fn test_missing_variable_names_itself() {
        let mut env = full_env();
        env.remove(ENV_PINECONE_API_KEY);

        let err = load_secrets_from(|name| env.get(name).map(|v| v.to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(name) if name == ENV_PINECONE_API_KEY));
    }

    #[test]
    fn test_blank_variable_counts_as_missing() {
        let mut env = full_env();
        env.insert(ENV_GOOGLE_API_KEY, "   ");

        let err = load_secrets_from(|name| env.get(name).map(|v| v.to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(name) if name == ENV_GOOGLE_API_KEY));
    }
}
