use thiserror::Error;

/// Errors from calls to external services (LLM, embeddings, vector search,
/// currency rates, music catalog).
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{service} returned status {status}: {message}")]
    Http {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("request to {service} timed out")]
    Timeout { service: &'static str },

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("authentication with {service} failed")]
    Auth { service: &'static str },

    #[error("malformed response from {service}: {message}")]
    Malformed {
        service: &'static str,
        message: String,
    },

    #[error("network error reaching {service}: {message}")]
    Network {
        service: &'static str,
        message: String,
    },
}

impl UpstreamError {
    /// Whether a retry with backoff could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamError::RateLimited { .. }
            | UpstreamError::Timeout { .. }
            | UpstreamError::Network { .. } => true,
            UpstreamError::Http { status, .. } => *status >= 500,
            UpstreamError::Auth { .. } | UpstreamError::Malformed { .. } => false,
        }
    }
}

/// Errors loading configuration or required credentials at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("config io error: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),
}

/// Errors loading or validating the location gazetteer.
#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("gazetteer io error: {0}")]
    Io(String),

    #[error("gazetteer parse error: {0}")]
    Parse(String),

    #[error("gazetteer has no locations")]
    Empty,

    #[error("duplicate location id: '{0}'")]
    DuplicateId(String),
}

/// Errors from session store operations.
///
/// The in-memory store never fails; the variant exists for backends with a
/// network between them and the data.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session backend unavailable: {0}")]
    Backend(String),
}

/// Errors from the exchange-rate table.
#[derive(Debug, Error)]
pub enum RatesError {
    #[error("rates io error: {0}")]
    Io(String),

    #[error("rates parse error: {0}")]
    Parse(String),

    #[error("unsupported currency: '{0}'")]
    UnsupportedCurrency(String),
}
