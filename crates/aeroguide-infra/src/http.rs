//! Shared mapping from HTTP failures onto [`UpstreamError`].
//!
//! Every adapter speaks plain reqwest; the mapping of transport failures
//! and non-success statuses is the same for all of them.

use aeroguide_types::error::UpstreamError;

/// Map a transport-level reqwest failure onto [`UpstreamError`].
pub(crate) fn send_error(service: &'static str, err: &reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout { service }
    } else {
        UpstreamError::Network {
            service,
            message: err.to_string(),
        }
    }
}

/// Map a non-success HTTP status onto [`UpstreamError`].
pub(crate) fn status_error(service: &'static str, status: u16, body: String) -> UpstreamError {
    match status {
        401 | 403 => UpstreamError::Auth { service },
        429 => UpstreamError::RateLimited {
            retry_after_ms: None,
        },
        _ => UpstreamError::Http {
            service,
            status,
            message: body,
        },
    }
}
