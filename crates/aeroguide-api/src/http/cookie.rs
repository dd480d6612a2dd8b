//! Session-id cookie handling for the conversational endpoint.
//!
//! The browser client carries no account identity; one `sid` cookie keys
//! the navigation dialogue state. The extractor reads it from the request,
//! minting a fresh UUIDv7 when absent, and the ask handler sets the cookie
//! on the way out for new sessions.

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderValue, HeaderMap};
use uuid::Uuid;

const COOKIE_NAME: &str = "sid";

/// The caller's session id, minted here if the request carried none.
#[derive(Debug, Clone)]
pub struct SessionId {
    pub id: String,
    /// True when this request minted the id; the response must set the
    /// cookie so the next turn joins the same session.
    pub is_new: bool,
}

impl SessionId {
    /// Append the `Set-Cookie` header for a freshly minted id.
    pub fn apply(&self, headers: &mut HeaderMap) {
        if !self.is_new {
            return;
        }
        let value = format!("{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax", self.id);
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.append(SET_COOKIE, value);
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SessionId {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .find_map(|header| cookie_value(header, COOKIE_NAME));

        Ok(match existing {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: Uuid::now_v7().to_string(),
                is_new: true,
            },
        })
    }
}

/// Value of a named cookie within one `Cookie` header line.
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> SessionId {
        let (mut parts, _) = request.into_parts();
        SessionId::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_existing_cookie_is_reused() {
        let request = Request::builder()
            .header(COOKIE, "theme=dark; sid=abc-123; lang=pl")
            .body(())
            .unwrap();

        let session = extract(request).await;
        assert_eq!(session.id, "abc-123");
        assert!(!session.is_new);
    }

    #[tokio::test]
    async fn test_missing_cookie_mints_uuid() {
        let request = Request::builder().body(()).unwrap();

        let session = extract(request).await;
        assert!(session.is_new);
        assert!(Uuid::parse_str(&session.id).is_ok());
    }

    #[tokio::test]
    async fn test_empty_value_counts_as_missing() {
        let request = Request::builder()
            .header(COOKIE, "sid=")
            .body(())
            .unwrap();

        let session = extract(request).await;
        assert!(session.is_new);
    }

    #[test]
    fn test_apply_sets_cookie_only_for_new_sessions() {
        let mut headers = HeaderMap::new();
        SessionId {
            id: "abc".to_string(),
            is_new: false,
        }
        .apply(&mut headers);
        assert!(headers.get(SET_COOKIE).is_none());

        SessionId {
            id: "abc".to_string(),
            is_new: true,
        }
        .apply(&mut headers);
        let value = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(value.starts_with("sid=abc;"));
        assert!(value.contains("HttpOnly"));
    }

    #[test]
    fn test_cookie_value_parsing() {
        assert_eq!(cookie_value("a=1; sid=xyz", "sid").as_deref(), Some("xyz"));
        assert_eq!(cookie_value("sid2=nope", "sid"), None);
        assert_eq!(cookie_value("garbage", "sid"), None);
    }
}
