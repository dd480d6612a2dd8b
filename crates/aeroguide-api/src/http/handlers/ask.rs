//! POST /api/ask - the conversational endpoint.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use aeroguide_types::wire::AskRequest;

use crate::http::cookie::SessionId;
use crate::http::error::ApiError;
use crate::state::AppState;

/// One chat turn. The `sid` cookie keys any pending navigation dialogue;
/// a first-time caller gets the cookie set on this response.
pub async fn ask(
    State(state): State<AppState>,
    session: SessionId,
    Json(request): Json<AskRequest>,
) -> Result<Response, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::Validation("question must not be empty".to_string()));
    }

    let reply = state.assistant.handle_ask(&session.id, &request).await?;

    let mut response = Json(reply).into_response();
    session.apply(response.headers_mut());
    Ok(response)
}
