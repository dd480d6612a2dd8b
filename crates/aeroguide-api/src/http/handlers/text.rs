//! POST /api/summarize, /api/translate and /api/reading-time.
//!
//! The article-companion endpoints: summarize and translate make one
//! completion call each; reading time is computed locally.

use axum::Json;
use axum::extract::State;

use aeroguide_core::reading_time;
use aeroguide_types::wire::{
    ReadingTimeReply, ReadingTimeRequest, SummarizeReply, SummarizeRequest, TranslateReply,
    TranslateRequest,
};

use crate::http::error::ApiError;
use crate::state::AppState;

fn require_text(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        Err(ApiError::Validation("text must not be empty".to_string()))
    } else {
        Ok(())
    }
}

/// One-or-two-sentence Polish summary of the supplied text.
pub async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeReply>, ApiError> {
    require_text(&request.text)?;
    let summary = state.assistant.summarize(&request.text).await?;
    Ok(Json(SummarizeReply { summary }))
}

/// English translation of the supplied text.
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateReply>, ApiError> {
    require_text(&request.text)?;
    let translated_text = state.assistant.translate(&request.text).await?;
    Ok(Json(TranslateReply { translated_text }))
}

/// Estimated reading time in whole minutes, computed locally.
pub async fn reading_time(
    Json(request): Json<ReadingTimeRequest>,
) -> Result<Json<ReadingTimeReply>, ApiError> {
    require_text(&request.text)?;
    Ok(Json(ReadingTimeReply {
        reading_time: reading_time::estimate(&request.text),
    }))
}
