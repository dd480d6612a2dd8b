//! POST /api/playlist - a small track selection for a genre.

use axum::Json;
use axum::extract::State;

use aeroguide_core::music::MusicCatalog;
use aeroguide_types::wire::{PlaylistReply, PlaylistRequest};

use crate::http::error::ApiError;
use crate::state::AppState;

pub async fn playlist(
    State(state): State<AppState>,
    Json(request): Json<PlaylistRequest>,
) -> Result<Json<PlaylistReply>, ApiError> {
    let genre = request.genre.trim().to_lowercase();
    if genre.is_empty() {
        return Err(ApiError::Validation("genre must not be empty".to_string()));
    }

    let tracks = state.catalog.find_tracks(&genre).await?;
    if tracks.is_empty() {
        return Err(ApiError::NotFound(format!(
            "no tracks found for genre '{genre}'"
        )));
    }

    Ok(Json(PlaylistReply { tracks }))
}
