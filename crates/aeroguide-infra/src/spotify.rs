//! SpotifyCatalog -- concrete [`MusicCatalog`] over the Spotify Web API.
//!
//! Auth is the client-credentials flow: the token is fetched lazily, cached
//! in-process, and refreshed five minutes before its reported expiry. A 401
//! from the search endpoint drops the cached token so the next call
//! re-authenticates.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;

use aeroguide_core::music::MusicCatalog;
use aeroguide_types::error::UpstreamError;
use aeroguide_types::wire::Track;

use crate::http::{send_error, status_error};
use crate::retry::retry_with_backoff;

const SERVICE: &str = "spotify";

/// Refresh this long before the token's reported expiry.
const EXPIRY_MARGIN_SECS: i64 = 300;

/// How many candidates to pull from search before sampling.
const SEARCH_LIMIT: u32 = 20;

/// Tracks returned per playlist request.
const PLAYLIST_SIZE: usize = 3;

#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn from_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        Self {
            access_token: response.access_token,
            expires_at: now + chrono::Duration::seconds(response.expires_in - EXPIRY_MARGIN_SECS),
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SearchResponse {
    tracks: Option<SearchTracks>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchTracks {
    #[serde(default)]
    items: Vec<SearchTrack>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchTrack {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<SearchArtist>,
    album: SearchAlbum,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchArtist {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchAlbum {
    #[serde(default)]
    images: Vec<SearchImage>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchImage {
    url: String,
}

/// Spotify Web API client with an in-process token cache.
pub struct SpotifyCatalog {
    client: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    accounts_url: String,
    api_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyCatalog {
    pub fn new(client_id: String, client_secret: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            client_id,
            client_secret,
            accounts_url: "https://accounts.spotify.com".to_string(),
            api_url: "https://api.spotify.com".to_string(),
            token: Mutex::new(None),
        }
    }

    /// Override both endpoints (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_urls(mut self, accounts_url: String, api_url: String) -> Self {
        self.accounts_url = accounts_url;
        self.api_url = api_url;
        self
    }

    /// A valid access token, from cache or a fresh client-credentials grant.
    async fn access_token(&self) -> Result<String, UpstreamError> {
        let mut slot = self.token.lock().await;
        let now = Utc::now();
        if let Some(cached) = slot.as_ref() {
            if cached.is_fresh(now) {
                return Ok(cached.access_token.clone());
            }
        }

        let basic = BASE64.encode(format!(
            "{}:{}",
            self.client_id,
            self.client_secret.expose_secret()
        ));
        let response = self
            .client
            .post(format!("{}/api/token", self.accounts_url))
            .header("Authorization", format!("Basic {basic}"))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|err| send_error(SERVICE, &err))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(SERVICE, status.as_u16(), error_body));
        }

        let parsed: TokenResponse =
            response
                .json()
                .await
                .map_err(|err| UpstreamError::Malformed {
                    service: SERVICE,
                    message: format!("failed to parse token response: {err}"),
                })?;

        let cached = CachedToken::from_response(parsed, now);
        let token = cached.access_token.clone();
        *slot = Some(cached);
        tracing::debug!("spotify access token refreshed");
        Ok(token)
    }

    async fn search(&self, genre: &str) -> Result<Vec<Track>, UpstreamError> {
        let token = self.access_token().await?;
        let query = format!("genre:\"{genre}\"");

        let response = self
            .client
            .get(format!("{}/v1/search", self.api_url))
            .bearer_auth(&token)
            .query(&[
                ("q", query.as_str()),
                ("type", "track"),
                ("limit", &SEARCH_LIMIT.to_string()),
                ("market", "PL"),
            ])
            .send()
            .await
            .map_err(|err| send_error(SERVICE, &err))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 401 {
                // cached token went stale early; re-auth on the next call
                *self.token.lock().await = None;
            }
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(SERVICE, status.as_u16(), error_body));
        }

        let parsed: SearchResponse =
            response
                .json()
                .await
                .map_err(|err| UpstreamError::Malformed {
                    service: SERVICE,
                    message: format!("failed to parse search response: {err}"),
                })?;

        let items = parsed.tracks.map(|t| t.items).unwrap_or_default();
        Ok(pick_tracks(items))
    }
}

/// Shuffle the candidates and keep a small playlist.
fn pick_tracks(mut items: Vec<SearchTrack>) -> Vec<Track> {
    items.shuffle(&mut rand::thread_rng());
    items
        .into_iter()
        .take(PLAYLIST_SIZE)
        .map(|item| Track {
            id: item.id,
            name: item.name,
            artist: item
                .artists
                .first()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            album_art: item
                .album
                .images
                .first()
                .map(|i| i.url.clone())
                .unwrap_or_default(),
        })
        .collect()
}

impl MusicCatalog for SpotifyCatalog {
    async fn find_tracks(&self, genre: &str) -> Result<Vec<Track>, UpstreamError> {
        let tracks = retry_with_backoff(SERVICE, || self.search(genre)).await?;
        tracing::info!(genre, tracks = tracks.len(), "spotify search done");
        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_track(id: &str) -> SearchTrack {
        SearchTrack {
            id: id.to_string(),
            name: format!("Song {id}"),
            artists: vec![SearchArtist {
                name: "Artist".to_string(),
            }],
            album: SearchAlbum {
                images: vec![SearchImage {
                    url: "https://img/cover.jpg".to_string(),
                }],
            },
        }
    }

    #[test]
    fn test_token_expiry_margin() {
        let now = Utc::now();
        let cached = CachedToken::from_response(
            TokenResponse {
                access_token: "tok".to_string(),
                expires_in: 3600,
            },
            now,
        );

        assert!(cached.is_fresh(now + chrono::Duration::seconds(3600 - 301)));
        assert!(!cached.is_fresh(now + chrono::Duration::seconds(3600 - 300)));
    }

    #[test]
    fn test_pick_tracks_caps_at_three() {
        let items: Vec<SearchTrack> = (0..20).map(|i| search_track(&i.to_string())).collect();
        let tracks = pick_tracks(items);
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[0].artist, "Artist");
        assert_eq!(tracks[0].album_art, "https://img/cover.jpg");
    }

    #[test]
    fn test_pick_tracks_keeps_small_result_sets() {
        let tracks = pick_tracks(vec![search_track("only")]);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "only");

        assert!(pick_tracks(Vec::new()).is_empty());
    }

    #[test]
    fn test_missing_artist_and_art_degrade_to_empty() {
        let bare = SearchTrack {
            id: "x".to_string(),
            name: "X".to_string(),
            artists: Vec::new(),
            album: SearchAlbum { images: Vec::new() },
        };
        let tracks = pick_tracks(vec![bare]);
        assert_eq!(tracks[0].artist, "");
        assert_eq!(tracks[0].album_art, "");
    }

    #[test]
    fn test_search_response_parsing() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"tracks":{"items":[{
                "id":"abc","name":"Take Five",
                "artists":[{"name":"Dave Brubeck"}],
                "album":{"images":[{"url":"https://img/5.jpg"}]}
            }]}}"#,
        )
        .unwrap();
        let items = response.tracks.unwrap().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].artists[0].name, "Dave Brubeck");
    }
}
