//! Music catalog provider trait.
//!
//! The playlist side feature needs only one operation: tracks for a genre.
//! The concrete Spotify adapter lives in aeroguide-infra.

use aeroguide_types::error::UpstreamError;
use aeroguide_types::wire::Track;

/// Trait for music-catalog backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait MusicCatalog: Send + Sync {
    /// A small selection of tracks for a genre, already shuffled and capped
    /// by the backend. An empty vec means the genre yielded nothing.
    fn find_tracks(
        &self,
        genre: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Track>, UpstreamError>> + Send;
}

impl<T: MusicCatalog> MusicCatalog for std::sync::Arc<T> {
    async fn find_tracks(&self, genre: &str) -> Result<Vec<Track>, UpstreamError> {
        (**self).find_tracks(genre).await
    }
}
