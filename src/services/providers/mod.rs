/// Recommendation backend abstraction
///
/// The whole backend is an opaque collaborator behind three HTTP endpoints.
/// Keeping it behind a trait gives the session and the tests a mockable seam
/// that doesn't care which transport is underneath.
use crate::{
    error::AppResult,
    models::{Movie, RecommendResponse},
};

pub mod recommend_api;

/// Trait for recommendation service providers
#[async_trait::async_trait]
pub trait RecommendProvider: Send + Sync {
    /// Fetch the curated popular-movies gallery
    ///
    /// Best-effort: callers log failures and keep whatever gallery they had.
    async fn popular_movies(&self) -> AppResult<Vec<Movie>>;

    /// Fetch every known movie title, for autocomplete
    ///
    /// Same best-effort policy as the gallery fetch.
    async fn all_titles(&self) -> AppResult<Vec<String>>;

    /// Submit a title and receive the backend's pick plus its recommendations
    ///
    /// The title is sent exactly as typed; the backend does its own matching.
    async fn recommend(&self, title: &str) -> AppResult<RecommendResponse>;
}
