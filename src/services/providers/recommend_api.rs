/// HTTP provider for the recommendation service
///
/// Endpoints:
/// 1. Gallery: GET /popular_movies -> JSON array of movies
/// 2. Catalog: GET /movies -> JSON array of title strings
/// 3. Recommend: POST /recommend {"title": ...} -> selected movie + recommendations,
///    or a non-2xx status with an {"error": ...} body
use reqwest::{Client as HttpClient, StatusCode};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult, GENERIC_NOT_FOUND},
    models::{ApiErrorBody, Movie, RecommendResponse},
    services::providers::RecommendProvider,
};

#[derive(Clone)]
pub struct RecommendApiProvider {
    http_client: HttpClient,
    api_url: String,
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
    title: &'a str,
}

impl RecommendApiProvider {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }

    /// Maps a non-2xx recommend response to the user-visible error.
    ///
    /// The backend's own message is surfaced verbatim when the body carries
    /// one; anything else collapses to the generic fallback.
    fn recommend_error(status: StatusCode, body: &str) -> AppError {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| GENERIC_NOT_FOUND.to_string());

        tracing::warn!(status = %status, message = %message, "Recommend request rejected");
        AppError::NotFound(message)
    }
}

#[async_trait::async_trait]
impl RecommendProvider for RecommendApiProvider {
    async fn popular_movies(&self) -> AppResult<Vec<Movie>> {
        let url = format!("{}/popular_movies", self.api_url);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let movies: Vec<Movie> = response.json().await?;

        tracing::info!(results = movies.len(), "Popular movies fetched");

        Ok(movies)
    }

    async fn all_titles(&self) -> AppResult<Vec<String>> {
        let url = format!("{}/movies", self.api_url);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let titles: Vec<String> = response.json().await?;

        tracing::info!(results = titles.len(), "Title catalog fetched");

        Ok(titles)
    }

    async fn recommend(&self, title: &str) -> AppResult<RecommendResponse> {
        let url = format!("{}/recommend", self.api_url);
        let response = self
            .http_client
            .post(&url)
            .json(&RecommendRequest { title })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Self::recommend_error(status, &body));
        }

        let recommendation: RecommendResponse = response.json().await?;

        tracing::info!(
            query = %title,
            selected = %recommendation.selected_movie.title,
            results = recommendation.recommendations.len(),
            "Recommendation completed"
        );

        Ok(recommendation)
    }
}
