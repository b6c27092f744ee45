use serde::{Deserialize, Serialize};

/// Fallback poster shown when the backend has none for a movie.
///
/// Applied at the rendering boundary only; stored movies keep `poster: None`.
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/300x450?text=No+Poster";

/// A catalog record returned by the recommendation service
///
/// Movies arrive only off the wire; the client never constructs one itself.
/// The transport gives no type guarantee for `id` and `similarity_score`
/// (they show up as either JSON numbers or strings), so both go through
/// lenient deserializers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    #[serde(deserialize_with = "lenient::i64_from_number_or_string")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64_from_number_or_string")]
    pub similarity_score: Option<f64>,
}

impl Movie {
    /// Poster URL with the placeholder fallback, for display only.
    pub fn poster_or_placeholder(&self) -> &str {
        self.poster.as_deref().unwrap_or(POSTER_PLACEHOLDER)
    }
}

/// Successful response body from `POST /recommend`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecommendResponse {
    pub selected_movie: Movie,
    pub recommendations: Vec<Movie>,
}

/// Error body the backend attaches to non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

mod lenient {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString<T> {
        Number(T),
        String(String),
    }

    pub fn i64_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::<i64>::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s.trim().parse().map_err(Error::custom),
        }
    }

    pub fn opt_f64_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<NumberOrString<f64>>::deserialize(deserializer)?
            .map(|value| match value {
                NumberOrString::Number(n) => Ok(n),
                NumberOrString::String(s) => s.trim().parse().map_err(Error::custom),
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_deserialization_numeric_fields() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "poster": "https://image.tmdb.org/t/p/w500/inception.jpg",
            "similarity_score": 0.92
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.similarity_score, Some(0.92));
        assert_eq!(movie.overview, None);
    }

    #[test]
    fn test_movie_deserialization_coerces_string_fields() {
        let json = r#"{
            "id": "27205",
            "title": "Inception",
            "similarity_score": "0.9"
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.similarity_score, Some(0.9));
    }

    #[test]
    fn test_movie_deserialization_rejects_garbage_id() {
        let json = r#"{"id": "not-a-number", "title": "Broken"}"#;
        assert!(serde_json::from_str::<Movie>(json).is_err());
    }

    #[test]
    fn test_movie_optional_fields_absent() {
        let json = r#"{"id": 1, "title": "Up"}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster, None);
        assert_eq!(movie.overview, None);
        assert_eq!(movie.similarity_score, None);
    }

    #[test]
    fn test_poster_or_placeholder() {
        let json = r#"{"id": 1, "title": "Up"}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster_or_placeholder(), POSTER_PLACEHOLDER);

        let json = r#"{"id": 1, "title": "Up", "poster": "https://example.com/up.jpg"}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster_or_placeholder(), "https://example.com/up.jpg");
    }

    #[test]
    fn test_recommend_response_deserialization() {
        let json = r#"{
            "selected_movie": {"id": "1", "title": "Inception", "poster": null},
            "recommendations": [
                {"id": "2", "title": "Interstellar", "similarity_score": "0.9"},
                {"id": 3, "title": "The Prestige", "similarity_score": 0.87}
            ]
        }"#;

        let response: RecommendResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.selected_movie.id, 1);
        assert_eq!(response.recommendations.len(), 2);
        assert_eq!(response.recommendations[0].similarity_score, Some(0.9));
        assert_eq!(response.recommendations[1].similarity_score, Some(0.87));
    }

    #[test]
    fn test_api_error_body_deserialization() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error": "Movie not found"}"#).unwrap();
        assert_eq!(body.error, "Movie not found");
    }
}
