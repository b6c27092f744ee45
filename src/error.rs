/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Fallback message when the backend gives no usable error body,
/// and for transport failures (no detail is surfaced for those).
pub const GENERIC_NOT_FOUND: &str = "Movie not found";

/// Shown when a submit is attempted with an empty or whitespace-only query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a movie title";

impl AppError {
    /// Maps an error to the text shown in the UI.
    ///
    /// Backend-provided messages are surfaced verbatim; transport failures
    /// collapse to the generic fallback rather than leaking connection detail.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Transport(_) | AppError::ExternalApi(_) => GENERIC_NOT_FOUND.to_string(),
            AppError::Storage(_) | AppError::Internal(_) => self.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_not_found_verbatim() {
        let err = AppError::NotFound("Movie \"Inceptoin\" not found".to_string());
        assert_eq!(err.user_message(), "Movie \"Inceptoin\" not found");
    }

    #[test]
    fn test_user_message_invalid_input() {
        let err = AppError::InvalidInput(EMPTY_QUERY_MESSAGE.to_string());
        assert_eq!(err.user_message(), EMPTY_QUERY_MESSAGE);
    }

    #[test]
    fn test_user_message_external_api_is_generic() {
        let err = AppError::ExternalApi("API returned status 500".to_string());
        assert_eq!(err.user_message(), GENERIC_NOT_FOUND);
    }
}
