use crate::error::{AppError, EMPTY_QUERY_MESSAGE};
use crate::models::{Movie, RecommendResponse};
use crate::services::history::HistoryFile;

/// Observable view state plus the submit state machine
///
/// Two controller states: idle and submitting, tracked by `loading`. A
/// submit attempt either passes both guards (non-blank input, nothing in
/// flight) and hands the dispatcher the raw query text, or leaves the
/// session untouched apart from a validation message.
///
/// All mutation happens on the event-loop task; background fetches come
/// back in through `finish_*` and `set_*`.
#[derive(Debug, Default)]
pub struct SearchSession {
    /// Current search input, exactly as typed
    pub input: String,
    /// Movie the backend matched for the last successful submit
    pub selected: Option<Movie>,
    /// Recommendations for the selected movie, ranked by the backend
    pub recommendations: Vec<Movie>,
    /// True strictly between dispatch and resolution of a recommend call
    pub loading: bool,
    /// User-visible error text, cleared on the next submit attempt
    pub error: Option<String>,
    /// Every known title, for autocomplete; empty until the startup fetch lands
    pub catalog: Vec<String>,
    /// Popular-movies gallery; empty until the startup fetch lands
    pub gallery: Vec<Movie>,
    /// Recent searches, most recent first
    pub recent: Vec<String>,
}

impl SearchSession {
    pub fn new(recent: Vec<String>) -> Self {
        Self {
            recent,
            ..Self::default()
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// Attempts the idle -> submitting transition.
    ///
    /// Returns the raw query text to dispatch, or `None` when nothing may
    /// be dispatched: a submit is already in flight, or the trimmed input
    /// is empty (which sets the validation message and stays idle).
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.loading {
            return None;
        }

        if self.input.trim().is_empty() {
            self.error = Some(EMPTY_QUERY_MESSAGE.to_string());
            return None;
        }

        self.error = None;
        self.loading = true;
        Some(self.input.clone())
    }

    /// Resolves a submit with the backend's response.
    ///
    /// Selected movie and recommendations are replaced together, and the
    /// query that triggered the call (not any normalized form) is recorded
    /// into the persistent history.
    pub fn finish_success(
        &mut self,
        response: RecommendResponse,
        query: &str,
        history: &HistoryFile,
    ) {
        self.selected = Some(response.selected_movie);
        self.recommendations = response.recommendations;
        self.recent = history.record(&self.recent, query);
        self.loading = false;
    }

    /// Resolves a submit that failed.
    ///
    /// Prior selected movie and recommendations stay as they were; only the
    /// error text and the loading flag change.
    pub fn finish_failure(&mut self, error: &AppError) {
        self.error = Some(error.user_message());
        self.loading = false;
    }

    /// Applies the startup gallery fetch. Failures never reach here.
    pub fn set_gallery(&mut self, gallery: Vec<Movie>) {
        self.gallery = gallery;
    }

    /// Applies the startup catalog fetch. Failures never reach here.
    pub fn set_catalog(&mut self, catalog: Vec<String>) {
        self.catalog = catalog;
    }

    /// Catalog titles matching the current input, for the autocomplete row.
    ///
    /// Case-insensitive substring match on the trimmed input; a blank input
    /// suggests nothing.
    pub fn suggestions(&self, limit: usize) -> Vec<&str> {
        let needle = self.input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.catalog
            .iter()
            .filter(|title| title.to_lowercase().contains(&needle))
            .take(limit)
            .map(String::as_str)
            .collect()
    }

    /// The gallery is shown until a movie has been selected.
    pub fn show_gallery(&self) -> bool {
        self.selected.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        serde_json::from_str(&format!(r#"{{"id": {}, "title": "{}"}}"#, id, title)).unwrap()
    }

    fn response(selected: Movie, recommendations: Vec<Movie>) -> RecommendResponse {
        RecommendResponse {
            selected_movie: selected,
            recommendations,
        }
    }

    fn temp_history() -> (tempfile::TempDir, HistoryFile) {
        let dir = tempfile::tempdir().unwrap();
        let file = HistoryFile::new(dir.path().join("recent_searches.json"));
        (dir, file)
    }

    #[test]
    fn test_initial_state_is_idle() {
        let session = SearchSession::new(Vec::new());
        assert!(!session.loading);
        assert!(session.error.is_none());
        assert!(session.selected.is_none());
        assert!(session.recommendations.is_empty());
        assert!(session.show_gallery());
    }

    #[test]
    fn test_begin_submit_blank_input_sets_validation_error() {
        let mut session = SearchSession::new(Vec::new());
        session.set_input("   ");

        assert_eq!(session.begin_submit(), None);
        assert!(!session.loading);
        assert_eq!(session.error.as_deref(), Some(EMPTY_QUERY_MESSAGE));
    }

    #[test]
    fn test_begin_submit_clears_prior_error_and_sets_loading() {
        let mut session = SearchSession::new(Vec::new());
        session.error = Some("Movie not found".to_string());
        session.set_input("Inception");

        assert_eq!(session.begin_submit().as_deref(), Some("Inception"));
        assert!(session.loading);
        assert!(session.error.is_none());
    }

    #[test]
    fn test_begin_submit_returns_raw_untrimmed_input() {
        let mut session = SearchSession::new(Vec::new());
        session.set_input("  Inception ");

        assert_eq!(session.begin_submit().as_deref(), Some("  Inception "));
    }

    #[test]
    fn test_begin_submit_guarded_while_submitting() {
        let mut session = SearchSession::new(Vec::new());
        session.set_input("Inception");

        assert!(session.begin_submit().is_some());
        assert_eq!(session.begin_submit(), None);
        assert!(session.loading);
    }

    #[test]
    fn test_finish_success_replaces_results_and_records_history() {
        let (_dir, history) = temp_history();
        let mut session = SearchSession::new(vec!["Alien".to_string()]);
        session.set_input("Up");

        let query = session.begin_submit().unwrap();
        session.finish_success(
            response(movie(1, "Up"), vec![movie(2, "Wall-E")]),
            &query,
            &history,
        );

        assert!(!session.loading);
        assert_eq!(session.selected.as_ref().unwrap().title, "Up");
        assert_eq!(session.recommendations.len(), 1);
        assert_eq!(session.recent, vec!["Up".to_string(), "Alien".to_string()]);
        assert!(!session.show_gallery());
    }

    #[test]
    fn test_finish_failure_keeps_prior_results() {
        let (_dir, history) = temp_history();
        let mut session = SearchSession::new(Vec::new());
        session.set_input("Up");
        let query = session.begin_submit().unwrap();
        session.finish_success(
            response(movie(1, "Up"), vec![movie(2, "Wall-E")]),
            &query,
            &history,
        );

        session.set_input("Nonexistent");
        assert!(session.begin_submit().is_some());
        session.finish_failure(&AppError::NotFound("Movie not found".to_string()));

        assert!(!session.loading);
        assert_eq!(session.error.as_deref(), Some("Movie not found"));
        assert_eq!(session.selected.as_ref().unwrap().title, "Up");
        assert_eq!(session.recommendations.len(), 1);
        assert_eq!(session.recent, vec!["Up".to_string()]);
    }

    #[test]
    fn test_suggestions_match_case_insensitive_substring() {
        let mut session = SearchSession::new(Vec::new());
        session.set_catalog(vec![
            "Inception".to_string(),
            "Interstellar".to_string(),
            "Up".to_string(),
        ]);

        session.set_input("int");
        assert_eq!(session.suggestions(10), vec!["Interstellar"]);

        session.set_input("in");
        assert_eq!(session.suggestions(10), vec!["Inception", "Interstellar"]);

        session.set_input("in");
        assert_eq!(session.suggestions(1), vec!["Inception"]);
    }

    #[test]
    fn test_suggestions_empty_input_suggests_nothing() {
        let mut session = SearchSession::new(Vec::new());
        session.set_catalog(vec!["Inception".to_string()]);

        session.set_input("   ");
        assert!(session.suggestions(10).is_empty());
    }

    #[test]
    fn test_gallery_and_catalog_apply_independently() {
        let mut session = SearchSession::new(Vec::new());
        session.set_gallery(vec![movie(1, "Up")]);
        session.set_catalog(vec!["Up".to_string()]);

        assert_eq!(session.gallery.len(), 1);
        assert_eq!(session.catalog.len(), 1);
        assert!(!session.loading);
        assert!(session.error.is_none());
    }
}
