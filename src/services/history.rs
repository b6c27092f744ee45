use std::fs;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Upper bound on the recent-search history
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Computes the next history from a prior one plus a new query.
///
/// The query moves to the front; any prior occurrence of the exact same
/// string (case-sensitive, untrimmed) is dropped; the result is capped at
/// [`MAX_RECENT_SEARCHES`] entries, most recent first.
pub fn next_ledger(ledger: &[String], query: &str) -> Vec<String> {
    let mut next = Vec::with_capacity(ledger.len() + 1);
    next.push(query.to_string());
    next.extend(ledger.iter().filter(|q| q.as_str() != query).cloned());
    next.truncate(MAX_RECENT_SEARCHES);
    next
}

/// Persistent store for the recent-search history
///
/// One JSON file holding a bare array of query strings, the same payload
/// the service's web client keeps under its localStorage key.
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the stored history; absent or unparseable files yield an
    /// empty one. Parse failures are swallowed, not surfaced.
    pub fn load(&self) -> Vec<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&raw) {
            Ok(ledger) => ledger,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    path = %self.path.display(),
                    "Ignoring unparseable history file"
                );
                Vec::new()
            }
        }
    }

    /// Writes the history back to disk, creating parent directories as needed.
    pub fn save(&self, ledger: &[String]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(ledger)
            .map_err(|e| AppError::Internal(format!("History serialization error: {}", e)))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Applies [`next_ledger`] and persists the result before returning it.
    ///
    /// The returned sequence is the new authoritative state. A failed write
    /// is logged and otherwise ignored; the in-memory history still advances.
    pub fn record(&self, ledger: &[String], query: &str) -> Vec<String> {
        let next = next_ledger(ledger, query);
        if let Err(e) = self.save(&next) {
            tracing::warn!(
                error = %e,
                path = %self.path.display(),
                "Failed to persist recent searches"
            );
        }
        next
    }
}
