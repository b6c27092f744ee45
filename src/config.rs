use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
///
/// All variables are prefixed with `CINESCOUT_`, e.g. `CINESCOUT_API_URL`.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Recommendation service base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Path of the JSON file holding the recent-search history
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// Optional log destination; when unset, logs go to stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_history_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".cinescout").join("recent_searches.json")
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("CINESCOUT_")
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url() {
        assert_eq!(default_api_url(), "http://localhost:5000");
    }

    #[test]
    fn test_default_history_path_ends_with_fixed_key() {
        let path = default_history_path();
        assert!(path.ends_with(".cinescout/recent_searches.json"));
    }
}
