use std::io;
use std::sync::{Arc, Mutex};

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use cinescout::config::Config;
use cinescout::services::history::HistoryFile;
use cinescout::services::providers::recommend_api::RecommendApiProvider;
use cinescout::ui::app::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config)?;

    let provider = Arc::new(RecommendApiProvider::new(config.api_url.clone()));
    let history = HistoryFile::new(config.history_path.clone());
    let app = App::new(provider, history);

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    // Restore the terminal on every exit path, including early errors.
    struct TerminalRestore;
    impl Drop for TerminalRestore {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
    let _restore = TerminalRestore;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    app.run(&mut terminal).await?;
    Ok(())
}

/// Logs go to the configured file when one is set; stderr would corrupt the
/// TUI while it owns the terminal, so file logging is the interactive default.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match &config.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }

    Ok(())
}
