mod bootstrap;

use anyhow::Result;
use insights_chat::{ChatClient, ChatConfig, ChatSession};
use insights_core::settings::Settings;
use insights_data::reader::load_posts;
use insights_ui::app::{App, Panel};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("insta-insights v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Timezone: {}",
        settings.view,
        settings.theme,
        settings.timezone
    );

    if !insights_core::time_utils::validate_timezone(&settings.timezone) {
        tracing::warn!(
            "Unknown timezone \"{}\"; the clock will display UTC",
            settings.timezone
        );
    }

    let dataset = bootstrap::discover_dataset(settings.dataset.as_deref())?;
    tracing::info!("Loading dataset from {}", dataset.display());
    let table = load_posts(&dataset)?;
    tracing::info!("Loaded {} posts", table.len());

    // The chat session exists only when an endpoint is configured; the UI
    // shows a configuration hint otherwise.
    let session = settings.chat_url.as_ref().map(|url| {
        let config = ChatConfig::new(url.clone(), settings.chat_token.clone());
        ChatSession::new(ChatClient::new(config))
    });
    if session.is_none() {
        tracing::warn!("No chat endpoint configured; the chatbot panel is disabled");
    }

    let start_panel = match settings.view.as_str() {
        "analytics" => Panel::Analytics,
        _ => Panel::Chat,
    };

    let app = App::new(
        &settings.theme,
        settings.timezone.clone(),
        start_panel,
        settings.keywords.clone(),
        table,
        session,
    );

    // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the TUI.
    // We also listen for Ctrl+C at the OS level so that signals received
    // while the terminal is in raw mode are handled cleanly.
    tokio::select! {
        result = app.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down");
        }
    }

    Ok(())
}
