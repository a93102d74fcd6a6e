use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use referral_builder::config::AppConfig;
use referral_builder::core::appearance::FileHandoff;
use referral_builder::core::campaign::{CampaignLayout, CampaignListStore, CampaignNameStore};
use referral_builder::core::publish::{Publisher, SimulatedBackend};
use referral_builder::tui::app::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_warning) = AppConfig::load_checked();

    // Initialize logging
    let _log_guard = referral_builder::core::logging::init(&config.log_dir());
    tracing::info!("Referral Builder v{} starting", referral_builder::VERSION);
    if let Some(warning) = config_warning {
        tracing::warn!("{warning}");
    }

    // Session stores
    let names = Arc::new(CampaignNameStore::new());
    let campaigns = Arc::new(CampaignListStore::with_prefix(
        Arc::clone(&names),
        config.builder.name_prefix.clone(),
    ));
    campaigns.create_default();

    let handoff = Arc::new(FileHandoff::in_dir(&config.data_dir()));
    let layout = CampaignLayout::new(config.builder.step_defs()?, names, handoff)?;
    let publisher = Arc::new(Publisher::new(SimulatedBackend::new(config.publish.delay())));

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(
        layout,
        campaigns,
        publisher,
        config.publish.environments.clone(),
        event_rx,
        event_tx,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "Builder exited with an error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    tracing::info!("Referral Builder shutting down");
    Ok(())
}
