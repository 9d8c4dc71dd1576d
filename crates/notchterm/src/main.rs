mod panel;
mod store;
mod theme_store;

use anyhow::Result;
use notchterm_core::config::{AppConfig, StateFile};
use notchterm_core::ids::RandomIds;
use notchterm_terminal::{SessionRegistry, ShellSessionFactory};
use panel::PanelState;
use store::WorkspaceStore;
use theme_store::ThemeStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("notchterm=info,warn")),
        )
        .init();

    tracing::info!("Starting NotchTerm v{}", notchterm_core::VERSION);

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let factory = ShellSessionFactory::new(config.default_shell.clone());
    let registry = SessionRegistry::new(Box::new(factory));
    let mut workspace_store = WorkspaceStore::new(
        StateFile::workspaces(),
        registry,
        Box::new(RandomIds),
    );
    workspace_store.subscribe(|| tracing::debug!("Workspace state changed"));

    tracing::info!(
        "Loaded {} workspaces, active: {:?}",
        workspace_store.workspaces().len(),
        workspace_store.active_workspace_name()
    );

    let mut theme_store = ThemeStore::new(StateFile::theme());
    theme_store.subscribe(|| tracing::debug!("Theme state changed"));
    tracing::info!("Loaded {} theme presets", theme_store.presets().len());

    let mut panel_state = PanelState::new();
    if config.show_panel_on_launch {
        panel_state.show();
    }
    if !config.has_completed_hotkey_setup {
        tracing::info!("First run: hotkey setup has not been completed yet");
    }

    // The presentation layer (panel window, hotkey, terminal surface) hooks
    // in here; the stores above are its only write path. Until then the
    // process lifetime is bounded by Ctrl-C.
    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down");
    workspace_store.shutdown();
    Ok(())
}
