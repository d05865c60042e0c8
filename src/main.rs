//! Opsdeck
//!
//! Desktop admin console for REST backends.
//!
//! This is the main entry point for the Dioxus Desktop application:
//! it wires up logging, loads `opsdeck.toml`, and hands off to the UI.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use opsdeck_core::{AppConfig, CONFIG_FILE};

fn main() -> anyhow::Result<()> {
    // Configuration first; its log_filter feeds the subscriber
    let config = AppConfig::load_from(CONFIG_FILE)
        .with_context(|| format!("failed to load {CONFIG_FILE}"))?;

    let filter = config
        .log_filter
        .clone()
        .unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    tracing::info!(config = CONFIG_FILE, server = %config.server.base_url, "Opsdeck starting");

    // Launch the Dioxus desktop application
    opsdeck_ui::launch(config);

    Ok(())
}
