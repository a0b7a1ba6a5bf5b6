//! Wallet Kit Playground: a native window over the wallet-kit connectors

use std::sync::Arc;

use eframe::egui;

mod app;
mod panels;
mod setup;
mod ui;

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let settings = setup::PlaygroundSettings::from_env()?;
    tracing::info!(
        anvil = settings.anvil,
        offline = settings.offline,
        profile = ?settings.adapters.runtime_profile,
        "Starting Wallet Kit Playground"
    );
    let config = Arc::new(setup::build_config(&settings)?);
    let polling_interval = settings.adapters.polling_interval();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Wallet Kit Playground")
            .with_inner_size([720.0, 860.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wallet Kit Playground",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::App::new(cc, config, polling_interval)))),
    )
    .map_err(|e| eyre::eyre!("playground window failed: {e}"))
}
