use anyhow::Context;
use bookkeeper_backend::{AppConfig, Backend};
use eframe::egui;
use log::{error, info};

mod ui;

use ui::BookkeeperApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting Bookkeeper egui application");

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!("Using data directory {:?}", config.data_directory);
    let backend = Backend::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([760.0, 480.0])
            .with_title("Bookkeeper")
            .with_resizable(true),
        ..Default::default()
    };

    info!("Launching egui window");
    eframe::run_native(
        "Bookkeeper",
        options,
        Box::new(move |cc| match BookkeeperApp::new(cc, backend) {
            Ok(app) => {
                info!("Successfully initialized Bookkeeper app");
                Ok(Box::new(app))
            }
            Err(e) => {
                error!("Failed to initialize app: {:#}", e);
                Err(format!("Failed to initialize app: {:#}", e).into())
            }
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))
}
