mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::{Context, Result};
use application::UseCaseContainer;
use infrastructure::ConfigRepository;
use infrastructure::http::{
    ApiClient, HttpAnalyticsRepository, HttpExportRepository, HttpLocationRepository,
    HttpWidgetPreferenceRepository,
};
use presentation::services::AsyncExecutor;
use presentation::services::log_capture::init_log_capture;
use presentation::ui::DashboardApp;
use std::sync::Arc;

fn main() -> Result<()> {
    let log_rx = init_log_capture()?;

    let config_repository = ConfigRepository::new();
    let config = config_repository.load().unwrap_or_else(|e| {
        tracing::warn!("Using default settings: {:#}", e);
        Default::default()
    });

    let client = ApiClient::new(&config)?;
    let use_cases = Arc::new(UseCaseContainer::new(
        Arc::new(HttpLocationRepository::new(client.clone())),
        Arc::new(HttpAnalyticsRepository::new(client.clone())),
        Arc::new(HttpWidgetPreferenceRepository::new(client.clone())),
        Arc::new(HttpExportRepository::new(client)),
    ));
    let executor = AsyncExecutor::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Placement Analytics Dashboard",
        options,
        Box::new(move |cc| {
            Ok(Box::new(DashboardApp::new(
                cc,
                use_cases,
                executor,
                config,
                config_repository,
                log_rx,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
    .context("Dashboard window failed")
}
