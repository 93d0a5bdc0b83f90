pub mod client;
pub mod envelope;
pub mod repositories;

pub use client::ApiClient;
pub use repositories::{
    HttpAnalyticsRepository, HttpExportRepository, HttpLocationRepository,
    HttpWidgetPreferenceRepository,
};
