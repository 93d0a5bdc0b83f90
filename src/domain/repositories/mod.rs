pub mod analytics_repository;
pub mod export_repository;
pub mod location_repository;
pub mod widget_preference_repository;

pub use analytics_repository::AnalyticsRepository;
pub use export_repository::{ExportRepository, ExportRequest};
pub use location_repository::LocationRepository;
pub use widget_preference_repository::WidgetPreferenceRepository;
