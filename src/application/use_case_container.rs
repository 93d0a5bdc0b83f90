use crate::application::use_cases::*;
use crate::domain::repositories::{
    AnalyticsRepository, ExportRepository, LocationRepository, WidgetPreferenceRepository,
};
use std::sync::Arc;

pub struct UseCaseContainer {
    pub load_locations: Arc<LoadLocationOptions>,
    pub fetch_analytics: Arc<FetchAnalytics>,
    pub refresh_module: Arc<RefreshModule>,
    pub load_widgets: Arc<LoadWidgetLayout>,
    pub save_widgets: Arc<SaveWidgetLayout>,
    pub reset_widgets: Arc<ResetWidgetLayout>,
    pub export: Arc<ExportAnalytics>,
}

impl UseCaseContainer {
    pub fn new(
        location_repository: Arc<dyn LocationRepository>,
        analytics_repository: Arc<dyn AnalyticsRepository>,
        preference_repository: Arc<dyn WidgetPreferenceRepository>,
        export_repository: Arc<dyn ExportRepository>,
    ) -> Self {
        let fetch_analytics = Arc::new(FetchAnalytics::new(analytics_repository));

        Self {
            load_locations: Arc::new(LoadLocationOptions::new(location_repository)),
            refresh_module: Arc::new(RefreshModule::new(Arc::clone(&fetch_analytics))),
            fetch_analytics,
            load_widgets: Arc::new(LoadWidgetLayout::new(Arc::clone(&preference_repository))),
            save_widgets: Arc::new(SaveWidgetLayout::new(Arc::clone(&preference_repository))),
            reset_widgets: Arc::new(ResetWidgetLayout::new(preference_repository)),
            export: Arc::new(ExportAnalytics::new(export_repository)),
        }
    }
}
