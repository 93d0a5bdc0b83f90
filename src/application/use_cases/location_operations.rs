use crate::domain::{
    entities::{LocationLevel, LocationScope},
    errors::ApiError,
    repositories::LocationRepository,
};
use std::sync::Arc;

pub struct LoadLocationOptions {
    repository: Arc<dyn LocationRepository>,
}

impl LoadLocationOptions {
    pub fn new(repository: Arc<dyn LocationRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        scope: LocationScope,
        level: LocationLevel,
        parent: Option<&str>,
    ) -> Result<Vec<String>, ApiError> {
        tracing::debug!("Loading {} {} options (parent: {:?})", scope, level, parent);
        let options = self.repository.fetch_locations(scope, level, parent).await;
        match &options {
            Ok(list) => tracing::debug!("Loaded {} {} {} options", list.len(), scope, level),
            Err(e) => tracing::warn!("Failed to load {} {} options: {}", scope, level, e),
        }
        options
    }
}
