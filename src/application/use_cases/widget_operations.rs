use crate::domain::{
    entities::WidgetLayout, errors::ApiError, repositories::WidgetPreferenceRepository,
};
use std::sync::Arc;

pub struct LoadWidgetLayout {
    repository: Arc<dyn WidgetPreferenceRepository>,
}

impl LoadWidgetLayout {
    pub fn new(repository: Arc<dyn WidgetPreferenceRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<WidgetLayout, ApiError> {
        let layout = self.repository.load().await?;
        Ok(layout.normalized())
    }
}

pub struct SaveWidgetLayout {
    repository: Arc<dyn WidgetPreferenceRepository>,
}

impl SaveWidgetLayout {
    pub fn new(repository: Arc<dyn WidgetPreferenceRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, layout: WidgetLayout) -> Result<WidgetLayout, ApiError> {
        self.repository.save(&layout).await?;
        tracing::info!("Saved widget layout");
        Ok(layout)
    }
}

pub struct ResetWidgetLayout {
    repository: Arc<dyn WidgetPreferenceRepository>,
}

impl ResetWidgetLayout {
    pub fn new(repository: Arc<dyn WidgetPreferenceRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<WidgetLayout, ApiError> {
        let layout = self.repository.reset().await?;
        tracing::info!("Widget layout reset to defaults");
        Ok(layout.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::fakes::FakePreferences;
    use crate::domain::entities::WidgetName;

    #[tokio::test]
    async fn load_normalizes_stored_layout() {
        let stored = WidgetLayout {
            visibility: Default::default(),
            order: vec![WidgetName::Notes],
        };
        let repo = Arc::new(FakePreferences::with_layout(stored));

        let layout = LoadWidgetLayout::new(repo).execute().await.unwrap();
        assert_eq!(layout.order.len(), WidgetName::ALL.len());
        assert_eq!(layout.order[0], WidgetName::Notes);
    }

    #[tokio::test]
    async fn save_round_trips_through_repository() {
        let repo = Arc::new(FakePreferences::with_layout(WidgetLayout::default()));
        let mut layout = WidgetLayout::default();
        layout.visibility.insert(WidgetName::Clock, false);

        SaveWidgetLayout::new(repo.clone())
            .execute(layout.clone())
            .await
            .unwrap();
        let loaded = LoadWidgetLayout::new(repo).execute().await.unwrap();
        assert_eq!(loaded, layout);
    }
}
