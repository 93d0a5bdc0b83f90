use crate::domain::entities::WidgetLayout;
use crate::domain::errors::ApiError;
use async_trait::async_trait;

#[async_trait]
pub trait WidgetPreferenceRepository: Send + Sync {
    async fn load(&self) -> Result<WidgetLayout, ApiError>;
    async fn save(&self, layout: &WidgetLayout) -> Result<(), ApiError>;
    /// Resets server-side preferences and returns the defaults it stored.
    async fn reset(&self) -> Result<WidgetLayout, ApiError>;
}
