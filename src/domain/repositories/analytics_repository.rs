use crate::domain::entities::Module;
use crate::domain::errors::ApiError;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Returns the `data` member of a successful envelope.
    async fn fetch_metric(&self, module: Module, metric: &str, query: &str)
    -> Result<Value, ApiError>;
}
