use crate::domain::entities::{LocationLevel, LocationScope};
use crate::domain::errors::ApiError;
use async_trait::async_trait;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Options of `level` under `parent`; provinces take no parent.
    async fn fetch_locations(
        &self,
        scope: LocationScope,
        level: LocationLevel,
        parent: Option<&str>,
    ) -> Result<Vec<String>, ApiError>;
}
