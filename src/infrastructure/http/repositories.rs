use super::client::ApiClient;
use crate::domain::{
    entities::{LocationLevel, LocationScope, Module, WidgetLayout},
    errors::ApiError,
    services::QueryParams,
    repositories::{
        AnalyticsRepository, ExportRepository, ExportRequest, LocationRepository,
        WidgetPreferenceRepository,
    },
};
use async_trait::async_trait;
use serde_json::{Value, json};

pub struct HttpLocationRepository {
    client: ApiClient,
}

impl HttpLocationRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LocationRepository for HttpLocationRepository {
    async fn fetch_locations(
        &self,
        scope: LocationScope,
        level: LocationLevel,
        parent: Option<&str>,
    ) -> Result<Vec<String>, ApiError> {
        let path = format!("api/filters/{}/locations", scope.entity());
        let query = locations_query(level, parent);

        let data = self.client.get(&path, &query).await?;
        match data {
            Value::Array(entries) => Ok(entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()),
            Value::Null => Ok(Vec::new()),
            other => Err(ApiError::Decode(format!(
                "expected a list of {} names, got {}",
                level, other
            ))),
        }
    }
}

fn locations_query(level: LocationLevel, parent: Option<&str>) -> String {
    QueryParams::new()
        .scalar("level", Some(level.as_str()))
        .scalar("parent", parent)
        .build()
}

pub struct HttpAnalyticsRepository {
    client: ApiClient,
}

impl HttpAnalyticsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnalyticsRepository for HttpAnalyticsRepository {
    async fn fetch_metric(
        &self,
        module: Module,
        metric: &str,
        query: &str,
    ) -> Result<Value, ApiError> {
        let path = format!("api/analytics/{}/{}", module.slug(), metric);
        self.client.get(&path, query).await
    }
}

pub struct HttpWidgetPreferenceRepository {
    client: ApiClient,
}

impl HttpWidgetPreferenceRepository {
    const PATH: &'static str = "api/widgets/preferences";

    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WidgetPreferenceRepository for HttpWidgetPreferenceRepository {
    async fn load(&self) -> Result<WidgetLayout, ApiError> {
        let data = self.client.get(Self::PATH, "").await?;
        Ok(WidgetLayout::from_payload(&data))
    }

    async fn save(&self, layout: &WidgetLayout) -> Result<(), ApiError> {
        let preferences =
            serde_json::to_value(layout).map_err(|e| ApiError::Decode(e.to_string()))?;
        let payload = json!({ "preferences": preferences });
        self.client.post(Self::PATH, &payload).await?;
        Ok(())
    }

    async fn reset(&self) -> Result<WidgetLayout, ApiError> {
        let path = format!("{}/reset", Self::PATH);
        let data = self.client.post(&path, &json!({})).await?;
        Ok(WidgetLayout::from_payload(&data))
    }
}

pub struct HttpExportRepository {
    client: ApiClient,
}

impl HttpExportRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExportRepository for HttpExportRepository {
    async fn export(&self, request: &ExportRequest) -> Result<Vec<u8>, ApiError> {
        self.client
            .post_for_file("api/analytics/export", &request.to_payload())
            .await
    }
}
