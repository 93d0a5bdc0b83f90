//! In-memory repositories for use-case and component tests.

use crate::domain::{
    entities::{LocationLevel, LocationScope, Module, WidgetLayout},
    errors::ApiError,
    repositories::{
        AnalyticsRepository, ExportRepository, ExportRequest, LocationRepository,
        WidgetPreferenceRepository,
    },
};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeLocations {
    options: HashMap<(LocationLevel, Option<String>), Vec<String>>,
}

impl FakeLocations {
    pub fn with(mut self, level: LocationLevel, parent: Option<&str>, options: &[&str]) -> Self {
        self.options.insert(
            (level, parent.map(str::to_string)),
            options.iter().map(|o| o.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl LocationRepository for FakeLocations {
    async fn fetch_locations(
        &self,
        _scope: LocationScope,
        level: LocationLevel,
        parent: Option<&str>,
    ) -> Result<Vec<String>, ApiError> {
        self.options
            .get(&(level, parent.map(str::to_string)))
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                message: None,
            })
    }
}

#[derive(Default)]
pub struct FakeAnalytics {
    data: HashMap<String, Value>,
    failing: Vec<String>,
    calls: Mutex<Vec<(Module, String, String)>>,
}

impl FakeAnalytics {
    pub fn with_data(mut self, metric: &str, data: Value) -> Self {
        self.data.insert(metric.to_string(), data);
        self
    }

    pub fn failing(mut self, metric: &str) -> Self {
        self.failing.push(metric.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(Module, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalyticsRepository for FakeAnalytics {
    async fn fetch_metric(
        &self,
        module: Module,
        metric: &str,
        query: &str,
    ) -> Result<Value, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((module, metric.to_string(), query.to_string()));
        if self.failing.iter().any(|m| m == metric) {
            return Err(ApiError::Rejected {
                message: Some("boom".to_string()),
            });
        }
        Ok(self.data.get(metric).cloned().unwrap_or_else(|| json!([])))
    }
}

pub struct FakePreferences {
    stored: Mutex<WidgetLayout>,
}

impl FakePreferences {
    pub fn with_layout(layout: WidgetLayout) -> Self {
        Self {
            stored: Mutex::new(layout),
        }
    }
}

#[async_trait]
impl WidgetPreferenceRepository for FakePreferences {
    async fn load(&self) -> Result<WidgetLayout, ApiError> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save(&self, layout: &WidgetLayout) -> Result<(), ApiError> {
        *self.stored.lock().unwrap() = layout.clone();
        Ok(())
    }

    async fn reset(&self) -> Result<WidgetLayout, ApiError> {
        let defaults = WidgetLayout::default();
        *self.stored.lock().unwrap() = defaults.clone();
        Ok(defaults)
    }
}

pub struct FakeExport {
    outcome: Result<Vec<u8>, ApiError>,
}

impl FakeExport {
    pub fn succeeding(bytes: Vec<u8>) -> Self {
        Self { outcome: Ok(bytes) }
    }

    pub fn failing(err: ApiError) -> Self {
        Self { outcome: Err(err) }
    }
}

#[async_trait]
impl ExportRepository for FakeExport {
    async fn export(&self, _request: &ExportRequest) -> Result<Vec<u8>, ApiError> {
        self.outcome.clone()
    }
}
