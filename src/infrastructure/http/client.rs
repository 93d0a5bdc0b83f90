use super::envelope::{interpret_envelope, interpret_export};
use crate::domain::entities::AppConfig;
use crate::domain::errors::ApiError;
use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

/// Thin JSON client bound to `{base_url}/{scope}`.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    root: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            root: config.api_root(),
        })
    }

    pub fn url(&self, path: &str, query: &str) -> String {
        let mut url = format!("{}/{}", self.root, path.trim_start_matches('/'));
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    pub async fn get(&self, path: &str, query: &str) -> Result<Value, ApiError> {
        let url = self.url(path, query);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport)?;
        interpret_envelope(status, &body)
    }

    pub async fn post(&self, path: &str, payload: &Value) -> Result<Value, ApiError> {
        let url = self.url(path, "");
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport)?;
        interpret_envelope(status, &body)
    }

    /// POST whose successful response is a file rather than an envelope.
    pub async fn post_for_file(&self, path: &str, payload: &Value) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path, "");
        tracing::debug!("POST {} (file)", url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status().as_u16();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));
        let body = response.bytes().await.map_err(transport)?;
        interpret_export(status, is_json, body.to_vec())
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_root_path_and_query() {
        let client = ApiClient::new(&AppConfig {
            base_url: "http://localhost:8000/".into(),
            scope: "admin".into(),
            ..AppConfig::default()
        })
        .unwrap();

        assert_eq!(
            client.url("/api/analytics/jobs/summary", "job_status=Open"),
            "http://localhost:8000/admin/api/analytics/jobs/summary?job_status=Open"
        );
        assert_eq!(
            client.url("api/widgets/preferences", ""),
            "http://localhost:8000/admin/api/widgets/preferences"
        );
    }
}
