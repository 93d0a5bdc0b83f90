use crate::domain::entities::{ExportFormat, FilterState, Module};
use crate::domain::errors::ApiError;
use async_trait::async_trait;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub module: Module,
    pub format: ExportFormat,
    pub filters: FilterState,
}

impl ExportRequest {
    pub fn new(module: Module, format: ExportFormat, filters: FilterState) -> Self {
        Self {
            module,
            format,
            filters,
        }
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "module": self.module,
            "format": self.format.extension(),
            "filters": self.filters.to_export_json(),
        })
    }
}

#[async_trait]
pub trait ExportRepository: Send + Sync {
    /// Raw bytes of the generated file.
    async fn export(&self, request: &ExportRequest) -> Result<Vec<u8>, ApiError>;
}
