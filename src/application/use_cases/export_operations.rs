use crate::application::dto::{ExportFile, export_file_name};
use crate::domain::{
    errors::ApiError,
    repositories::{ExportRepository, ExportRequest},
};
use chrono::Local;
use std::sync::Arc;

pub struct ExportAnalytics {
    repository: Arc<dyn ExportRepository>,
}

impl ExportAnalytics {
    pub fn new(repository: Arc<dyn ExportRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: ExportRequest) -> Result<ExportFile, ApiError> {
        tracing::info!(
            "Exporting {} analytics as {}",
            request.module,
            request.format.extension()
        );
        let bytes = self.repository.export(&request).await?;
        let file_name = export_file_name(request.module, request.format, Local::now().date_naive());
        tracing::info!("Export ready: {} ({} bytes)", file_name, bytes.len());
        Ok(ExportFile { file_name, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::fakes::FakeExport;
    use crate::domain::entities::{ExportFormat, FilterState, Module};

    #[tokio::test]
    async fn names_file_after_module_and_format() {
        let repo = Arc::new(FakeExport::succeeding(b"a,b\n1,2\n".to_vec()));
        let file = ExportAnalytics::new(repo)
            .execute(ExportRequest::new(
                Module::Employers,
                ExportFormat::Csv,
                FilterState::new(),
            ))
            .await
            .unwrap();

        assert!(file.file_name.starts_with("employers_analytics_"));
        assert!(file.file_name.ends_with(".csv"));
        assert_eq!(file.bytes, b"a,b\n1,2\n");
    }

    #[tokio::test]
    async fn keeps_server_message_on_failure() {
        let repo = Arc::new(FakeExport::failing(ApiError::Status {
            status: 500,
            message: Some("Quota exceeded".into()),
        }));
        let err = ExportAnalytics::new(repo)
            .execute(ExportRequest::new(
                Module::Jobs,
                ExportFormat::Pdf,
                FilterState::new(),
            ))
            .await
            .unwrap_err();

        assert_eq!(err.server_message(), Some("Quota exceeded"));
    }
}
