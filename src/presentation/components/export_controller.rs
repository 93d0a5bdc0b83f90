use crate::application::dto::ExportFile;
use crate::domain::entities::{ExportFormat, FilterState, Module};
use crate::domain::errors::ApiError;
use crate::domain::repositories::ExportRequest;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_FAILED_MESSAGE: &str = "Export failed. Please try again.";

pub enum ExportOutcome {
    Ready(ExportFile),
    Failed { alert: String },
}

pub struct ExportController {
    format: ExportFormat,
    in_flight: bool,
}

impl ExportController {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            in_flight: false,
        }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn set_format(&mut self, format: ExportFormat) {
        self.format = format;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Starts an export of the full filter state. Ignored while another
    /// export is running.
    pub fn begin(&mut self, module: Module, state: &FilterState) -> Option<ExportRequest> {
        if self.in_flight {
            tracing::warn!("Export already in progress, ignoring duplicate request");
            return None;
        }
        self.in_flight = true;
        Some(ExportRequest::new(module, self.format, state.clone()))
    }

    pub fn finish(&mut self, result: Result<ExportFile, ApiError>) -> ExportOutcome {
        self.in_flight = false;
        match result {
            Ok(file) => ExportOutcome::Ready(file),
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                let alert = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| EXPORT_FAILED_MESSAGE.to_string());
                ExportOutcome::Failed { alert }
            }
        }
    }

    /// Asks where to store the file. `Ok(None)` when the dialog was
    /// cancelled.
    pub fn save_file(file: &ExportFile) -> Result<Option<PathBuf>> {
        let extension = file.file_name.rsplit('.').next().unwrap_or_default();
        let path = rfd::FileDialog::new()
            .set_file_name(file.file_name.as_str())
            .add_filter(extension.to_uppercase(), &[extension])
            .save_file();

        let Some(path) = path else {
            tracing::info!("Export save cancelled");
            return Ok(None);
        };

        Self::write_file(&path, file)?;
        Ok(Some(path))
    }

    fn write_file(path: &Path, file: &ExportFile) -> Result<()> {
        fs::write(path, &file.bytes)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;
        tracing::info!("Saved {} to {}", file.file_name, path.display());
        Ok(())
    }
}
