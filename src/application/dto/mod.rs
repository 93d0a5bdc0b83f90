use crate::domain::entities::{ExportFormat, Module};
use crate::domain::services::ChartSpec;
use chrono::{DateTime, Local, NaiveDate};
use serde_json::Value;

/// Outcome of one chart or metric fetch within a module refresh.
#[derive(Debug, Clone)]
pub struct ChartResult {
    pub spec: &'static ChartSpec,
    /// `None` when the fetch failed; the chart renders its empty state.
    pub data: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct ModuleRefreshReport {
    pub module: Module,
    pub results: Vec<ChartResult>,
    pub completed_at: DateTime<Local>,
}

impl ModuleRefreshReport {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.data.is_none()).count()
    }

    pub fn is_degraded(&self) -> bool {
        self.failures() > 0
    }

    /// Single status line reported once the whole batch has settled.
    pub fn status_message(&self) -> String {
        let at = self.completed_at.format("%H:%M:%S");
        if self.is_degraded() {
            format!(
                "Some analytics could not be loaded ({} of {} failed) at {}",
                self.failures(),
                self.results.len(),
                at
            )
        } else {
            format!("Last refreshed at {}", at)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// `{module}_analytics_{YYYYMMDD}.{ext}`
pub fn export_file_name(module: Module, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{}_analytics_{}.{}",
        module.slug(),
        date.format("%Y%m%d"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::charts_for;
    use chrono::TimeZone;
    use serde_json::json;

    fn report(data: Vec<Option<Value>>) -> ModuleRefreshReport {
        let specs = charts_for(Module::Employers);
        ModuleRefreshReport {
            module: Module::Employers,
            results: specs
                .iter()
                .zip(data)
                .map(|(spec, data)| ChartResult { spec, data })
                .collect(),
            completed_at: Local.with_ymd_and_hms(2026, 10, 17, 9, 5, 7).unwrap(),
        }
    }

    #[test]
    fn status_message_reports_success() {
        let report = report(vec![Some(json!({})), Some(json!([]))]);
        assert_eq!(report.status_message(), "Last refreshed at 09:05:07");
    }

    #[test]
    fn status_message_reports_partial_failure() {
        let report = report(vec![Some(json!({})), None, None]);
        assert_eq!(report.failures(), 2);
        assert_eq!(
            report.status_message(),
            "Some analytics could not be loaded (2 of 3 failed) at 09:05:07"
        );
    }

    #[test]
    fn export_file_name_uses_module_and_format() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(
            export_file_name(Module::Jobs, ExportFormat::Xlsx, date),
            "jobs_analytics_20261017.xlsx"
        );
    }
}
