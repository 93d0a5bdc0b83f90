use crate::application::dto::{ChartResult, ModuleRefreshReport};
use crate::domain::{
    entities::{FilterState, Module},
    repositories::AnalyticsRepository,
    services::{ChartSpec, charts_for},
};
use chrono::Local;
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinSet;

pub struct FetchAnalytics {
    repository: Arc<dyn AnalyticsRepository>,
}

impl FetchAnalytics {
    pub fn new(repository: Arc<dyn AnalyticsRepository>) -> Self {
        Self { repository }
    }

    /// Fetches one chart or metric with the filters that chart uses.
    /// Failures are logged and come back as `None`.
    pub async fn execute(&self, spec: &ChartSpec, state: &FilterState) -> Option<Value> {
        let query = spec.query(state).build();
        tracing::debug!("Fetching {}/{}?{}", spec.module, spec.metric, query);

        match self
            .repository
            .fetch_metric(spec.module, spec.metric, &query)
            .await
        {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Analytics {} unavailable: {}", spec.id, e);
                None
            }
        }
    }
}

pub struct RefreshModule {
    fetch: Arc<FetchAnalytics>,
}

impl RefreshModule {
    pub fn new(fetch: Arc<FetchAnalytics>) -> Self {
        Self { fetch }
    }

    /// Issues every fetch of `module` at once and waits for all of them to
    /// settle. One failing chart never aborts its siblings.
    pub async fn execute(&self, module: Module, state: FilterState) -> ModuleRefreshReport {
        let specs = charts_for(module);
        let state = Arc::new(state);
        let mut join_set = JoinSet::new();

        for spec in specs {
            let fetch = Arc::clone(&self.fetch);
            let state = Arc::clone(&state);
            join_set.spawn(async move {
                let data = fetch.execute(spec, &state).await;
                ChartResult { spec, data }
            });
        }

        let mut settled = Vec::with_capacity(specs.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(result) => settled.push(result),
                Err(e) => tracing::error!("Analytics task for {} failed: {}", module, e),
            }
        }

        let results: Vec<ChartResult> = specs
            .iter()
            .map(|spec| {
                let data = settled
                    .iter()
                    .position(|r| r.spec.id == spec.id)
                    .and_then(|index| settled.swap_remove(index).data);
                ChartResult { spec, data }
            })
            .collect();

        let report = ModuleRefreshReport {
            module,
            results,
            completed_at: Local::now(),
        };
        if report.is_degraded() {
            tracing::warn!(
                "Refreshed {} with {} of {} analytics failing",
                module,
                report.failures(),
                report.results.len()
            );
        } else {
            tracing::info!("Refreshed {} ({} analytics)", module, report.results.len());
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::fakes::FakeAnalytics;
    use crate::domain::entities::{FilterKey, LocationLevel, LocationScope};
    use serde_json::json;

    #[tokio::test]
    async fn failure_returns_none() {
        let repo = Arc::new(FakeAnalytics::default().failing("summary"));
        let fetch = FetchAnalytics::new(repo);
        let spec = &charts_for(Module::Jobs)[0];

        assert!(fetch.execute(spec, &FilterState::new()).await.is_none());
    }

    #[tokio::test]
    async fn refresh_settles_every_chart_despite_failures() {
        let repo = Arc::new(
            FakeAnalytics::default()
                .failing("postings")
                .with_data("job_status", json!([{ "label": "Open", "count": 3 }])),
        );
        let refresh = RefreshModule::new(Arc::new(FetchAnalytics::new(repo.clone())));

        let report = refresh.execute(Module::Jobs, FilterState::new()).await;

        let specs = charts_for(Module::Jobs);
        assert_eq!(report.results.len(), specs.len());
        for (result, spec) in report.results.iter().zip(specs) {
            assert_eq!(result.spec.id, spec.id);
        }
        assert_eq!(report.failures(), 1);
        assert_eq!(repo.calls().len(), specs.len());
    }

    #[tokio::test]
    async fn jobs_refresh_ignores_applicant_filters() {
        let repo = Arc::new(FakeAnalytics::default());
        let refresh = RefreshModule::new(Arc::new(FetchAnalytics::new(repo.clone())));

        let mut state = FilterState::new();
        state.set_values(FilterKey::Sex, vec!["Male".into()]);
        state.set_values(FilterKey::JobStatus, vec!["Open".into()]);
        state.set_location(
            LocationScope::Applicant,
            LocationLevel::Province,
            Some("Batangas".into()),
        );

        refresh.execute(Module::Jobs, state).await;

        let calls = repo.calls();
        assert!(!calls.is_empty());
        for (module, _, query) in calls {
            assert_eq!(module, Module::Jobs);
            assert!(!query.contains("sex"));
            assert!(!query.contains("applicant_province"));
        }
    }
}
